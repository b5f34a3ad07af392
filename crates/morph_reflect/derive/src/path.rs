//! Paths used by the generated code.
//!
//! Kept in one place so that moving an item in `morph_reflect` only
//! touches this module.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the access path to the `morph_reflect` crate.
///
/// 1. For crates that depend on `morph_reflect`, `::morph_reflect` is returned.
/// 2. For crates that depend on `morph`, `::morph::reflect` is returned.
/// 3. Otherwise `::morph_reflect` is returned, which may be incorrect.
///
/// Reading the manifest is comparatively expensive, so the path is
/// resolved once per derive and passed around.
pub(crate) fn morph_reflect() -> syn::Path {
    morph_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("morph_reflect"))
}

#[inline(always)]
pub(crate) fn reflect_(path: &syn::Path) -> TokenStream {
    quote!(#path::Reflect)
}

#[inline(always)]
pub(crate) fn typed_(path: &syn::Path) -> TokenStream {
    quote!(#path::info::Typed)
}

#[inline(always)]
pub(crate) fn type_info_(path: &syn::Path) -> TokenStream {
    quote!(#path::info::TypeInfo)
}

#[inline(always)]
pub(crate) fn struct_info_(path: &syn::Path) -> TokenStream {
    quote!(#path::info::StructInfo)
}

#[inline(always)]
pub(crate) fn scalar_info_(path: &syn::Path) -> TokenStream {
    quote!(#path::info::ScalarInfo)
}

#[inline(always)]
pub(crate) fn opaque_info_(path: &syn::Path) -> TokenStream {
    quote!(#path::info::OpaqueInfo)
}

#[inline(always)]
pub(crate) fn scalar_typed_(path: &syn::Path) -> TokenStream {
    quote!(#path::info::ScalarTyped)
}

#[inline(always)]
pub(crate) fn scalar_kind_(path: &syn::Path) -> TokenStream {
    quote!(#path::info::ScalarKind)
}

#[inline(always)]
pub(crate) fn named_field_(path: &syn::Path) -> TokenStream {
    quote!(#path::info::NamedField)
}

#[inline(always)]
pub(crate) fn field_flags_(path: &syn::Path) -> TokenStream {
    quote!(#path::info::FieldFlags)
}

#[inline(always)]
pub(crate) fn text_hooks_(path: &syn::Path) -> TokenStream {
    quote!(#path::hooks::TextHooks)
}

#[inline(always)]
pub(crate) fn text_encodable_(path: &syn::Path) -> TokenStream {
    quote!(#path::hooks::TextEncodable)
}

#[inline(always)]
pub(crate) fn text_decodable_(path: &syn::Path) -> TokenStream {
    quote!(#path::hooks::TextDecodable)
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(path: &syn::Path) -> TokenStream {
    quote!(#path::impls::NonGenericTypeInfoCell)
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(path: &syn::Path) -> TokenStream {
    quote!(#path::impls::GenericTypeInfoCell)
}

#[inline(always)]
pub(crate) fn reflect_ref_(path: &syn::Path) -> TokenStream {
    quote!(#path::ops::ReflectRef)
}

#[inline(always)]
pub(crate) fn reflect_mut_(path: &syn::Path) -> TokenStream {
    quote!(#path::ops::ReflectMut)
}

#[inline(always)]
pub(crate) fn struct_(path: &syn::Path) -> TokenStream {
    quote!(#path::ops::Struct)
}

#[inline(always)]
pub(crate) fn scalar_(path: &syn::Path) -> TokenStream {
    quote!(#path::ops::Scalar)
}

#[inline(always)]
pub(crate) fn primitive_(path: &syn::Path) -> TokenStream {
    quote!(#path::ops::Primitive)
}
