use proc_macro2::TokenStream;
use quote::quote;

use super::{hooks_tokens, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::ReflectMeta;

/// Implement `Typed` and `Reflect` for a type without visible structure.
///
/// Without hooks the type is a non-data handle and is never touched.
/// With a decode hook it must implement `Default`, which is its zero value.
pub(crate) fn impl_opaque(meta: &ReflectMeta) -> TokenStream {
    let path = meta.morph_reflect_path();
    let type_info_ = crate::path::type_info_(path);
    let opaque_info_ = crate::path::opaque_info_(path);

    let generics = meta.split_generics(&[], &TokenStream::new());
    let hooks = hooks_tokens(meta);

    let typed_trait_tokens = impl_trait_typed(
        meta,
        &generics,
        quote! {
            #type_info_::Opaque(#opaque_info_::new::<Self>().with_text_hooks(#hooks))
        },
    );

    let reset_tokens = meta.attrs().decode.map(|_| {
        quote! {
            fn reset_opaque(&mut self) {
                *self = <Self as ::core::default::Default>::default();
            }
        }
    });

    let reflect_trait_tokens =
        impl_trait_reflect(meta, &generics, quote!(Opaque), reset_tokens.unwrap_or_default());

    quote! {
        #typed_trait_tokens

        #reflect_trait_tokens
    }
}
