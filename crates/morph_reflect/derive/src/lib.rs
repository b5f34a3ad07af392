//! `#[derive(Reflect)]` for `morph_reflect`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod derive_data;
mod impls;
mod path;

use derive_data::ReflectDerive;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements `Typed` and `Reflect`, plus the access
/// trait of the type's kind.
///
/// ## Records
///
/// Structs with named fields become records and implement `Struct`. Only
/// `pub` fields are reflected; private fields are never read or written.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// struct User {
///     #[morph(rename = "user_name")]
///     pub name: String,
///     #[morph(omitempty)]
///     pub tags: Vec<String>,
///     #[morph(string)]
///     pub id: u64,
///     #[morph(embed)]
///     pub meta: Meta,
///     #[morph(skip)]
///     pub cache: Vec<u8>,
///     secret: String,
/// }
/// ```
///
/// Field attributes:
///
/// - `rename = "name"`: the serialization name.
/// - `omitempty`: leave the field out when its value is empty.
/// - `string`: the scalar value travels inside a quoted string.
/// - `embed`: an embedded member. When it is a record, or a pointer to
///   one, and has no `rename`, its fields are promoted into the outer record.
///   Embedded fields must be `pub`.
/// - `skip`: never reflected.
///
/// ## Scalar newtypes
///
/// `#[morph(scalar)]` on a one-field tuple struct makes it behave as its
/// inner scalar, like a type alias:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[morph(scalar)]
/// struct Celsius(f64);
/// ```
///
/// ## Opaque types
///
/// `#[morph(opaque)]` hides the structure. Without hooks the type is a
/// non-data handle that conversion leaves alone.
///
/// ## Text hooks
///
/// `#[morph(text)]` declares that the type implements both
/// `TextEncodable` and `TextDecodable`; `encode` and `decode` declare one
/// side only. Opaque types with `decode` must implement `Default`.
///
/// Enums and unions are rejected.
#[proc_macro_derive(Reflect, attributes(morph))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let reflect_derive = match ReflectDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let reflect_impls = match reflect_derive {
        ReflectDerive::Struct(info) => impls::impl_struct(&info),
        ReflectDerive::Scalar(info) => impls::impl_scalar(&info),
        ReflectDerive::Opaque(meta) => impls::impl_opaque(&meta),
    };

    TokenStream::from(quote! {
        const _: () = {
            #reflect_impls
        };
    })
}
