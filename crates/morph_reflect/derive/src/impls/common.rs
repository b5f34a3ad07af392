use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ReflectMeta, SplitGenerics};

/// The `TextHooks` value of the type, e.g. `TextHooks::empty().union(TextHooks::ENCODE)`.
pub(crate) fn hooks_tokens(meta: &ReflectMeta) -> TokenStream {
    let text_hooks_ = crate::path::text_hooks_(meta.morph_reflect_path());
    let attrs = meta.attrs();

    let encode = attrs.encode.map(|_| quote!(.union(#text_hooks_::ENCODE)));
    let decode = attrs.decode.map(|_| quote!(.union(#text_hooks_::DECODE)));

    quote!(#text_hooks_::empty() #encode #decode)
}

/// Generate the `Typed` impl.
///
/// `type_info_tokens` builds the `TypeInfo` inside the cell initializer.
pub(crate) fn impl_trait_typed(
    meta: &ReflectMeta,
    generics: &SplitGenerics,
    type_info_tokens: TokenStream,
) -> TokenStream {
    let path = meta.morph_reflect_path();
    let typed_ = crate::path::typed_(path);
    let type_info_ = crate::path::type_info_(path);

    let inner_cell_tokens = if meta.is_generic() {
        let info_cell = crate::path::generic_type_info_cell_(path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident();
    let SplitGenerics {
        impl_generics,
        ty_generics,
        where_clause,
    } = generics;

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}

/// Generate the `Reflect` impl.
///
/// `kind` is the variant of `ReflectRef`/`ReflectMut` the type is viewed as,
/// `extra` is appended to the impl body.
pub(crate) fn impl_trait_reflect(
    meta: &ReflectMeta,
    generics: &SplitGenerics,
    kind: TokenStream,
    extra: TokenStream,
) -> TokenStream {
    let path = meta.morph_reflect_path();
    let reflect_ = crate::path::reflect_(path);
    let typed_ = crate::path::typed_(path);
    let type_info_ = crate::path::type_info_(path);
    let reflect_ref_ = crate::path::reflect_ref_(path);
    let reflect_mut_ = crate::path::reflect_mut_(path);

    let attrs = meta.attrs();

    let encodable_tokens = attrs.encode.map(|_| {
        let text_encodable_ = crate::path::text_encodable_(path);
        quote! {
            #[inline]
            fn as_text_encodable(&self) -> ::core::option::Option<&dyn #text_encodable_> {
                ::core::option::Option::Some(self)
            }
        }
    });

    let decodable_tokens = attrs.decode.map(|_| {
        let text_decodable_ = crate::path::text_decodable_(path);
        quote! {
            #[inline]
            fn as_text_decodable(&mut self) -> ::core::option::Option<&mut dyn #text_decodable_> {
                ::core::option::Option::Some(self)
            }
        }
    });

    let ident = meta.ident();
    let SplitGenerics {
        impl_generics,
        ty_generics,
        where_clause,
    } = generics;

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_type_info(&self) -> &'static #type_info_ {
                <Self as #typed_>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#kind(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#kind(self)
            }

            #encodable_tokens

            #decodable_tokens

            #extra
        }
    }
}
