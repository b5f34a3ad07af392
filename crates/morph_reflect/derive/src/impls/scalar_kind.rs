use proc_macro2::TokenStream;
use quote::quote;

use super::{hooks_tokens, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::{ReflectScalar, SplitGenerics};

/// Implement `Typed`, `ScalarTyped`, `Scalar` and `Reflect` for a newtype
/// over a scalar. The newtype takes the kind of its inner type.
pub(crate) fn impl_scalar(info: &ReflectScalar) -> TokenStream {
    let meta = &info.meta;
    let path = meta.morph_reflect_path();
    let type_info_ = crate::path::type_info_(path);
    let scalar_info_ = crate::path::scalar_info_(path);
    let scalar_typed_ = crate::path::scalar_typed_(path);
    let scalar_kind_ = crate::path::scalar_kind_(path);
    let scalar_ = crate::path::scalar_(path);
    let primitive_ = crate::path::primitive_(path);

    let inner = info.inner;
    let generics = meta.split_generics(&[inner], &scalar_typed_);
    let hooks = hooks_tokens(meta);

    let typed_trait_tokens = impl_trait_typed(
        meta,
        &generics,
        quote! {
            #type_info_::Scalar(
                #scalar_info_::new::<Self>(<#inner as #scalar_typed_>::KIND).with_text_hooks(#hooks)
            )
        },
    );
    let reflect_trait_tokens = impl_trait_reflect(meta, &generics, quote!(Scalar), TokenStream::new());

    let ident = meta.ident();
    let SplitGenerics {
        impl_generics,
        ty_generics,
        where_clause,
    } = &generics;

    quote! {
        #typed_trait_tokens

        impl #impl_generics #scalar_typed_ for #ident #ty_generics #where_clause {
            const KIND: #scalar_kind_ = <#inner as #scalar_typed_>::KIND;
        }

        impl #impl_generics #scalar_ for #ident #ty_generics #where_clause {
            #[inline]
            fn scalar_kind(&self) -> #scalar_kind_ {
                <#inner as #scalar_typed_>::KIND
            }

            #[inline]
            fn get(&self) -> #primitive_<'_> {
                #scalar_::get(&self.0)
            }

            #[inline]
            fn set(&mut self, value: #primitive_<'_>) -> bool {
                #scalar_::set(&mut self.0, value)
            }
        }

        #reflect_trait_tokens
    }
}
