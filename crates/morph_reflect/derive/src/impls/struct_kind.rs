use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use super::{hooks_tokens, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::{ReflectStruct, SplitGenerics, StructField};

/// Implement `Typed`, `Reflect` and `Struct` for a record.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = &info.meta;
    let path = meta.morph_reflect_path();
    let reflect_ = crate::path::reflect_(path);
    let typed_ = crate::path::typed_(path);

    let field_types: Vec<&Type> = info.fields.iter().map(|field| field.ty).collect();
    let generics = meta.split_generics(&field_types, &quote!(#reflect_ + #typed_));

    let typed_trait_tokens = impl_trait_typed(meta, &generics, struct_info_tokens(info));
    let struct_trait_tokens = impl_trait_struct(info, &generics);
    let reflect_trait_tokens = impl_trait_reflect(meta, &generics, quote!(Struct), TokenStream::new());

    quote! {
        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens
    }
}

/// `TypeInfo::Struct(StructInfo::new::<Self>(&[...]).with_text_hooks(...))`
fn struct_info_tokens(info: &ReflectStruct) -> TokenStream {
    let meta = &info.meta;
    let path = meta.morph_reflect_path();
    let type_info_ = crate::path::type_info_(path);
    let struct_info_ = crate::path::struct_info_(path);
    let named_field_ = crate::path::named_field_(path);
    let field_flags_ = crate::path::field_flags_(path);

    let fields = info.fields.iter().map(|field| {
        let StructField { ident, ty, attrs } = field;
        let name = ident.to_string();

        let rename = attrs.rename.as_ref().map(|rename| quote!(.with_rename(#rename)));

        let mut flags = Vec::new();
        if attrs.omit_empty {
            flags.push(quote!(OMIT_EMPTY));
        }
        if attrs.quoted {
            flags.push(quote!(QUOTED));
        }
        if attrs.embed {
            flags.push(quote!(EMBEDDED));
        }
        let flags = (!flags.is_empty()).then(|| {
            quote!(.with_flags(#field_flags_::empty() #(.union(#field_flags_::#flags))*))
        });

        quote!(#named_field_::new::<#ty>(#name) #rename #flags)
    });

    let hooks = hooks_tokens(meta);

    quote! {
        #type_info_::Struct(
            #struct_info_::new::<Self>(&[#(#fields),*]).with_text_hooks(#hooks)
        )
    }
}

fn impl_trait_struct(info: &ReflectStruct, generics: &SplitGenerics) -> TokenStream {
    let meta = &info.meta;
    let path = meta.morph_reflect_path();
    let struct_ = crate::path::struct_(path);
    let reflect_ = crate::path::reflect_(path);

    let indices: Vec<usize> = (0..info.fields.len()).collect();
    let idents: Vec<_> = info.fields.iter().map(|field| field.ident).collect();
    let field_len = info.fields.len();

    let ident = meta.ident();
    let SplitGenerics {
        impl_generics,
        ty_generics,
        where_clause,
    } = generics;

    quote! {
        impl #impl_generics #struct_ for #ident #ty_generics #where_clause {
            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        }
    }
}
