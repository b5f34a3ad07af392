//! The parsed input of `#[derive(Reflect)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, GenericParam, Generics, Ident, Type, Visibility};

use crate::attributes::{FieldAttributes, TypeAttributes, TypeRepr};

// -----------------------------------------------------------------------------
// ReflectMeta

/// What every impl needs: the crate path, the type name, its generics
/// and the type attributes.
pub(crate) struct ReflectMeta<'a> {
    morph_reflect_path: syn::Path,
    ident: &'a Ident,
    generics: &'a Generics,
    attrs: TypeAttributes,
}

impl<'a> ReflectMeta<'a> {
    fn new(ident: &'a Ident, generics: &'a Generics, attrs: TypeAttributes) -> Self {
        Self {
            morph_reflect_path: crate::path::morph_reflect(),
            ident,
            generics,
            attrs,
        }
    }

    #[inline]
    pub fn morph_reflect_path(&self) -> &syn::Path {
        &self.morph_reflect_path
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    /// Whether the type info must go through the generic cell.
    #[inline]
    pub fn is_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
            || self.generics.const_params().next().is_some()
    }

    /// Returns `impl<...>`, `Type<...>` and the where clause.
    ///
    /// Type parameters get `Send + Sync + 'static`, and each of `bounded`
    /// gets the given bound.
    pub fn split_generics(&self, bounded: &[&Type], bound: &TokenStream) -> SplitGenerics {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut predicates: Vec<TokenStream> = where_clause
            .map(|clause| clause.predicates.iter().map(|p| quote!(#p)).collect())
            .unwrap_or_default();

        if self.is_generic() {
            for param in self.generics.type_params() {
                let ident = &param.ident;
                predicates.push(quote!(#ident: ::core::marker::Send + ::core::marker::Sync + 'static));
            }
            for ty in bounded {
                predicates.push(quote!(#ty: #bound));
            }
        }

        SplitGenerics {
            impl_generics: quote!(#impl_generics),
            ty_generics: quote!(#ty_generics),
            where_clause: if predicates.is_empty() {
                TokenStream::new()
            } else {
                quote!(where #(#predicates,)*)
            },
        }
    }
}

pub(crate) struct SplitGenerics {
    pub impl_generics: TokenStream,
    pub ty_generics: TokenStream,
    pub where_clause: TokenStream,
}

// -----------------------------------------------------------------------------
// ReflectDerive

/// A field visible to reflection.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

pub(crate) struct ReflectStruct<'a> {
    pub meta: ReflectMeta<'a>,
    pub fields: Vec<StructField<'a>>,
}

pub(crate) struct ReflectScalar<'a> {
    pub meta: ReflectMeta<'a>,
    pub inner: &'a Type,
}

pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Scalar(ReflectScalar<'a>),
    Opaque(ReflectMeta<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if let Some(GenericParam::Lifetime(param)) = input
            .generics
            .params
            .iter()
            .find(|param| matches!(param, GenericParam::Lifetime(_)))
        {
            return Err(syn::Error::new_spanned(
                param,
                "reflected types must be 'static, lifetime parameters are not supported",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let repr = attrs.repr;
        let meta = ReflectMeta::new(&input.ident, &input.generics, attrs);

        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`Reflect` cannot be derived for enums, use `Value` for open unions",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Reflect` cannot be derived for unions",
                ));
            }
        };

        match repr {
            TypeRepr::Opaque(_) => Ok(Self::Opaque(meta)),
            TypeRepr::Scalar(span) => match &data.fields {
                Fields::Unnamed(fields) if fields.unnamed.len() == 1 => Ok(Self::Scalar(ReflectScalar {
                    meta,
                    inner: &fields.unnamed[0].ty,
                })),
                _ => Err(syn::Error::new(
                    span,
                    "`scalar` needs a tuple struct with exactly one field",
                )),
            },
            TypeRepr::Struct => match &data.fields {
                Fields::Named(fields) => {
                    let mut active = Vec::with_capacity(fields.named.len());
                    for field in &fields.named {
                        let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
                        let Some(ident) = field.ident.as_ref() else {
                            continue;
                        };
                        if field_attrs.skip {
                            continue;
                        }
                        if !matches!(field.vis, Visibility::Public(_)) {
                            if field_attrs.embed {
                                return Err(syn::Error::new_spanned(
                                    ident,
                                    "embedded fields must be `pub`, or marked `skip`",
                                ));
                            }
                            continue;
                        }
                        active.push(StructField {
                            ident,
                            ty: &field.ty,
                            attrs: field_attrs,
                        });
                    }
                    Ok(Self::Struct(ReflectStruct {
                        meta,
                        fields: active,
                    }))
                }
                Fields::Unit => Ok(Self::Struct(ReflectStruct {
                    meta,
                    fields: Vec::new(),
                })),
                Fields::Unnamed(fields) => Err(syn::Error::new_spanned(
                    fields,
                    "tuple structs need `#[morph(scalar)]` or `#[morph(opaque)]`",
                )),
            },
        }
    }
}
