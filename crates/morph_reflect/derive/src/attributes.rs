//! Parsing of `#[morph(...)]` attributes.

use proc_macro2::Span;
use syn::{Attribute, LitStr};

pub(crate) const ATTRIBUTE_NAME: &str = "morph";

// -----------------------------------------------------------------------------
// Type attributes

/// How the type is reflected.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) enum TypeRepr {
    /// Named fields, reflected as a record.
    #[default]
    Struct,
    /// `#[morph(scalar)]`: a newtype that behaves as its inner scalar.
    Scalar(Span),
    /// `#[morph(opaque)]`: no visible structure.
    Opaque(Span),
}

/// Attributes on the type itself.
#[derive(Debug, Default)]
pub(crate) struct TypeAttributes {
    pub repr: TypeRepr,
    /// The type implements `TextEncodable`.
    pub encode: Option<Span>,
    /// The type implements `TextDecodable`.
    pub decode: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                let span = meta.path.require_ident()?.span();
                if meta.path.is_ident("text") {
                    out.encode = Some(span);
                    out.decode = Some(span);
                } else if meta.path.is_ident("encode") {
                    out.encode = Some(span);
                } else if meta.path.is_ident("decode") {
                    out.decode = Some(span);
                } else if meta.path.is_ident("scalar") {
                    out.set_repr(TypeRepr::Scalar(span))?;
                } else if meta.path.is_ident("opaque") {
                    out.set_repr(TypeRepr::Opaque(span))?;
                } else {
                    return Err(meta.error(
                        "unknown type attribute, expected `text`, `encode`, `decode`, `scalar` or `opaque`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(out)
    }

    fn set_repr(&mut self, repr: TypeRepr) -> syn::Result<()> {
        if let TypeRepr::Scalar(span) | TypeRepr::Opaque(span) = self.repr {
            return Err(syn::Error::new(
                span,
                "`scalar` and `opaque` can only be given once",
            ));
        }
        self.repr = repr;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Field attributes

/// Attributes on a single field.
#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub omit_empty: bool,
    /// `string`: the scalar value travels inside a quoted string.
    pub quoted: bool,
    pub embed: bool,
    pub skip: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    if name.value().is_empty() {
                        return Err(syn::Error::new(name.span(), "`rename` must not be empty"));
                    }
                    out.rename = Some(name);
                } else if meta.path.is_ident("omitempty") {
                    out.omit_empty = true;
                } else if meta.path.is_ident("string") {
                    out.quoted = true;
                } else if meta.path.is_ident("embed") {
                    out.embed = true;
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                } else {
                    return Err(meta.error(
                        "unknown field attribute, expected `rename`, `omitempty`, `string`, `embed` or `skip`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(out)
    }
}
