//! Structural conversion with the semantics of a JSON round trip.
//!
//! [`convert`] writes a reflected source value into a reflected
//! destination so that the result matches encoding the source with
//! [`codec::marshal`] and decoding it with [`codec::unmarshal`], but
//! without producing any text:
//!
//! - record fields match keys case-insensitively, by serialization name;
//! - `omitempty` fields are left out when empty and `string` fields are
//!   unquoted;
//! - numbers going into unions become `f64`;
//! - fields missing from the source keep the destination's value.
//!
//! ```
//! use morph_reflect::{Reflect, Value};
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! struct Inner {
//!     #[morph(rename = "B")]
//!     pub b: i32,
//! }
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! struct Outer {
//!     #[morph(rename = "A")]
//!     pub a: Inner,
//! }
//!
//! let inner: Value = [("b", 1)].into_iter().collect();
//! let src: Value = [("a", inner)].into_iter().collect();
//!
//! let out: Outer = morph_convert::convert_to(&src).unwrap();
//! assert_eq!(out, Outer { a: Inner { b: 1 } });
//! ```
//!
//! ## Menu
//!
//! - [`Converter`]: a [`FieldCache`] and [`Options`] bundled together.
//! - [`FieldCache`]: memoized field descriptors, see [`Field`].
//! - [`Options`]: string to float parsing, transforms and the depth bound.
//! - [`codec`]: the JSON codec the conversion is modeled on.

// -----------------------------------------------------------------------------
// Modules

mod bridge;
mod coerce;
mod convert;
mod error;
mod fast_path;
mod fields;
mod options;
mod stack;

pub mod codec;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-level exports

pub use convert::Converter;
pub use error::{ConvertError, Result};
pub use fields::{Field, FieldCache};
pub use options::{DEFAULT_MAX_DEPTH, Options, Transform, Transformed};

use morph_reflect::Reflect;

// -----------------------------------------------------------------------------
// Functions

/// Converts `src` into `dst` with default options and the shared cache.
#[inline]
pub fn convert(src: &dyn Reflect, dst: &mut dyn Reflect) -> Result<()> {
    convert_with(src, dst, Options::default())
}

/// Converts `src` into `dst` with the shared cache.
pub fn convert_with(src: &dyn Reflect, dst: &mut dyn Reflect, options: Options) -> Result<()> {
    Converter::new(FieldCache::shared(), options).convert(src, dst)
}

/// Converts `src` into a fresh `T`.
#[inline]
pub fn convert_to<T: Reflect + Default>(src: &dyn Reflect) -> Result<T> {
    convert_to_with(src, Options::default())
}

/// Converts `src` into a fresh `T` with the given options.
pub fn convert_to_with<T: Reflect + Default>(src: &dyn Reflect, options: Options) -> Result<T> {
    let mut out = T::default();
    convert_with(src, &mut out, options)?;
    Ok(out)
}
