//! Runtime reflection for structural conversion.
//!
//! Every convertible type implements [`Reflect`] and [`Typed`]: it knows
//! its static [`TypeInfo`](info::TypeInfo) and can be viewed through the
//! access trait of its [`ReflectKind`](info::ReflectKind). Records and
//! scalar newtypes get both from `#[derive(Reflect)]`.
//!
//! ## Menu
//!
//! - [`info`]: static type information, including field options.
//! - [`ops`]: the per-kind access traits.
//! - [`impls`]: built-in impls and the static info cells.
//! - [`hooks`]: custom text hooks.
//! - [`Value`]: the open union.

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to `morph_reflect`, also inside this crate's doc tests.
extern crate self as morph_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;
mod value;

pub mod hooks;
pub mod impls;
pub mod info;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use impls::Timestamp;
pub use info::Typed;
pub use reflection::Reflect;
pub use value::{Map, Value};

#[cfg(feature = "derive")]
pub use morph_reflect_derive::Reflect;
