//! Access traits for each [`ReflectKind`](crate::info::ReflectKind).
//!
//! ## Menu
//!
//! - [`ReflectRef`], [`ReflectMut`]: a value viewed through the trait of its kind.
//! - [`Struct`]: fields by declaration index.
//! - [`List`]: growable sequences that can be reset to a given length.
//! - [`Array`]: fixed-size sequences, read-only.
//! - [`Map`]: entries, and insertion under a string key.
//! - [`Pointer`]: the pointee, allocated on demand.
//! - [`Scalar`]: read and write through [`Primitive`].

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod list_ops;
mod map_ops;
mod pointer_ops;
mod scalar_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::{Array, List};
pub use map_ops::{Map, MapIter, MapKeyError, key_from_str, key_str};
pub use pointer_ops::Pointer;
pub use scalar_ops::{Primitive, Scalar};
pub use struct_ops::Struct;
