//! Static type information.
//!
//! ## Menu
//!
//! - [`Type`]: a `TypeId` plus the type path, used for identity and messages.
//! - [`TypeInfo`]: one variant per [`ReflectKind`], built once per type:
//!     - [`StructInfo`]: the visible fields of a record, as [`NamedField`]s.
//!     - [`ListInfo`]: growable sequences such as `Vec<T>`.
//!     - [`ArrayInfo`]: fixed-size sequences such as `[T; N]`.
//!     - [`MapInfo`]: key and value info of map-like containers.
//!     - [`PointerInfo`]: optional or owning pointers, e.g. `Option<T>` and `Box<T>`.
//!     - [`UnionInfo`]: the open union [`Value`](crate::Value).
//!     - [`ScalarInfo`]: booleans, numbers and strings, see [`ScalarKind`].
//!     - [`OpaqueInfo`]: values without visible structure (handles, timestamps).
//! - [`Typed`]: static access to a type's `TypeInfo`.
//! - [`ScalarTyped`]: the static [`ScalarKind`] of a scalar type.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod list_info;
mod map_info;
mod opaque_info;
mod pointer_info;
mod scalar_info;
mod struct_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use ty::impl_type_fn;

pub use field_info::{FieldFlags, NamedField};
pub use list_info::{ArrayInfo, ListInfo};
pub use map_info::MapInfo;
pub use opaque_info::{OpaqueInfo, UnionInfo};
pub use pointer_info::PointerInfo;
pub use scalar_info::{ScalarInfo, ScalarKind, ScalarTyped};
pub use struct_info::StructInfo;
pub use ty::Type;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use typed::Typed;
