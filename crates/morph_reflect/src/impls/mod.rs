//! Built-in [`Reflect`](crate::Reflect) impls and the static type info cells.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod handle;
mod list;
mod map;
mod pointer;
mod scalar;
mod time;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use time::{Timestamp, format_timestamp, parse_timestamp};
