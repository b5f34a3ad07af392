use crate::Reflect;
use crate::info::TypeInfo;

/// Static access to the [`TypeInfo`] of a type.
///
/// Implemented by `#[derive(Reflect)]` and by the built-in impls; the
/// info is built on first call and stored in a static cell, see
/// [`NonGenericTypeInfoCell`](crate::impls::NonGenericTypeInfoCell).
pub trait Typed: Reflect {
    fn type_info() -> &'static TypeInfo;
}
