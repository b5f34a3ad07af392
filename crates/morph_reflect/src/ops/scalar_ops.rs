use crate::Reflect;
use crate::info::ScalarKind;

/// A scalar value, widened to the largest type of its class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
}

/// A boolean, number or string.
///
/// [`set`](Scalar::set) only accepts the [`Primitive`] class matching the
/// kind: `Int` for signed kinds, `Uint` for unsigned ones, `Float` for
/// floats. The value is narrowed with an `as` cast. Other classes are
/// refused and return `false`.
pub trait Scalar: Reflect {
    fn scalar_kind(&self) -> ScalarKind;

    fn get(&self) -> Primitive<'_>;

    fn set(&mut self, value: Primitive<'_>) -> bool;
}
