use crate::Reflect;

/// A record with named fields.
///
/// Indices follow the order of
/// [`StructInfo`](crate::info::StructInfo)'s fields. Only visible fields
/// are reachable.
pub trait Struct: Reflect {
    /// Returns the field at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index`, mutably.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the number of reflected fields.
    fn field_len(&self) -> usize;
}
