use core::any::Any;

use crate::hooks::TextHooks;
use crate::info::{NamedField, Type, impl_type_fn};

/// Type information of a record.
///
/// Field indices match [`Struct::field_at`](crate::ops::Struct::field_at).
#[derive(Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    hooks: TextHooks,
}

impl StructInfo {
    impl_type_fn!();

    /// Creates the info of `T` with the given visible fields, in
    /// declaration order.
    pub fn new<T: Any>(fields: &[NamedField]) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            hooks: TextHooks::empty(),
        }
    }

    /// Marks the custom text hooks the type implements.
    #[inline]
    pub fn with_text_hooks(mut self, hooks: TextHooks) -> Self {
        self.hooks = hooks;
        self
    }

    #[inline]
    pub const fn text_hooks(&self) -> TextHooks {
        self.hooks
    }

    /// Returns the field with the given declared name.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Returns the index of the field with the given declared name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, NamedField> {
        self.fields.iter()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
