use core::any::TypeId;

use crate::info::{TypeInfo, Typed};

bitflags::bitflags! {
    /// Conversion options of a single field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        /// Leave the field out when its value is empty.
        const OMIT_EMPTY = 1 << 0;
        /// The scalar value travels inside a quoted string.
        const QUOTED = 1 << 1;
        /// The field is an embedded member; its own fields are promoted.
        const EMBEDDED = 1 << 2;
    }
}

/// A visible field of a record.
///
/// Created by `#[derive(Reflect)]`. Private and skipped fields never get one.
#[derive(Clone, Debug)]
pub struct NamedField {
    name: &'static str,
    rename: Option<&'static str>,
    flags: FieldFlags,
    type_id: TypeId,
    // `TypeInfo` is created on first use, which also allows recursive types.
    type_info: fn() -> &'static TypeInfo,
}

impl NamedField {
    /// Creates a field named `name` of type `T`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            rename: None,
            flags: FieldFlags::empty(),
            type_id: TypeId::of::<T>(),
            type_info: T::type_info,
        }
    }

    /// Sets the serialization name override.
    #[inline]
    pub const fn with_rename(mut self, rename: &'static str) -> Self {
        self.rename = Some(rename);
        self
    }

    /// Sets the field flags.
    #[inline]
    pub const fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The declared field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The explicit serialization name, if any.
    #[inline]
    pub const fn rename(&self) -> Option<&'static str> {
        self.rename
    }

    /// The serialization name: the rename if present, else the declared name.
    #[inline]
    pub const fn serial_name(&self) -> &'static str {
        match self.rename {
            Some(rename) => rename,
            None => self.name,
        }
    }

    #[inline]
    pub const fn flags(&self) -> FieldFlags {
        self.flags
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The [`TypeInfo`] of the field type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}
