use crate::Reflect;
use crate::Value;
use crate::info::ReflectKind;
use crate::ops::{Array, List, Map, Pointer, Scalar, Struct};

/// A shared view of a value through the trait of its kind.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Array(&'a dyn Array),
    Map(&'a dyn Map),
    Pointer(&'a dyn Pointer),
    Union(&'a Value),
    Scalar(&'a dyn Scalar),
    Opaque(&'a dyn Reflect),
}

/// A mutable view of a value through the trait of its kind.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Array(&'a mut dyn Array),
    Map(&'a mut dyn Map),
    Pointer(&'a mut dyn Pointer),
    Union(&'a mut Value),
    Scalar(&'a mut dyn Scalar),
    Opaque(&'a mut dyn Reflect),
}

macro_rules! impl_kind_fn {
    () => {
        /// Returns the [`ReflectKind`] of the view.
        pub fn kind(&self) -> ReflectKind {
            match self {
                Self::Struct(_) => ReflectKind::Struct,
                Self::List(_) => ReflectKind::List,
                Self::Array(_) => ReflectKind::Array,
                Self::Map(_) => ReflectKind::Map,
                Self::Pointer(_) => ReflectKind::Pointer,
                Self::Union(_) => ReflectKind::Union,
                Self::Scalar(_) => ReflectKind::Scalar,
                Self::Opaque(_) => ReflectKind::Opaque,
            }
        }
    };
}

impl ReflectRef<'_> {
    impl_kind_fn!();
}

impl ReflectMut<'_> {
    impl_kind_fn!();
}
