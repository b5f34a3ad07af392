use core::any::Any;

use crate::info::{ScalarKind, Type, TypeInfo, Typed, impl_type_fn};

/// Type information of a keyed container.
#[derive(Debug)]
pub struct MapInfo {
    ty: Type,
    key_info: fn() -> &'static TypeInfo,
    value_info: fn() -> &'static TypeInfo,
}

impl MapInfo {
    impl_type_fn!();

    #[inline]
    pub fn new<TMap: Any, TKey: Typed, TValue: Typed>() -> Self {
        Self {
            ty: Type::of::<TMap>(),
            key_info: TKey::type_info,
            value_info: TValue::type_info,
        }
    }

    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    /// Returns `true` if keys are strings (or newtypes of strings).
    pub fn has_string_keys(&self) -> bool {
        matches!(self.key_info(), TypeInfo::Scalar(info) if info.kind() == ScalarKind::String)
    }
}
