use core::any::Any;

use crate::hooks::TextHooks;
use crate::info::{Type, impl_type_fn};

/// Type information of a value without visible structure.
///
/// Non-data handles (function pointers, channels) are opaque without
/// hooks. Opaque types with hooks, like the built-in timestamp, convert
/// through their text form.
#[derive(Debug)]
pub struct OpaqueInfo {
    ty: Type,
    hooks: TextHooks,
}

impl OpaqueInfo {
    impl_type_fn!();

    #[inline]
    pub fn new<T: Any>() -> Self {
        Self {
            ty: Type::of::<T>(),
            hooks: TextHooks::empty(),
        }
    }

    #[inline]
    pub fn with_text_hooks(mut self, hooks: TextHooks) -> Self {
        self.hooks = hooks;
        self
    }

    #[inline]
    pub const fn text_hooks(&self) -> TextHooks {
        self.hooks
    }

    /// Returns `true` for non-data handles.
    #[inline]
    pub const fn is_handle(&self) -> bool {
        self.hooks.is_empty()
    }
}

/// Type information of the open union.
#[derive(Debug)]
pub struct UnionInfo {
    ty: Type,
}

impl UnionInfo {
    impl_type_fn!();

    #[inline]
    pub fn new<T: Any>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
