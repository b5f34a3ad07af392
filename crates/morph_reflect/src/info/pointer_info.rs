use core::any::Any;

use crate::info::{Type, TypeInfo, Typed, impl_type_fn};

/// Type information of an optional or owning pointer.
#[derive(Debug)]
pub struct PointerInfo {
    ty: Type,
    pointee_info: fn() -> &'static TypeInfo,
    nullable: bool,
}

impl PointerInfo {
    impl_type_fn!();

    #[inline]
    pub fn new<TPointer: Any, TPointee: Typed>(nullable: bool) -> Self {
        Self {
            ty: Type::of::<TPointer>(),
            pointee_info: TPointee::type_info,
            nullable,
        }
    }

    #[inline]
    pub fn pointee_info(&self) -> &'static TypeInfo {
        (self.pointee_info)()
    }

    /// Whether the pointer can be absent (`Option<T>`), as opposed to
    /// always owning a value (`Box<T>`).
    #[inline]
    pub const fn nullable(&self) -> bool {
        self.nullable
    }
}
