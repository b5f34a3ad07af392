use core::any::Any;

use crate::info::{Type, TypeInfo, Typed, impl_type_fn};

/// Type information of a growable sequence.
#[derive(Debug)]
pub struct ListInfo {
    ty: Type,
    item_info: fn() -> &'static TypeInfo,
}

impl ListInfo {
    impl_type_fn!();

    #[inline]
    pub fn new<TList: Any, TItem: Typed>() -> Self {
        Self {
            ty: Type::of::<TList>(),
            item_info: TItem::type_info,
        }
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }
}

/// Type information of a fixed-size sequence.
#[derive(Debug)]
pub struct ArrayInfo {
    ty: Type,
    item_info: fn() -> &'static TypeInfo,
    capacity: usize,
}

impl ArrayInfo {
    impl_type_fn!();

    #[inline]
    pub fn new<TArray: Any, TItem: Typed>(capacity: usize) -> Self {
        Self {
            ty: Type::of::<TArray>(),
            item_info: TItem::type_info,
            capacity,
        }
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
