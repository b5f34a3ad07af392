//! Non-data handles: function pointers and channel senders.
//!
//! Handles are opaque. Conversion never reads or writes them, and they
//! are left exactly as they were on both sides.

use std::sync::mpsc::{Sender, SyncSender};

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, Typed};
use crate::ops::{ReflectMut, ReflectRef};

macro_rules! impl_reflect_handle {
    ([$($param:ident),*] $ty:ty) => {
        impl<$($param: Send + 'static),*> Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl<$($param: Send + 'static),*> Reflect for $ty {
            #[inline]
            fn reflect_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Opaque(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Opaque(self)
            }
        }
    };
}

impl_reflect_handle!([R] fn() -> R);
impl_reflect_handle!([A, R] fn(A) -> R);
impl_reflect_handle!([A, B, R] fn(A, B) -> R);
impl_reflect_handle!([A, B, C, R] fn(A, B, C) -> R);
impl_reflect_handle!([T] Sender<T>);
impl_reflect_handle!([T] SyncSender<T>);

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::ReflectKind;

    fn answer() -> i32 {
        42
    }

    #[test]
    fn function_pointers_are_handles() {
        let handle: fn() -> i32 = answer;
        assert_eq!(handle.reflect_kind(), ReflectKind::Opaque);
        assert!(handle.reflect_type_info().as_opaque().unwrap().is_handle());
    }
}
