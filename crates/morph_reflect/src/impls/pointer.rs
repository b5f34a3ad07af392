use std::sync::{Arc, OnceLock};

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{PointerInfo, TypeInfo, Typed};
use crate::ops::{Pointer, ReflectMut, ReflectRef};

macro_rules! impl_reflect_pointer {
    ($ty:ident, nullable = $nullable:literal, $($bound:path),*) => {
        impl<T: Reflect + Typed + Default $(+ $bound)*> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Pointer(PointerInfo::new::<Self, T>($nullable))
                })
            }
        }

        impl<T: Reflect + Typed + Default $(+ $bound)*> Reflect for $ty<T> {
            #[inline]
            fn reflect_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Pointer(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Pointer(self)
            }
        }
    };
}

impl_reflect_pointer!(Option, nullable = true,);
impl_reflect_pointer!(Box, nullable = false,);
impl_reflect_pointer!(Arc, nullable = false, Clone);
impl_reflect_pointer!(OnceLock, nullable = true,);

impl<T: Reflect + Typed + Default> Pointer for Option<T> {
    #[inline]
    fn pointee(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn get_or_alloc(&mut self) -> &mut dyn Reflect {
        self.get_or_insert_with(T::default)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }
}

impl<T: Reflect + Typed + Default> Pointer for Box<T> {
    #[inline]
    fn pointee(&self) -> Option<&dyn Reflect> {
        Some(&**self)
    }

    #[inline]
    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(&mut **self)
    }

    #[inline]
    fn get_or_alloc(&mut self) -> &mut dyn Reflect {
        &mut **self
    }

    #[inline]
    fn set_none(&mut self) {
        **self = T::default();
    }
}

// Writes go through `Arc::make_mut`, so shared pointees are cloned first.
impl<T: Reflect + Typed + Default + Clone> Pointer for Arc<T> {
    #[inline]
    fn pointee(&self) -> Option<&dyn Reflect> {
        Some(&**self)
    }

    #[inline]
    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(Arc::<T>::make_mut(self))
    }

    #[inline]
    fn get_or_alloc(&mut self) -> &mut dyn Reflect {
        Arc::<T>::make_mut(self)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = Arc::new(T::default());
    }
}

impl<T: Reflect + Typed + Default> Pointer for OnceLock<T> {
    #[inline]
    fn pointee(&self) -> Option<&dyn Reflect> {
        self.get().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.get_mut().map(|value| value as &mut dyn Reflect)
    }

    fn get_or_alloc(&mut self) -> &mut dyn Reflect {
        if self.get().is_none() {
            let _ = self.set(T::default());
        }
        match self.get_mut() {
            Some(value) => value,
            None => unreachable!("the cell was filled above"),
        }
    }

    #[inline]
    fn set_none(&mut self) {
        self.take();
    }
}
