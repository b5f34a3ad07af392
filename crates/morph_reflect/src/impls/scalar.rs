use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ScalarInfo, ScalarKind, ScalarTyped, TypeInfo, Typed};
use crate::ops::{Primitive, ReflectMut, ReflectRef, Scalar};

macro_rules! impl_reflect_scalar {
    ($ty:ty, $kind:ident) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<$ty>(ScalarKind::$kind)))
            }
        }

        impl ScalarTyped for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;
        }

        impl Reflect for $ty {
            #[inline]
            fn reflect_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Scalar(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Scalar(self)
            }
        }
    };
}

macro_rules! impl_numeric_scalar {
    ($($ty:ty => $kind:ident as $class:ident($wide:ty)),* $(,)?) => {$(
        impl_reflect_scalar!($ty, $kind);

        impl Scalar for $ty {
            #[inline]
            fn scalar_kind(&self) -> ScalarKind {
                ScalarKind::$kind
            }

            #[inline]
            fn get(&self) -> Primitive<'_> {
                Primitive::$class(*self as $wide)
            }

            #[inline]
            fn set(&mut self, value: Primitive<'_>) -> bool {
                match value {
                    Primitive::$class(value) => {
                        *self = value as $ty;
                        true
                    }
                    _ => false,
                }
            }
        }
    )*};
}

impl_numeric_scalar! {
    i8 => I8 as Int(i64),
    i16 => I16 as Int(i64),
    i32 => I32 as Int(i64),
    i64 => I64 as Int(i64),
    isize => Isize as Int(i64),
    u8 => U8 as Uint(u64),
    u16 => U16 as Uint(u64),
    u32 => U32 as Uint(u64),
    u64 => U64 as Uint(u64),
    usize => Usize as Uint(u64),
    f32 => F32 as Float(f64),
    f64 => F64 as Float(f64),
}

impl_reflect_scalar!(bool, Bool);

impl Scalar for bool {
    #[inline]
    fn scalar_kind(&self) -> ScalarKind {
        ScalarKind::Bool
    }

    #[inline]
    fn get(&self) -> Primitive<'_> {
        Primitive::Bool(*self)
    }

    #[inline]
    fn set(&mut self, value: Primitive<'_>) -> bool {
        match value {
            Primitive::Bool(value) => {
                *self = value;
                true
            }
            _ => false,
        }
    }
}

impl_reflect_scalar!(String, String);

impl Scalar for String {
    #[inline]
    fn scalar_kind(&self) -> ScalarKind {
        ScalarKind::String
    }

    #[inline]
    fn get(&self) -> Primitive<'_> {
        Primitive::Str(self)
    }

    fn set(&mut self, value: Primitive<'_>) -> bool {
        match value {
            Primitive::Str(value) => {
                self.clear();
                self.push_str(value);
                true
            }
            _ => false,
        }
    }
}
