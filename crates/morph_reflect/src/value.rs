use core::fmt;
use std::sync::Arc;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{TypeInfo, Typed, UnionInfo};
use crate::ops::{ReflectMut, ReflectRef};

/// The insertion-ordered string-keyed map held by [`Value::Map`].
///
/// Equality ignores order.
pub type Map = indexmap::IndexMap<String, Value>;

/// The open union: a slot that can hold any supported shape.
///
/// Conversion into an empty `Value` picks the variant from the source:
/// records and maps become [`Value::Map`], sequences [`Value::List`],
/// numbers [`Value::F64`], strings [`Value::String`] and booleans
/// [`Value::Bool`]. The integer variants and [`Value::Dyn`] only appear
/// in values built by hand, e.g. as conversion sources or transform
/// results.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
    /// Any other reflected value.
    Dyn(Arc<dyn Reflect>),
}

impl Value {
    /// Wraps an arbitrary reflected value.
    pub fn dynamic<T: Reflect>(value: T) -> Self {
        Self::Dyn(Arc::new(value))
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the held value, or `None` for [`Value::Null`].
    pub fn inner(&self) -> Option<&dyn Reflect> {
        let inner: &dyn Reflect = match self {
            Self::Null => return None,
            Self::Bool(value) => value,
            Self::I64(value) => value,
            Self::U64(value) => value,
            Self::F64(value) => value,
            Self::String(value) => value,
            Self::List(value) => value,
            Self::Map(value) => value,
            Self::Dyn(value) => &**value,
        };
        Some(inner)
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(value) => Some(value),
            _ => None,
        }
    }

    /// Looks up a key of a [`Value::Map`].
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key)
    }
}

// -----------------------------------------------------------------------------
// Reflect

impl Typed for Value {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Union(UnionInfo::new::<Value>()))
    }
}

impl Reflect for Value {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Union(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Union(self)
    }
}

// -----------------------------------------------------------------------------
// Traits

impl PartialEq for Value {
    /// [`Value::Dyn`] values are equal only when they share the allocation.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Dyn(a), Self::Dyn(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(value) => fmt::Debug::fmt(value, f),
            Self::I64(value) => write!(f, "{value}i64"),
            Self::U64(value) => write!(f, "{value}u64"),
            Self::F64(value) => write!(f, "{value:?}f64"),
            Self::String(value) => fmt::Debug::fmt(value, f),
            Self::List(value) => f.debug_list().entries(value).finish(),
            Self::Map(value) => f.debug_map().entries(value).finish(),
            Self::Dyn(value) => fmt::Debug::fmt(&**value, f),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident($wide:ty)),* $(,)?) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::$variant(value as $wide)
            }
        }
    )*};
}

impl_from! {
    i8 => I64(i64),
    i16 => I64(i64),
    i32 => I64(i64),
    i64 => I64(i64),
    isize => I64(i64),
    u8 => U64(u64),
    u16 => U64(u64),
    u32 => U64(u64),
    u64 => U64(u64),
    usize => U64(u64),
    f32 => F64(f64),
    f64 => F64(f64),
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Map> for Value {
    #[inline]
    fn from(value: Map) -> Self {
        Self::Map(value)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    /// Collects entries into a [`Value::Map`].
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
