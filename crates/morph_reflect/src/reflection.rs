use core::any::Any;
use core::fmt;

use crate::hooks::{TextDecodable, TextEncodable};
use crate::info::{ReflectKind, TypeInfo};
use crate::ops::{ReflectMut, ReflectRef};

/// The core trait of runtime reflection.
///
/// A `Reflect` value exposes its static [`TypeInfo`] and a view of itself
/// through the access trait of its kind, see [`ReflectRef`] and
/// [`ReflectMut`]. Converters walk values through these views only, so a
/// type never has to know who reads or writes it.
///
/// # Implementation
///
/// Use `#[derive(Reflect)]` for records and scalar newtypes. The crate
/// covers primitives, `String`, `Vec<T>`, arrays, the common maps and
/// pointers, function pointers, channels and [`Timestamp`](crate::Timestamp).
///
/// ```
/// use morph_reflect::{Reflect, Typed};
/// use morph_reflect::info::ReflectKind;
///
/// #[derive(Reflect, Default)]
/// struct Point {
///     pub x: f64,
///     pub y: f64,
/// }
///
/// let point = Point::default();
/// assert_eq!(point.reflect_kind(), ReflectKind::Struct);
/// assert_eq!(Point::type_info().as_struct().unwrap().field_len(), 2);
/// ```
///
/// # Text hooks
///
/// [`as_text_encodable`](Reflect::as_text_encodable) and
/// [`as_text_decodable`](Reflect::as_text_decodable) return `Some` for
/// types whose [`TextHooks`](crate::hooks::TextHooks) say so.
pub trait Reflect: Any + Send + Sync {
    /// Returns the [`TypeInfo`] of the underlying type.
    fn reflect_type_info(&self) -> &'static TypeInfo;

    /// Returns a shared view through the trait of the value's kind.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable view through the trait of the value's kind.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Returns the [`ReflectKind`] of the underlying type.
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        self.reflect_type_info().kind()
    }

    #[inline]
    fn as_text_encodable(&self) -> Option<&dyn TextEncodable> {
        None
    }

    #[inline]
    fn as_text_decodable(&mut self) -> Option<&mut dyn TextDecodable> {
        None
    }

    /// Resets an opaque value to its zero state.
    ///
    /// Composite kinds are zeroed through their access traits instead;
    /// handles keep their value.
    #[inline]
    fn reset_opaque(&mut self) {}
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    /// Downcasts to a concrete type.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    /// Downcasts to a concrete type, mutably.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_info().type_path())
    }
}
