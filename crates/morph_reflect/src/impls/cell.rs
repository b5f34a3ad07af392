//! Static storage for [`TypeInfo`].
//!
//! [`Typed::type_info`](crate::info::Typed::type_info) returns a
//! `&'static TypeInfo` built on first call:
//!
//! - [`NonGenericTypeInfoCell`]: a `OnceLock`, for types without generics.
//! - [`GenericTypeInfoCell`]: a `static CELL` inside a generic function is
//!   shared by every instantiation, so the cell keeps one leaked entry per
//!   `TypeId` behind an `RwLock`.

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use morph_utils::TypeIdMap;

use crate::info::TypeInfo;

/// Storage for the [`TypeInfo`] of a non-generic type.
///
/// ```
/// use morph_reflect::impls::NonGenericTypeInfoCell;
/// use morph_reflect::info::{OpaqueInfo, TypeInfo};
///
/// struct Handle;
///
/// fn handle_info() -> &'static TypeInfo {
///     static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///     CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Handle>()))
/// }
///
/// assert!(core::ptr::eq(handle_info(), handle_info()));
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, building it with `f` on first call.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

/// Storage for the [`TypeInfo`] of every instantiation of a generic type.
///
/// ```
/// use morph_reflect::impls::GenericTypeInfoCell;
/// use morph_reflect::info::{OpaqueInfo, TypeInfo};
///
/// struct Wrapper<T>(T);
///
/// fn wrapper_info<T: 'static>() -> &'static TypeInfo {
///     static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///     CELL.get_or_insert::<Wrapper<T>>(|| TypeInfo::Opaque(OpaqueInfo::new::<Wrapper<T>>()))
/// }
///
/// assert!(wrapper_info::<u8>().type_path().ends_with("Wrapper<u8>"));
/// assert!(wrapper_info::<i8>().type_path().ends_with("Wrapper<i8>"));
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, building it with `f` on first call.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        let cached = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        match cached {
            Some(info) => info,
            // Built outside the lock: `f` may ask for other infos of this cell.
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeInfo) -> &'static TypeInfo {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
