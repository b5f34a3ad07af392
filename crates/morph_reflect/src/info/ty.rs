use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

/// The identity of a reflected type: its [`TypeId`] and type path.
///
/// Equality and hashing only look at the `TypeId`.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    /// Creates the `Type` of `T`.
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    /// Returns the `TypeId`.
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path, e.g. `alloc::vec::Vec<i32>`.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns `true` if this is the type `T`.
    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path)
    }
}

/// Implements the shared `Type` accessors for an info struct with a `ty` field.
macro_rules! impl_type_fn {
    () => {
        /// Returns the underlying [`Type`](crate::info::Type).
        #[inline]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.ty
        }

        /// Returns the `TypeId`.
        #[inline]
        pub const fn type_id(&self) -> ::core::any::TypeId {
            self.ty.id()
        }

        /// Returns the type path.
        #[inline]
        pub const fn type_path(&self) -> &'static str {
            self.ty.path()
        }

        /// Returns `true` if the described type is `T`.
        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.ty.is::<T>()
        }
    };
}

pub(crate) use impl_type_fn;

#[cfg(test)]
mod tests {
    use super::Type;

    #[test]
    fn equality_ignores_path() {
        assert_eq!(Type::of::<u8>(), Type::of::<u8>());
        assert_ne!(Type::of::<u8>(), Type::of::<i8>());
        assert!(Type::of::<String>().is::<String>());
        assert!(Type::of::<Vec<u8>>().path().ends_with("Vec<u8>"));
    }
}
