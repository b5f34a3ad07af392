use core::{error, fmt};

use crate::Reflect;
use crate::info::ScalarKind;
use crate::ops::{Primitive, ReflectMut, ReflectRef};

/// Iterator over the entries of a [`Map`].
pub type MapIter<'a> = Box<dyn Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)> + 'a>;

/// A keyed container.
///
/// Entries are written through [`insert_with`](Map::insert_with), which
/// builds the key from a string. Maps whose key type is not string-like
/// refuse every insertion.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the entries, in the container's own order.
    fn iter(&self) -> MapIter<'_>;

    fn clear(&mut self);

    /// Inserts a fresh zero value under `key` after `fill` has written it.
    ///
    /// Nothing is inserted when `fill` returns `false`. Returns whether
    /// the entry was inserted.
    fn insert_with(
        &mut self,
        key: &str,
        fill: &mut dyn FnMut(&mut dyn Reflect) -> bool,
    ) -> Result<bool, MapKeyError>;
}

/// Reads a map key as a string, if its type is string-like.
pub fn key_str(key: &dyn Reflect) -> Option<&str> {
    match key.reflect_ref() {
        ReflectRef::Scalar(scalar) => match scalar.get() {
            Primitive::Str(text) => Some(text),
            _ => None,
        },
        _ => None,
    }
}

/// Builds a key of type `K` from a string, if `K` is string-like.
pub fn key_from_str<K: Reflect + Default>(key: &str) -> Option<K> {
    let mut out = K::default();
    let written = match out.reflect_mut() {
        ReflectMut::Scalar(scalar) if scalar.scalar_kind() == ScalarKind::String => {
            scalar.set(Primitive::Str(key))
        }
        _ => false,
    };
    written.then_some(out)
}

/// A map whose key type cannot be built from a string.
#[derive(Debug, Clone, Copy)]
pub struct MapKeyError {
    pub key_type: &'static str,
}

impl fmt::Display for MapKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map key type `{}` is not string-like", self.key_type)
    }
}

impl error::Error for MapKeyError {}
