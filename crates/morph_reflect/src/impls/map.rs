use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{MapInfo, TypeInfo, Typed};
use crate::ops::{Map, MapIter, MapKeyError, ReflectMut, ReflectRef, key_from_str};

macro_rules! impl_reflect_map {
    ($ty:ident < K, V $(, $s:ident)? >, $($key_bound:path),+) => {
        impl<K, V $(, $s)?> Typed for $ty<K, V $(, $s)?>
        where
            K: Reflect + Typed + Default $(+ $key_bound)+,
            V: Reflect + Typed + Default,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
            }
        }

        impl<K, V $(, $s)?> Reflect for $ty<K, V $(, $s)?>
        where
            K: Reflect + Typed + Default $(+ $key_bound)+,
            V: Reflect + Typed + Default,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            #[inline]
            fn reflect_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Map(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Map(self)
            }
        }

        impl<K, V $(, $s)?> Map for $ty<K, V $(, $s)?>
        where
            K: Reflect + Typed + Default $(+ $key_bound)+,
            V: Reflect + Typed + Default,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            #[inline]
            fn len(&self) -> usize {
                $ty::len(self)
            }

            fn iter(&self) -> MapIter<'_> {
                Box::new(
                    $ty::iter(self).map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
                )
            }

            #[inline]
            fn clear(&mut self) {
                $ty::clear(self);
            }

            fn insert_with(
                &mut self,
                key: &str,
                fill: &mut dyn FnMut(&mut dyn Reflect) -> bool,
            ) -> Result<bool, MapKeyError> {
                let key = key_from_str::<K>(key).ok_or_else(|| MapKeyError {
                    key_type: core::any::type_name::<K>(),
                })?;
                let mut value = V::default();
                if !fill(&mut value) {
                    return Ok(false);
                }
                $ty::insert(self, key, value);
                Ok(true)
            }
        }
    };
}

impl_reflect_map!(HashMap<K, V, S>, Eq, Hash);
impl_reflect_map!(IndexMap<K, V, S>, Eq, Hash);
impl_reflect_map!(BTreeMap<K, V>, Ord);
