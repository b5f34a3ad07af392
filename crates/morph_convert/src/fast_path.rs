//! Shortcuts for homogeneous string-keyed maps.
//!
//! A `HashMap` or `BTreeMap` from `String` to strings, floats or integers
//! converted into a [`Map`] or an empty [`Value`] is copied by direct
//! iteration. Numbers widen to [`Value::F64`], like on the general path.

use std::collections::{BTreeMap, HashMap};

use morph_reflect::{Map, Reflect, Value};

use crate::coerce::widen_f32;

/// Converts `src` into `dst` if the pair has a shortcut.
///
/// Returns `false`, touching nothing, when it has not.
pub(crate) fn try_convert(src: &dyn Reflect, dst: &mut dyn Reflect) -> bool {
    if !is_target(dst) {
        return false;
    }

    macro_rules! try_sources {
        ($($item:ty => $into:expr),* $(,)?) => {$(
            if let Some(map) = src.downcast_ref::<HashMap<String, $item>>() {
                extend(dst, map.iter().map(|(key, item)| (key, $into(item))));
                return true;
            }
            if let Some(map) = src.downcast_ref::<BTreeMap<String, $item>>() {
                extend(dst, map.iter().map(|(key, item)| (key, $into(item))));
                return true;
            }
        )*};
    }

    try_sources! {
        String => |item: &String| Value::String(item.clone()),
        f64 => |item: &f64| Value::F64(*item),
        f32 => |item: &f32| Value::F64(widen_f32(f64::from(*item))),
        i64 => |item: &i64| Value::F64(*item as f64),
        i32 => |item: &i32| Value::F64(f64::from(*item)),
        u64 => |item: &u64| Value::F64(*item as f64),
        u32 => |item: &u32| Value::F64(f64::from(*item)),
    }
    false
}

fn is_target(dst: &dyn Reflect) -> bool {
    match dst.downcast_ref::<Value>() {
        Some(value) => value.is_null(),
        None => dst.is::<Map>(),
    }
}

fn extend<'a>(dst: &mut dyn Reflect, entries: impl ExactSizeIterator<Item = (&'a String, Value)>) {
    let map = match dst.downcast_mut::<Value>() {
        Some(value) => {
            if value.is_null() {
                *value = Value::Map(Map::with_capacity(entries.len()));
            }
            match value {
                Value::Map(map) => map,
                _ => return,
            }
        }
        None => match dst.downcast_mut::<Map>() {
            Some(map) => map,
            None => return,
        },
    };
    log::trace!("fast path: {} entries", entries.len());
    for (key, value) in entries {
        map.insert(key.clone(), value);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use morph_reflect::{Map, Value};

    use super::try_convert;

    #[test]
    fn integers_widen_into_an_empty_union() {
        let src = HashMap::from([("a".to_owned(), 1_i32), ("b".to_owned(), 2)]);
        let mut dst = Value::Null;
        assert!(try_convert(&src, &mut dst));
        let expected: Value = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        assert_eq!(dst, expected);
    }

    #[test]
    fn existing_keys_are_kept() {
        let src = BTreeMap::from([("bar".to_owned(), "x".to_owned())]);
        let mut dst = Map::from([("existing".to_owned(), Value::from("foo"))]);
        assert!(try_convert(&src, &mut dst));
        assert_eq!(dst.len(), 2);
        assert_eq!(dst["bar"], Value::from("x"));
    }

    #[test]
    fn other_pairs_are_declined() {
        let src = HashMap::from([("a".to_owned(), true)]);
        let mut dst = Value::Null;
        assert!(!try_convert(&src, &mut dst));

        let src = HashMap::from([("a".to_owned(), 1_i32)]);
        let mut populated = Value::from(1);
        assert!(!try_convert(&src, &mut populated));
        let mut typed: HashMap<String, f64> = HashMap::new();
        assert!(!try_convert(&src, &mut typed));
    }
}
