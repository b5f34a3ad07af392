//! The recursive converter.
//!
//! Every visited pair goes through these steps, in order:
//!
//! 1. transforms, once per visited source value;
//! 2. the fast path, when no transforms are configured;
//! 3. the hook bridge, when either side has text hooks;
//! 4. pointer destinations: cleared by a nil source, else allocated and
//!    entered;
//! 5. nil sources: the destination receives a null;
//! 6. union destinations: an empty one is materialized from the source
//!    shape, a populated one goes through the codec;
//! 7. dispatch on the source shape.

use morph_reflect::info::{ReflectKind, ScalarKind, TypeInfo};
use morph_reflect::ops::{List, Map, ReflectMut, ReflectRef, Scalar, key_str};
use morph_reflect::{Reflect, Value};

use crate::coerce::{assign_null, assign_scalar, dequote, is_empty, is_nil, unwrap_union};
use crate::error::{Failure, Skipped, Step};
use crate::fields::Field;
use crate::options::Transformed;
use crate::{ConvertError, FieldCache, Options, Result, bridge, codec, fast_path, stack};

/// Converts values with a given cache and options.
///
/// ```
/// use morph_convert::{Converter, FieldCache, Options};
/// use morph_reflect::{Reflect, Value};
///
/// #[derive(Reflect, Default)]
/// struct Flags {
///     pub verbose: bool,
///     pub level: f64,
/// }
///
/// let src: Value = [("VERBOSE", "True"), ("level", "2.5")].into_iter().collect();
/// let cache = FieldCache::new();
/// let converter = Converter::new(&cache, Options::new().string_to_float64(true));
///
/// let mut flags = Flags::default();
/// converter.convert(&src, &mut flags).unwrap();
/// assert!(flags.verbose);
/// assert_eq!(flags.level, 2.5);
/// ```
pub struct Converter<'a> {
    cache: &'a FieldCache,
    options: Options,
}

impl<'a> Converter<'a> {
    #[inline]
    pub fn new(cache: &'a FieldCache, options: Options) -> Self {
        Self { cache, options }
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[inline]
    pub fn cache(&self) -> &'a FieldCache {
        self.cache
    }

    /// Converts `src` into `dst`.
    ///
    /// A nil source (an absent pointer or a null union) leaves `dst`
    /// untouched. Fields and entries written before an error keep their
    /// new values.
    pub fn convert(&self, src: &dyn Reflect, dst: &mut dyn Reflect) -> Result<()> {
        self.options.validate()?;
        if is_nil(src) {
            return Ok(());
        }
        self.convert_value(src, dst, 0).map_err(Failure::into_error)
    }

    /// Entry point for each visited source value.
    fn convert_value(&self, src: &dyn Reflect, dst: &mut dyn Reflect, depth: usize) -> Step {
        let src = unwrap_union(src);
        let mut replaced: Option<Value> = None;
        for transform in &self.options.transforms {
            let current = match &replaced {
                Some(value) => unwrap_union(value),
                None => src,
            };
            match transform(current) {
                Transformed::Unchanged => {}
                Transformed::Replace(value) => replaced = Some(value),
                Transformed::Absent => return Ok(()),
            }
        }
        match &replaced {
            Some(value) => self.convert_node(value, dst, depth),
            None => self.convert_node(src, dst, depth),
        }
    }

    fn convert_node(&self, src: &dyn Reflect, dst: &mut dyn Reflect, depth: usize) -> Step {
        stack::guarded(|| self.dispatch(src, dst, depth))
    }

    fn dispatch(&self, src: &dyn Reflect, dst: &mut dyn Reflect, depth: usize) -> Step {
        let max_depth = self.options.max_depth;
        if depth > max_depth {
            log::debug!(
                "giving up on `{}` after {max_depth} levels",
                src.reflect_type_info().type_path()
            );
            return Err(Failure::Abort(ConvertError::CycleSuspected { max_depth }));
        }

        if self.options.transforms.is_empty() && fast_path::try_convert(src, dst) {
            return Ok(());
        }
        if bridge::participates(src, dst) {
            return bridge::convert(src, dst, self.cache);
        }

        if let ReflectMut::Pointer(pointer) = dst.reflect_mut() {
            if is_nil(src) {
                pointer.set_none();
                return Ok(());
            }
            return self.convert_node(src, pointer.get_or_alloc(), depth + 1);
        }
        if is_nil(src) {
            assign_null(dst);
            return Ok(());
        }
        if dst.reflect_kind() == ReflectKind::Array {
            return Err(unsupported_shape(dst, ReflectKind::Array));
        }
        if let ReflectMut::Union(slot) = dst.reflect_mut() {
            return self.convert_into_union(src, slot, depth);
        }

        match src.reflect_ref() {
            ReflectRef::Struct(_) => match dst.reflect_mut() {
                ReflectMut::Map(map) => self.record_into_map(src, map, depth),
                ReflectMut::Struct(_) => self.record_into_record(src, dst, depth),
                _ => Ok(()),
            },
            ReflectRef::Map(map) => match dst.reflect_mut() {
                ReflectMut::Map(out) => self.map_into_map(map, out, depth),
                ReflectMut::Struct(_) => self.map_into_record(map, dst, depth),
                _ => Ok(()),
            },
            ReflectRef::List(list) => match dst.reflect_mut() {
                ReflectMut::List(out) => self.list_into_list(list, out, depth),
                _ => Ok(()),
            },
            ReflectRef::Scalar(scalar) => {
                if let ReflectMut::Scalar(out) = dst.reflect_mut() {
                    assign_scalar(scalar, out, &self.options);
                }
                Ok(())
            }
            ReflectRef::Pointer(pointer) => match pointer.pointee() {
                Some(pointee) => self.convert_node(pointee, dst, depth + 1),
                None => Ok(()),
            },
            ReflectRef::Union(union) => match union.inner() {
                Some(inner) => self.convert_node(inner, dst, depth + 1),
                None => Ok(()),
            },
            // Handles stay as they are.
            ReflectRef::Opaque(_) => Ok(()),
            ReflectRef::Array(_) => Err(unsupported_shape(src, ReflectKind::Array)),
        }
    }

    // -------------------------------------------------------------------------
    // Unions

    fn convert_into_union(&self, src: &dyn Reflect, slot: &mut Value, depth: usize) -> Step {
        if !slot.is_null() {
            log::debug!(
                "`{}` into a populated union goes through the codec",
                src.reflect_type_info().type_path()
            );
            return codec::round_trip(src, slot, self.cache).map_err(Failure::Abort);
        }

        let mut src = src;
        while let ReflectRef::Pointer(pointer) = src.reflect_ref() {
            match pointer.pointee() {
                Some(pointee) => src = pointee,
                None => return Ok(()),
            }
        }

        let (value, step) = match src.reflect_ref() {
            ReflectRef::Struct(_) | ReflectRef::Map(_) => {
                let mut map = morph_reflect::Map::new();
                let step = self.convert_node(src, &mut map, depth + 1);
                (Value::Map(map), step)
            }
            ReflectRef::List(_) => {
                let mut list = Vec::<Value>::new();
                let step = self.convert_node(src, &mut list, depth + 1);
                (Value::List(list), step)
            }
            ReflectRef::Union(union) => {
                return match union.inner() {
                    Some(inner) => self.convert_node(inner, slot, depth + 1),
                    None => Ok(()),
                };
            }
            ReflectRef::Scalar(scalar) => self.materialize_scalar(src, scalar, depth),
            // A decode-only type has no visible data and reads as an empty map.
            ReflectRef::Opaque(_) if !is_handle(src) => (Value::Map(morph_reflect::Map::new()), Ok(())),
            ReflectRef::Opaque(_) => return Ok(()),
            ReflectRef::Array(_) => return Err(unsupported_shape(src, ReflectKind::Array)),
            ReflectRef::Pointer(_) => return Ok(()),
        };
        if !matches!(step, Err(Failure::Abort(_))) {
            *slot = value;
        }
        step
    }

    /// Numbers become `f64`, string kinds `String`.
    fn materialize_scalar(&self, src: &dyn Reflect, scalar: &dyn Scalar, depth: usize) -> (Value, Step) {
        match scalar.scalar_kind() {
            ScalarKind::Bool => {
                let mut flag = false;
                let step = self.convert_node(src, &mut flag, depth + 1);
                (Value::Bool(flag), step)
            }
            ScalarKind::String => {
                let mut text = String::new();
                let step = self.convert_node(src, &mut text, depth + 1);
                (Value::String(text), step)
            }
            _ => {
                let mut number = 0.0_f64;
                let step = self.convert_node(src, &mut number, depth + 1);
                (Value::F64(number), step)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Records

    fn record_into_map(&self, src: &dyn Reflect, out: &mut dyn Map, depth: usize) -> Step {
        let fields = self.cache.fields(src.reflect_type_info());
        let mut skipped = Skipped::default();
        for field in fields.iter() {
            let Some(value) = field.read(src) else {
                continue;
            };
            if field.omit_empty() && is_empty(value) {
                continue;
            }
            let dequoted = if field.quoted() { dequote(value) } else { None };
            let value = unwrap_union(dequoted.as_ref().map_or(value, |value| value as &dyn Reflect));
            skipped.absorb(self.insert_entry(out, field.name(), value, depth, false))?;
        }
        skipped.finish()
    }

    fn record_into_record(&self, src: &dyn Reflect, dst: &mut dyn Reflect, depth: usize) -> Step {
        let fields = self.cache.fields(src.reflect_type_info());
        let out_fields = self.cache.fields(dst.reflect_type_info());
        let mut skipped = Skipped::default();
        for field in fields.iter() {
            let Some(value) = field.read(src) else {
                continue;
            };
            if field.omit_empty() && is_empty(value) {
                continue;
            }
            let dequoted = if field.quoted() { dequote(value) } else { None };
            let value = unwrap_union(dequoted.as_ref().map_or(value, |value| value as &dyn Reflect));
            if is_nil_pointer(value) {
                continue;
            }
            for out_field in matching(&out_fields, field.name_lower()) {
                if let Some(slot) = out_field.resolve_mut(dst) {
                    skipped.absorb(self.convert_value(value, slot, depth + 1))?;
                }
            }
        }
        skipped.finish()
    }

    // -------------------------------------------------------------------------
    // Maps

    fn map_into_map(&self, src: &dyn Map, out: &mut dyn Map, depth: usize) -> Step {
        let mut skipped = Skipped::default();
        for (key, value) in src.iter() {
            let Some(key) = key_str(key) else {
                skipped.record(unsupported_key(key));
                continue;
            };
            skipped.absorb(self.insert_entry(out, key, unwrap_union(value), depth, true))?;
        }
        skipped.finish()
    }

    fn map_into_record(&self, src: &dyn Map, dst: &mut dyn Reflect, depth: usize) -> Step {
        let out_fields = self.cache.fields(dst.reflect_type_info());
        let mut skipped = Skipped::default();
        for (key, value) in src.iter() {
            let Some(key) = key_str(key) else {
                skipped.record(unsupported_key(key));
                continue;
            };
            let key = key.to_ascii_lowercase();
            let value = unwrap_union(value);
            for out_field in matching(&out_fields, &key) {
                let dequoted = if out_field.quoted() { dequote(value) } else { None };
                let value = dequoted.as_ref().map_or(value, |value| value as &dyn Reflect);
                if is_nil_pointer(value) {
                    continue;
                }
                if let Some(slot) = out_field.resolve_mut(dst) {
                    skipped.absorb(self.convert_value(value, slot, depth + 1))?;
                }
            }
        }
        skipped.finish()
    }

    /// Converts `value` into a fresh map value and inserts it under `key`.
    ///
    /// With `through_f64`, numbers of other kinds are first converted into
    /// an `f64` holder and cast from there. Nothing is inserted when the
    /// conversion aborts.
    fn insert_entry(
        &self,
        out: &mut dyn Map,
        key: &str,
        value: &dyn Reflect,
        depth: usize,
        through_f64: bool,
    ) -> Step {
        let mut step = Ok(());
        let inserted = out.insert_with(key, &mut |slot: &mut dyn Reflect| {
            step = if through_f64 && takes_f64_holder(slot) {
                self.convert_through_f64(value, slot, depth + 1)
            } else {
                self.convert_value(value, slot, depth + 1)
            };
            !matches!(step, Err(Failure::Abort(_)))
        });
        match inserted {
            Ok(_) => step,
            Err(err) => Err(Failure::Skip(ConvertError::UnsupportedMapKey {
                type_path: err.key_type,
            })),
        }
    }

    fn convert_through_f64(&self, src: &dyn Reflect, slot: &mut dyn Reflect, depth: usize) -> Step {
        let mut number = 0.0_f64;
        let step = self.convert_value(src, &mut number, depth);
        if let (ReflectRef::Scalar(holder), ReflectMut::Scalar(out)) = (number.reflect_ref(), slot.reflect_mut()) {
            assign_scalar(holder, out, &self.options);
        }
        step
    }

    // -------------------------------------------------------------------------
    // Lists

    fn list_into_list(&self, src: &dyn List, out: &mut dyn List, depth: usize) -> Step {
        let len = src.len();
        if out.len() != len {
            out.reset(len);
        }
        let mut skipped = Skipped::default();
        for index in 0..len {
            let (Some(item), Some(slot)) = (src.get(index), out.get_mut(index)) else {
                break;
            };
            skipped.absorb(self.convert_value(item, slot, depth + 1))?;
        }
        skipped.finish()
    }
}

fn matching<'f>(fields: &'f [Field], name_lower: &'f str) -> impl Iterator<Item = &'f Field> {
    fields
        .iter()
        .filter(move |field| field.name_lower() == name_lower)
}

/// Integer and `f32` kinds, which map values reach through an `f64`.
fn takes_f64_holder(slot: &dyn Reflect) -> bool {
    match slot.reflect_ref() {
        ReflectRef::Scalar(scalar) => {
            let kind = scalar.scalar_kind();
            kind.int_range().is_some() || kind == ScalarKind::F32
        }
        _ => false,
    }
}

fn is_handle(value: &dyn Reflect) -> bool {
    match value.reflect_type_info() {
        TypeInfo::Opaque(info) => info.is_handle(),
        _ => false,
    }
}

fn is_nil_pointer(value: &dyn Reflect) -> bool {
    match value.reflect_ref() {
        ReflectRef::Pointer(pointer) => pointer.is_none(),
        _ => false,
    }
}

fn unsupported_shape(value: &dyn Reflect, kind: ReflectKind) -> Failure {
    Failure::Abort(ConvertError::UnsupportedShape {
        type_path: value.reflect_type_info().type_path(),
        kind,
    })
}

fn unsupported_key(key: &dyn Reflect) -> ConvertError {
    ConvertError::UnsupportedMapKey {
        type_path: key.reflect_type_info().type_path(),
    }
}
