use morph_reflect::Reflect;
use morph_reflect::info::{ReflectKind, ScalarKind, TypeInfo};
use morph_reflect::ops::{Primitive, ReflectRef, key_str};
use serde_json::{Map, Number, Value as Json};

use crate::coerce::{is_empty, widen_f32};
use crate::{ConvertError, DEFAULT_MAX_DEPTH, FieldCache, Result, stack};

/// Floats at or above this magnitude print in exponent form.
const EXPONENT_THRESHOLD: f64 = 1e21;

pub(super) struct Encoder<'a> {
    cache: &'a FieldCache,
}

impl<'a> Encoder<'a> {
    pub fn new(cache: &'a FieldCache) -> Self {
        Self { cache }
    }

    pub fn encode(&self, value: &dyn Reflect, depth: usize) -> Result<Json> {
        stack::guarded(|| self.encode_value(value, depth))
    }

    fn encode_value(&self, value: &dyn Reflect, depth: usize) -> Result<Json> {
        if depth > DEFAULT_MAX_DEPTH {
            return Err(ConvertError::CycleSuspected {
                max_depth: DEFAULT_MAX_DEPTH,
            });
        }

        let info = value.reflect_type_info();
        if let Some(encodable) = value.as_text_encodable() {
            let text = encodable.encode_text().map_err(|source| ConvertError::Hook {
                type_path: info.type_path(),
                source,
            })?;
            return Ok(Json::String(text));
        }

        match value.reflect_ref() {
            ReflectRef::Scalar(scalar) => match scalar.get() {
                Primitive::Bool(flag) => Ok(Json::Bool(flag)),
                Primitive::Int(int) => Ok(Json::from(int)),
                Primitive::Uint(uint) => Ok(Json::from(uint)),
                Primitive::Float(float) if scalar.scalar_kind() == ScalarKind::F32 => {
                    encode_float(widen_f32(float))
                }
                Primitive::Float(float) => encode_float(float),
                Primitive::Str(text) => Ok(Json::String(text.to_owned())),
            },
            ReflectRef::Struct(_) => self.encode_record(value, info, depth),
            ReflectRef::List(list) => (0..list.len())
                .filter_map(|index| list.get(index))
                .map(|item| self.encode(item, depth + 1))
                .collect::<Result<Vec<_>>>()
                .map(Json::Array),
            ReflectRef::Map(map) => {
                let mut object = Map::new();
                for (key, item) in map.iter() {
                    let Some(key) = key_str(key) else {
                        return Err(ConvertError::UnsupportedMapKey {
                            type_path: key.reflect_type_info().type_path(),
                        });
                    };
                    object.insert(key.to_owned(), self.encode(item, depth + 1)?);
                }
                Ok(Json::Object(object))
            }
            ReflectRef::Pointer(pointer) => match pointer.pointee() {
                Some(pointee) => self.encode(pointee, depth + 1),
                None => Ok(Json::Null),
            },
            ReflectRef::Union(union) => match union.inner() {
                Some(inner) => self.encode(inner, depth + 1),
                None => Ok(Json::Null),
            },
            ReflectRef::Array(_) => Err(ConvertError::UnsupportedShape {
                type_path: info.type_path(),
                kind: ReflectKind::Array,
            }),
            ReflectRef::Opaque(_) => match info {
                // Decode-only types have no visible fields to write.
                TypeInfo::Opaque(opaque) if !opaque.is_handle() => Ok(Json::Object(Map::new())),
                _ => Err(ConvertError::UnsupportedValue(format!(
                    "`{}` has no data to encode",
                    info.type_path()
                ))),
            },
        }
    }

    fn encode_record(&self, record: &dyn Reflect, info: &'static TypeInfo, depth: usize) -> Result<Json> {
        let mut object = Map::new();
        for field in self.cache.fields(info).iter() {
            let Some(value) = field.read(record) else {
                continue;
            };
            if field.omit_empty() && is_empty(value) {
                continue;
            }
            let mut json = self.encode(value, depth + 1)?;
            if field.quoted() {
                json = quote(json)?;
            }
            object.insert(field.name().to_owned(), json);
        }
        Ok(Json::Object(object))
    }
}

fn encode_float(float: f64) -> Result<Json> {
    if !float.is_finite() {
        return Err(ConvertError::UnsupportedValue(format!("float {float}")));
    }
    if float.fract() == 0.0 && float.abs() < EXPONENT_THRESHOLD {
        if float >= i64::MIN as f64 && float < i64::MAX as f64 {
            return Ok(Json::from(float as i64));
        }
        if float >= 0.0 && float < u64::MAX as f64 {
            return Ok(Json::from(float as u64));
        }
    }
    Number::from_f64(float)
        .map(Json::Number)
        .ok_or_else(|| ConvertError::UnsupportedValue(format!("float {float}")))
}

/// Wraps the encoding of a `string` field in a string.
fn quote(json: Json) -> Result<Json> {
    let quoted = match json {
        Json::String(text) => Json::String(serde_json::to_string(&text)?),
        Json::Number(number) => Json::String(number.to_string()),
        Json::Bool(flag) => Json::String(flag.to_string()),
        other => other,
    };
    Ok(quoted)
}
