use morph_reflect::hooks::TextHooks;
use morph_reflect::info::{ReflectKind, ScalarKind, TypeInfo};
use morph_reflect::ops::{List, Map, Primitive, ReflectMut, Scalar};
use morph_reflect::{Reflect, Value};
use serde_json::{Number, Value as Json};

use crate::coerce::assign_null;
use crate::{ConvertError, DEFAULT_MAX_DEPTH, Field, FieldCache, Result, stack};

pub(super) struct Decoder<'a> {
    cache: &'a FieldCache,
    /// The first type mismatch, reported once decoding is done.
    saved: Option<ConvertError>,
}

impl<'a> Decoder<'a> {
    pub fn new(cache: &'a FieldCache) -> Self {
        Self { cache, saved: None }
    }

    pub fn run(mut self, json: &Json, dst: &mut dyn Reflect) -> Result<()> {
        self.decode(json, dst, 0)?;
        match self.saved {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn save(&mut self, json: &Json, info: &'static TypeInfo) {
        if self.saved.is_none() {
            self.saved = Some(ConvertError::Decode {
                found: json_kind(json),
                type_path: info.type_path(),
            });
        }
    }

    fn decode(&mut self, json: &Json, dst: &mut dyn Reflect, depth: usize) -> Result<()> {
        stack::guarded(|| self.decode_value(json, dst, depth))
    }

    fn decode_value(&mut self, json: &Json, dst: &mut dyn Reflect, depth: usize) -> Result<()> {
        if depth > DEFAULT_MAX_DEPTH {
            return Err(ConvertError::CycleSuspected {
                max_depth: DEFAULT_MAX_DEPTH,
            });
        }

        let info = dst.reflect_type_info();
        if info.text_hooks().contains(TextHooks::DECODE) {
            return self.decode_text(json, dst, info);
        }
        if json.is_null() {
            assign_null(dst);
            return Ok(());
        }

        match dst.reflect_mut() {
            ReflectMut::Pointer(pointer) => self.decode(json, pointer.get_or_alloc(), depth + 1),
            ReflectMut::Union(slot) => {
                *slot = fresh(json);
                Ok(())
            }
            ReflectMut::Scalar(scalar) => {
                if !decode_scalar(json, scalar) {
                    self.save(json, info);
                }
                Ok(())
            }
            ReflectMut::List(list) => match json {
                Json::Array(items) => self.decode_list(items, list, depth),
                _ => {
                    self.save(json, info);
                    Ok(())
                }
            },
            ReflectMut::Map(map) => match json {
                Json::Object(entries) => self.decode_map(entries, map, depth),
                _ => {
                    self.save(json, info);
                    Ok(())
                }
            },
            ReflectMut::Struct(_) => match json {
                Json::Object(entries) => self.decode_record(entries, dst, depth),
                _ => {
                    self.save(json, info);
                    Ok(())
                }
            },
            ReflectMut::Array(_) => Err(ConvertError::UnsupportedShape {
                type_path: info.type_path(),
                kind: ReflectKind::Array,
            }),
            ReflectMut::Opaque(_) => {
                self.save(json, info);
                Ok(())
            }
        }
    }

    fn decode_text(&mut self, json: &Json, dst: &mut dyn Reflect, info: &'static TypeInfo) -> Result<()> {
        let type_path = info.type_path();
        match json {
            Json::Null => Ok(()),
            Json::String(text) => match dst.as_text_decodable() {
                Some(decodable) => decodable
                    .decode_text(text)
                    .map_err(|source| ConvertError::Hook { type_path, source }),
                None => {
                    self.save(json, info);
                    Ok(())
                }
            },
            _ => {
                self.save(json, info);
                Ok(())
            }
        }
    }

    fn decode_list(&mut self, items: &[Json], list: &mut dyn List, depth: usize) -> Result<()> {
        list.resize(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(slot) = list.get_mut(index) {
                self.decode(item, slot, depth + 1)?;
            }
        }
        Ok(())
    }

    fn decode_map(
        &mut self,
        entries: &serde_json::Map<String, Json>,
        map: &mut dyn Map,
        depth: usize,
    ) -> Result<()> {
        for (key, item) in entries {
            let mut result = Ok(());
            let inserted = map.insert_with(key, &mut |slot: &mut dyn Reflect| {
                result = self.decode(item, slot, depth + 1);
                result.is_ok()
            });
            if let Err(err) = inserted {
                if self.saved.is_none() {
                    self.saved = Some(ConvertError::UnsupportedMapKey {
                        type_path: err.key_type,
                    });
                }
                continue;
            }
            result?;
        }
        Ok(())
    }

    fn decode_record(
        &mut self,
        entries: &serde_json::Map<String, Json>,
        dst: &mut dyn Reflect,
        depth: usize,
    ) -> Result<()> {
        let info = dst.reflect_type_info();
        let fields = self.cache.fields(info);
        for (key, item) in entries {
            let Some(field) = find_field(&fields, key) else {
                continue;
            };

            let unquoted;
            let item = match (field.quoted(), item) {
                (false, _) | (true, Json::Null) => item,
                (true, Json::String(text)) => match serde_json::from_str::<Json>(text) {
                    Ok(inner) if is_literal(&inner) => {
                        unquoted = inner;
                        &unquoted
                    }
                    _ => {
                        self.save(item, info);
                        continue;
                    }
                },
                (true, _) => {
                    self.save(item, info);
                    continue;
                }
            };

            if let Some(slot) = field.resolve_mut(dst) {
                self.decode(item, slot, depth + 1)?;
            }
        }
        Ok(())
    }
}

/// Exact names first, then ASCII case-insensitive ones.
fn find_field<'f>(fields: &'f [Field], key: &str) -> Option<&'f Field> {
    fields
        .iter()
        .find(|field| field.name() == key)
        .or_else(|| fields.iter().find(|field| field.name().eq_ignore_ascii_case(key)))
}

/// The contents of a `string` field: a scalar or null.
fn is_literal(json: &Json) -> bool {
    !matches!(json, Json::Array(_) | Json::Object(_))
}

fn decode_scalar(json: &Json, scalar: &mut dyn Scalar) -> bool {
    let kind = scalar.scalar_kind();
    match json {
        Json::Bool(flag) if kind == ScalarKind::Bool => scalar.set(Primitive::Bool(*flag)),
        Json::String(text) if kind == ScalarKind::String => scalar.set(Primitive::Str(text)),
        Json::Number(number) => match number_for(number, kind) {
            Some(value) => scalar.set(value),
            None => false,
        },
        _ => false,
    }
}

/// The number as the class `kind` accepts, if it fits.
fn number_for(number: &Number, kind: ScalarKind) -> Option<Primitive<'static>> {
    if let Some((min, max)) = kind.int_range() {
        let wide = match (number.as_i64(), number.as_u64()) {
            (Some(int), _) => i128::from(int),
            (None, Some(uint)) => i128::from(uint),
            // Fractions and exponents never decode into integers.
            (None, None) => return None,
        };
        if wide < min || wide > max {
            return None;
        }
        return Some(if kind.is_signed() {
            Primitive::Int(wide as i64)
        } else {
            Primitive::Uint(wide as u64)
        });
    }
    if kind.is_float() {
        let float = number.as_f64()?;
        if kind == ScalarKind::F32 && float.abs() > f64::from(f32::MAX) {
            return None;
        }
        return Some(Primitive::Float(float));
    }
    None
}

/// Decodes into an empty union. Numbers become [`Value::F64`].
fn fresh(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(flag) => Value::Bool(*flag),
        Json::Number(number) => number.as_f64().map_or(Value::Null, Value::F64),
        Json::String(text) => Value::String(text.clone()),
        Json::Array(items) => Value::List(items.iter().map(fresh).collect()),
        Json::Object(entries) => Value::Map(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), fresh(item)))
                .collect(),
        ),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
