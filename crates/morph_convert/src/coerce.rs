//! Scalar coercion and value classification.

use morph_reflect::info::ScalarKind;
use morph_reflect::ops::{Primitive, ReflectMut, ReflectRef, Scalar};
use morph_reflect::{Reflect, Value};

use crate::Options;

/// Outcome of [`assign_scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Coercion {
    Assigned,
    /// No conversion exists; the destination keeps its value.
    Unset,
}

/// Assigns a scalar to a scalar of a possibly different kind.
///
/// Same types copy. Strings become booleans when they read `true` or
/// `false` in any case, and floats when `string_to_float64` is enabled
/// and the destination is an `f64` kind. Numbers convert between each
/// other like `as` casts. Everything else is left unset.
pub(crate) fn assign_scalar(src: &dyn Scalar, dst: &mut dyn Scalar, options: &Options) -> Coercion {
    if src.reflect_type_info().type_id() == dst.reflect_type_info().type_id() {
        return set(dst, src.get());
    }

    let kind = dst.scalar_kind();
    let value = match src.get() {
        Primitive::Str(text) => match kind {
            ScalarKind::String => Primitive::Str(text),
            ScalarKind::Bool if text.eq_ignore_ascii_case("true") => Primitive::Bool(true),
            ScalarKind::Bool if text.eq_ignore_ascii_case("false") => Primitive::Bool(false),
            ScalarKind::F64 if options.string_to_float64 => match text.parse::<f64>() {
                Ok(number) => Primitive::Float(number),
                Err(_) => return Coercion::Unset,
            },
            _ => return Coercion::Unset,
        },
        Primitive::Bool(flag) => match kind {
            ScalarKind::Bool => Primitive::Bool(flag),
            _ => return Coercion::Unset,
        },
        number => {
            let number = match (number, src.scalar_kind()) {
                (Primitive::Float(float), ScalarKind::F32) if kind.is_float() => {
                    Primitive::Float(widen_f32(float))
                }
                _ => number,
            };
            match cast_number(number, kind) {
                Some(value) => value,
                None => return Coercion::Unset,
            }
        }
    };
    set(dst, value)
}

fn set(dst: &mut dyn Scalar, value: Primitive<'_>) -> Coercion {
    if dst.set(value) {
        Coercion::Assigned
    } else {
        Coercion::Unset
    }
}

/// Re-expresses a number in the class `kind` accepts.
fn cast_number(value: Primitive<'_>, kind: ScalarKind) -> Option<Primitive<'static>> {
    let cast = if kind.is_signed() {
        match value {
            Primitive::Int(int) => Primitive::Int(int),
            Primitive::Uint(uint) => Primitive::Int(uint as i64),
            Primitive::Float(float) => Primitive::Int(float as i64),
            _ => return None,
        }
    } else if kind.is_unsigned() {
        match value {
            Primitive::Int(int) => Primitive::Uint(int as u64),
            Primitive::Uint(uint) => Primitive::Uint(uint),
            Primitive::Float(float) => Primitive::Uint(float as u64),
            _ => return None,
        }
    } else if kind.is_float() {
        match value {
            Primitive::Int(int) => Primitive::Float(int as f64),
            Primitive::Uint(uint) => Primitive::Float(uint as f64),
            Primitive::Float(float) => Primitive::Float(float),
            _ => return None,
        }
    } else {
        return None;
    };
    Some(cast)
}

/// Widens an `f32` through its shortest decimal form, so `0.1f32`
/// becomes `0.1` rather than `0.10000000149011612`.
pub(crate) fn widen_f32(value: f64) -> f64 {
    let narrow = value as f32;
    narrow.to_string().parse().unwrap_or(value)
}

/// Unquotes the value of a `string` field.
///
/// Tries, in order, a boolean spelling, a base-10 integer and a float,
/// then strips one pair of surrounding double quotes. Returns `None` when
/// the value is not a string or nothing applies.
pub(crate) fn dequote(value: &dyn Reflect) -> Option<Value> {
    let ReflectRef::Scalar(scalar) = value.reflect_ref() else {
        return None;
    };
    let Primitive::Str(text) = scalar.get() else {
        return None;
    };

    if let Some(flag) = parse_bool(text) {
        return Some(Value::Bool(flag));
    }
    if let Ok(int) = text.parse::<i64>() {
        return Some(Value::I64(int));
    }
    if let Ok(float) = text.parse::<f64>() {
        return Some(Value::F64(float));
    }
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(Value::from)
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Empty by kind: zero numbers, `false`, empty strings and containers, and
/// absent pointers and unions.
pub(crate) fn is_empty(value: &dyn Reflect) -> bool {
    match value.reflect_ref() {
        ReflectRef::List(list) => list.is_empty(),
        ReflectRef::Array(array) => array.len() == 0,
        ReflectRef::Map(map) => map.is_empty(),
        ReflectRef::Pointer(pointer) => pointer.is_none(),
        ReflectRef::Union(value) => value.is_null(),
        ReflectRef::Scalar(scalar) => match scalar.get() {
            Primitive::Bool(flag) => !flag,
            Primitive::Int(int) => int == 0,
            Primitive::Uint(uint) => uint == 0,
            Primitive::Float(float) => float == 0.0,
            Primitive::Str(text) => text.is_empty(),
        },
        ReflectRef::Struct(_) | ReflectRef::Opaque(_) => false,
    }
}

/// An absent pointer or a null union.
pub(crate) fn is_nil(value: &dyn Reflect) -> bool {
    match value.reflect_ref() {
        ReflectRef::Pointer(pointer) => pointer.is_none(),
        ReflectRef::Union(value) => value.is_null(),
        _ => false,
    }
}

/// The value held by a non-null union, or `value` itself.
pub(crate) fn unwrap_union(value: &dyn Reflect) -> &dyn Reflect {
    match value.reflect_ref() {
        ReflectRef::Union(union) => union.inner().unwrap_or(value),
        _ => value,
    }
}

/// Writes a null: pointers, unions, maps and lists are cleared, other
/// kinds keep their value.
pub(crate) fn assign_null(dst: &mut dyn Reflect) {
    match dst.reflect_mut() {
        ReflectMut::Pointer(pointer) => pointer.set_none(),
        ReflectMut::Union(value) => *value = Value::Null,
        ReflectMut::Map(map) => map.clear(),
        ReflectMut::List(list) => list.reset(0),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use morph_reflect::ops::{ReflectMut, ReflectRef};
    use morph_reflect::{Reflect, Value};

    use super::{Coercion, assign_scalar, dequote, is_empty, widen_f32};
    use crate::Options;

    fn assign(src: &dyn Reflect, dst: &mut dyn Reflect, options: &Options) -> Coercion {
        match (src.reflect_ref(), dst.reflect_mut()) {
            (ReflectRef::Scalar(src), ReflectMut::Scalar(dst)) => assign_scalar(src, dst, options),
            _ => panic!("expected scalars"),
        }
    }

    #[test]
    fn bool_strings_ignore_case() {
        let options = Options::default();
        for text in ["true", "TRUE", "tRuE"] {
            let mut out = false;
            assert_eq!(assign(&text.to_owned(), &mut out, &options), Coercion::Assigned);
            assert!(out);
        }
        let mut out = true;
        assert_eq!(assign(&"nope".to_owned(), &mut out, &options), Coercion::Unset);
        assert!(out);
    }

    #[test]
    fn numbers_cast() {
        let options = Options::default();
        let mut float = 0.0_f64;
        assign(&3_i32, &mut float, &options);
        assert_eq!(float, 3.0);

        let mut int = 0_i8;
        assign(&300_u32, &mut int, &options);
        assert_eq!(int, 300_u32 as i8);

        let mut truncated = 0_i64;
        assign(&2.9_f64, &mut truncated, &options);
        assert_eq!(truncated, 2);

        let mut wide = 0.0_f64;
        assign(&0.1_f32, &mut wide, &options);
        assert_eq!(wide, 0.1);
    }

    #[test]
    fn strings_into_floats_need_the_option() {
        let mut out = 1.0_f64;
        assert_eq!(assign(&"2.5".to_owned(), &mut out, &Options::default()), Coercion::Unset);
        assert_eq!(out, 1.0);

        let options = Options::new().string_to_float64(true);
        assert_eq!(assign(&"2.5".to_owned(), &mut out, &options), Coercion::Assigned);
        assert_eq!(out, 2.5);

        let mut narrow = 1.0_f32;
        assert_eq!(assign(&"2.5".to_owned(), &mut narrow, &options), Coercion::Unset);
    }

    #[test]
    fn numbers_do_not_become_strings() {
        let mut out = String::from("keep");
        assert_eq!(assign(&65_i32, &mut out, &Options::default()), Coercion::Unset);
        assert_eq!(out, "keep");
    }

    #[test]
    fn dequote_order() {
        let cases = [
            ("true", Value::Bool(true)),
            ("1", Value::Bool(true)),
            ("F", Value::Bool(false)),
            ("42", Value::I64(42)),
            ("-7", Value::I64(-7)),
            ("2.5", Value::F64(2.5)),
            ("\"text\"", Value::from("text")),
        ];
        for (text, expected) in cases {
            assert_eq!(dequote(&text.to_owned()), Some(expected), "{text}");
        }
        assert_eq!(dequote(&"plain".to_owned()), None);
        assert_eq!(dequote(&"\"".to_owned()), None);
        assert_eq!(dequote(&5_i32), None);
    }

    #[test]
    fn emptiness() {
        assert!(is_empty(&0_u8));
        assert!(is_empty(&String::new()));
        assert!(is_empty(&Vec::<i32>::new()));
        assert!(is_empty(&None::<i32>));
        assert!(is_empty(&Value::Null));
        assert!(!is_empty(&Value::from("")));
        assert!(!is_empty(&Some(0_i32)));
    }

    #[test]
    fn f32_widening_is_shortest() {
        assert_eq!(widen_f32(f64::from(1.1_f32)), 1.1);
        assert_eq!(widen_f32(f64::from(16_777_216_f32)), 16_777_216.0);
    }
}
