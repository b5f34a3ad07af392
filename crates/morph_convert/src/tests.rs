//! Conversion scenarios, checked against a real round trip through
//! [`codec`](crate::codec) wherever the two are meant to agree.

use core::fmt::Debug;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use morph_reflect::hooks::{HookError, TextDecodable, TextEncodable};
use morph_reflect::{Map, Reflect, Timestamp, Value};

use crate::{ConvertError, Converter, FieldCache, Options, Transformed, codec};

// -----------------------------------------------------------------------------
// Helpers

/// Converts `src` into a seeded value both directly and through the
/// codec, and checks that both agree on the result and on failing.
fn parity<D>(src: &dyn Reflect, seed: impl Fn() -> D) -> (D, crate::Result<()>)
where
    D: Reflect + Debug + PartialEq,
{
    parity_with(src, seed, Options::default())
}

fn parity_with<D>(src: &dyn Reflect, seed: impl Fn() -> D, options: Options) -> (D, crate::Result<()>)
where
    D: Reflect + Debug + PartialEq,
{
    let cache = FieldCache::new();

    let mut direct = seed();
    let direct_result = Converter::new(&cache, options).convert(src, &mut direct);

    let mut oracle = seed();
    let oracle_result = codec::round_trip(src, &mut oracle, &cache);

    assert_eq!(direct, oracle);
    assert_eq!(
        direct_result.is_err(),
        oracle_result.is_err(),
        "direct: {direct_result:?}, codec: {oracle_result:?}"
    );
    (direct, direct_result)
}

fn object<const N: usize>(entries: [(&str, Value); N]) -> Value {
    entries.into_iter().collect()
}

fn list(items: impl IntoIterator<Item = Value>) -> Value {
    Value::List(items.into_iter().collect())
}

// -----------------------------------------------------------------------------
// Records and maps

#[derive(Reflect, Default, Debug, PartialEq)]
struct Profile {
    pub name: String,
    pub age: u32,
    pub scores: Vec<f64>,
    pub extra: Value,
    pub nick: Option<String>,
}

#[test]
fn mixed_map_into_record() {
    let src = object([
        ("name", Value::from("ann")),
        ("AGE", Value::from(30)),
        ("scores", list([Value::from(1), Value::from(2.5)])),
        ("extra", object([("k", Value::from(true))])),
        ("nick", Value::from("a")),
        ("ignored", Value::from(1)),
    ]);
    let (profile, result) = parity(&src, Profile::default);
    result.unwrap();
    assert_eq!(profile.name, "ann");
    assert_eq!(profile.age, 30);
    assert_eq!(profile.scores, [1.0, 2.5]);
    assert_eq!(profile.extra, object([("k", Value::Bool(true))]));
    assert_eq!(profile.nick.as_deref(), Some("a"));
}

#[test]
fn mixed_maps_and_records() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Leaf {
        #[morph(rename = "A")]
        pub a: String,
        #[morph(rename = "B")]
        pub b: String,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Inner {
        #[morph(rename = "B")]
        pub b: i32,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Outer {
        #[morph(rename = "A")]
        pub a: Inner,
    }

    let src = BTreeMap::from([
        ("a".to_owned(), object([("b", Value::from(1))])),
        (
            "b".to_owned(),
            Value::dynamic(Leaf {
                a: "1".into(),
                b: "2".into(),
            }),
        ),
    ]);
    let (out, result) = parity(&src, Outer::default);
    result.unwrap();
    assert_eq!(out, Outer { a: Inner { b: 1 } });
}

#[test]
fn integers_into_floats() {
    let src = vec![1_i32, 2, 3];
    let (floats, _) = parity(&src, Vec::<f64>::new);
    assert_eq!(floats, [1.0, 2.0, 3.0]);

    let (any, _) = parity(&src, Value::default);
    assert_eq!(any, list([Value::F64(1.0), Value::F64(2.0), Value::F64(3.0)]));
}

#[test]
fn keys_match_names_ignoring_case() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Tagged {
        #[morph(rename = "ABC_DEF")]
        pub value: i32,
    }

    let src = object([("aBc_DEf", Value::from(2))]);
    let (tagged, _) = parity(&src, Tagged::default);
    assert_eq!(tagged.value, 2);
}

#[test]
fn record_into_record() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Wide {
        pub a: String,
        pub b: String,
        pub c: String,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Narrow {
        #[morph(rename = "A")]
        pub a: String,
        pub b: String,
    }

    let src = Wide {
        a: "some a".into(),
        b: "some b".into(),
        c: "some c".into(),
    };
    let (narrow, _) = parity(&src, Narrow::default);
    assert_eq!(narrow.a, "some a");
    assert_eq!(narrow.b, "some b");

    let out: Narrow = crate::convert_to(&src).unwrap();
    assert_eq!(out, narrow);
}

#[test]
fn absent_fields_keep_their_values() {
    let src = object([("name", Value::from("bob"))]);
    let (profile, _) = parity(&src, || Profile {
        age: 7,
        scores: vec![1.0],
        ..Profile::default()
    });
    assert_eq!(profile.name, "bob");
    assert_eq!(profile.age, 7);
    assert_eq!(profile.scores, [1.0]);
}

#[test]
fn lists_of_unions_into_maps() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Point {
        pub x: i32,
    }

    #[derive(Reflect, Default, Debug)]
    struct Holder {
        pub bar: Vec<Value>,
    }

    let src = Holder {
        bar: vec![Value::dynamic(Point { x: 1 }), Value::from(5)],
    };
    let (out, _) = parity(&src, Map::new);
    assert_eq!(
        out["bar"],
        list([object([("x", Value::F64(1.0))]), Value::F64(5.0)])
    );
}

// -----------------------------------------------------------------------------
// Embedding

#[derive(Reflect, Default, Debug, PartialEq)]
struct Base {
    pub id: i64,
    pub name: String,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Derived {
    #[morph(embed)]
    pub base: Base,
    pub extra: bool,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Flat {
    pub id: i64,
    pub name: String,
    pub extra: bool,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Linked {
    #[morph(embed)]
    pub base: Option<Base>,
    pub extra: bool,
}

#[test]
fn embedded_fields_are_promoted() {
    let derived = Derived {
        base: Base {
            id: 4,
            name: "four".into(),
        },
        extra: true,
    };
    let (flat, _) = parity(&derived, Flat::default);
    assert_eq!(
        flat,
        Flat {
            id: 4,
            name: "four".into(),
            extra: true
        }
    );

    let (back, _) = parity(&flat, Derived::default);
    assert_eq!(back, derived);
}

#[test]
fn embedded_pointers_allocate_on_demand() {
    let (linked, _) = parity(&object([("extra", Value::from(true))]), Linked::default);
    assert_eq!(linked.base, None);
    assert!(linked.extra);

    let (linked, _) = parity(&object([("ID", Value::from(3))]), Linked::default);
    assert_eq!(
        linked.base,
        Some(Base {
            id: 3,
            name: String::new()
        })
    );
}

#[test]
fn nil_embedded_pointers_are_skipped() {
    let src = Linked {
        base: None,
        extra: true,
    };
    let (out, _) = parity(&src, BTreeMap::<String, Value>::new);
    assert_eq!(out.len(), 1);
    assert_eq!(out["extra"], Value::Bool(true));
}

#[test]
fn private_fields_are_invisible() {
    #[derive(Reflect, Debug, PartialEq)]
    struct Secretive {
        pub shown: i32,
        hidden: String,
    }

    let seed = || Secretive {
        shown: 0,
        hidden: "keep".into(),
    };
    let src = object([("shown", Value::from(1)), ("hidden", Value::from("x"))]);
    let (out, _) = parity(&src, seed);
    assert_eq!(out.shown, 1);
    assert_eq!(out.hidden, "keep");

    let (map, _) = parity(&seed(), Map::new);
    assert_eq!(map.keys().collect::<Vec<_>>(), ["shown"]);
}

// -----------------------------------------------------------------------------
// Quoted fields

#[test]
fn quoted_fields_are_unquoted() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Quoted {
        #[morph(string)]
        pub bar: String,
        #[morph(string)]
        pub id: i64,
    }

    let src = object([
        ("bar", Value::from("\"a\"")),
        ("id", Value::from("131412412412412412")),
    ]);
    let (quoted, result) = parity(&src, Quoted::default);
    result.unwrap();
    assert_eq!(quoted.bar, "a");
    assert_eq!(quoted.id, 131_412_412_412_412_412);
}

// -----------------------------------------------------------------------------
// Coercions the codec does not do

#[test]
fn boolean_strings() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Switches {
        pub bar: String,
        pub baz: bool,
        pub qux: Option<bool>,
        pub caps: bool,
    }

    let src = object([
        ("bar", Value::from("true")),
        ("baz", Value::from("TRUE")),
        ("qux", Value::from("true")),
        ("caps", Value::from("tRuE")),
    ]);
    let out: Switches = crate::convert_to(&src).unwrap();
    assert_eq!(
        out,
        Switches {
            bar: "true".into(),
            baz: true,
            qux: Some(true),
            caps: true,
        }
    );
}

#[test]
fn numeric_strings_into_floats() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Reading {
        pub float_val: f64,
        pub string_val: String,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[morph(scalar)]
    struct Celsius(f64);

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Aliased {
        pub a: Celsius,
    }

    let src = object([
        ("float_val", Value::from("3.14159")),
        ("string_val", Value::from("42")),
    ]);

    let plain: Reading = crate::convert_to(&src).unwrap();
    assert_eq!(plain.float_val, 0.0);
    assert_eq!(plain.string_val, "42");

    let disabled: Reading = crate::convert_to_with(&src, Options::new().string_to_float64(false)).unwrap();
    assert_eq!(disabled, plain);

    let parsing = Options::new().string_to_float64(true);
    let parsed: Reading = crate::convert_to_with(&src, parsing.clone()).unwrap();
    assert_eq!(parsed.float_val, 3.14159);
    assert_eq!(parsed.string_val, "42");

    let src = object([("a", Value::from("3.14159"))]);
    let aliased: Aliased = crate::convert_to_with(&src, parsing).unwrap();
    assert_eq!(aliased.a, Celsius(3.14159));
}

#[test]
fn map_values_go_through_floats() {
    let src = object([("a", Value::from("1.5")), ("b", Value::I64(7))]);
    let parsing = Options::new().string_to_float64(true);

    let ints: HashMap<String, i64> = crate::convert_to_with(&src, parsing.clone()).unwrap();
    assert_eq!(ints["a"], 1);
    assert_eq!(ints["b"], 7);

    let narrow: HashMap<String, f32> = crate::convert_to_with(&src, parsing).unwrap();
    assert_eq!(narrow["a"], 1.5);
    assert_eq!(narrow["b"], 7.0);

    // Without the option the string has no number to give.
    let ints: HashMap<String, i64> = crate::convert_to(&src).unwrap();
    assert_eq!(ints["a"], 0);
    assert_eq!(ints["b"], 7);
}

// -----------------------------------------------------------------------------
// Transforms

#[derive(Reflect, Debug)]
#[morph(opaque)]
struct Problem(String);

fn problems_to_strings(value: &dyn Reflect) -> Transformed {
    match value.downcast_ref::<Problem>() {
        Some(problem) => Transformed::Replace(Value::from(problem.0.as_str())),
        None => Transformed::Unchanged,
    }
}

#[test]
fn transforms_rewrite_entries() {
    let src = BTreeMap::from([("foo".to_owned(), Value::dynamic(Problem("bar".into())))]);
    let options = Options::new().transform(problems_to_strings);
    let out: BTreeMap<String, Value> = crate::convert_to_with(&src, options).unwrap();
    assert_eq!(out["foo"], Value::from("bar"));
}

#[test]
fn transforms_replace_with_other_shapes() {
    let src = BTreeMap::from([("a".to_owned(), "foo".to_owned()), ("b".to_owned(), "bar".to_owned())]);

    let suffix = Options::new().transform(|value| match value.downcast_ref::<String>() {
        Some(text) => Transformed::Replace(Value::from(format!("{text}baz"))),
        None => Transformed::Unchanged,
    });
    let out: Map = crate::convert_to_with(&src, suffix).unwrap();
    assert_eq!(out["a"], Value::from("foobaz"));
    assert_eq!(out["b"], Value::from("barbaz"));

    let numbers = Options::new().transform(|value| {
        if value.is::<String>() {
            Transformed::Replace(Value::from(3))
        } else {
            Transformed::Unchanged
        }
    });
    let out: Map = crate::convert_to_with(&src, numbers).unwrap();
    assert_eq!(out["a"], Value::F64(3.0));
    assert_eq!(out["b"], Value::F64(3.0));
}

#[test]
fn absent_values_are_skipped() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Pair {
        pub a: String,
        pub b: String,
    }

    let options = Options::new().transform(|value| match value.downcast_ref::<String>() {
        Some(text) if text.is_empty() => Transformed::Absent,
        _ => Transformed::Unchanged,
    });
    let src = object([("a", Value::from("")), ("b", Value::from("x"))]);
    let mut pair = Pair {
        a: "keep".into(),
        b: String::new(),
    };
    crate::convert_with(&src, &mut pair, options).unwrap();
    assert_eq!(pair.a, "keep");
    assert_eq!(pair.b, "x");
}

#[test]
fn nulls_pass_through_transforms() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Flagged {
        pub b: Option<bool>,
    }

    let src = object([("b", Value::Null)]);
    let identity = Options::new().transform(|_| Transformed::Unchanged);
    let (out, _) = parity_with(&src, || Flagged { b: Some(false) }, identity);
    assert_eq!(out.b, None);
}

// -----------------------------------------------------------------------------
// Fast paths

#[test]
fn string_maps_into_unions() {
    let src: HashMap<String, String> = (0..1000).map(|n| (n.to_string(), n.to_string())).collect();
    let (out, _) = parity(&src, Map::new);
    assert_eq!(out.len(), 1000);
    assert_eq!(out["999"], Value::from("999"));

    let src: HashMap<String, i32> = (0..5).map(|n| (n.to_string(), n)).collect();
    let (out, _) = parity(&src, Map::new);
    assert_eq!(out["4"], Value::F64(4.0));
}

#[test]
fn populated_maps_keep_other_keys() {
    let src = HashMap::from([("bar".to_owned(), 1_i32), ("baz".to_owned(), 2)]);
    let seed = || -> Map {
        [("existing", "foo"), ("baz", "3")]
            .into_iter()
            .map(|(key, value)| (key.to_owned(), Value::from(value)))
            .collect()
    };
    let (out, _) = parity(&src, seed);
    assert_eq!(out["existing"], Value::from("foo"));
    assert_eq!(out["bar"], Value::F64(1.0));
    assert_eq!(out["baz"], Value::F64(2.0));
}

#[test]
fn nested_typed_maps() {
    let src = BTreeMap::from([
        (
            "foo".to_owned(),
            Value::dynamic(HashMap::from([("a".to_owned(), 1_i32)])),
        ),
        (
            "bar".to_owned(),
            Value::dynamic(HashMap::from([("b".to_owned(), "c".to_owned())])),
        ),
    ]);
    let (out, _) = parity(&src, Map::new);
    assert_eq!(out["foo"], object([("a", Value::F64(1.0))]));
    assert_eq!(out["bar"], object([("b", Value::from("c"))]));
}

#[test]
fn absent_maps_leave_the_destination() {
    let src: Option<HashMap<String, i32>> = None;
    let mut out = Map::from_iter([("stale".to_owned(), Value::Null)]);
    crate::convert(&src, &mut out).unwrap();
    assert_eq!(out.len(), 1);

    // Below the top, an absent map still clears the entry it lands in.
    let src = BTreeMap::from([("inner".to_owned(), None::<HashMap<String, i32>>)]);
    let (out, _) = parity(&src, || {
        BTreeMap::from([("inner".to_owned(), HashMap::from([("stale".to_owned(), 1_i32)]))])
    });
    assert!(out["inner"].is_empty());
}

// -----------------------------------------------------------------------------
// Nulls and pointers

#[test]
fn null_sources_are_nondestructive() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Named {
        pub bar: String,
    }

    let seed = || Named { bar: "test".into() };
    let (out, _) = parity(&None::<BTreeMap<String, Value>>, seed);
    assert_eq!(out.bar, "test");

    let mut out = seed();
    crate::convert(&Value::Null, &mut out).unwrap();
    assert_eq!(out.bar, "test");

    let mut pointer = Some(5_i32);
    crate::convert(&None::<i32>, &mut pointer).unwrap();
    assert_eq!(pointer, Some(5));

    let mut items = vec![1, 2, 3];
    crate::convert(&None::<Vec<i32>>, &mut items).unwrap();
    assert_eq!(items, [1, 2, 3]);

    let mut entries = BTreeMap::from([("stale".to_owned(), 1_i32)]);
    crate::convert(&None::<HashMap<String, i32>>, &mut entries).unwrap();
    assert_eq!(entries["stale"], 1);

    let mut any = Value::from("kept");
    crate::convert(&Value::Null, &mut any).unwrap();
    assert_eq!(any, Value::from("kept"));
}

#[test]
fn null_clears_pointers() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Flagged {
        pub b: Option<bool>,
    }

    let src = object([("b", Value::Null)]);
    let (out, _) = parity(&src, || Flagged { b: Some(false) });
    assert_eq!(out.b, None);
}

#[test]
fn pointers_to_nothing() {
    #[derive(Reflect, Default, Debug, Clone, PartialEq)]
    struct Mine {
        pub a: i32,
    }

    #[derive(Reflect, Default, Debug)]
    struct Indirect {
        pub record: Option<Box<Option<Mine>>>,
        pub number: Option<Box<Option<i32>>>,
        pub items: Option<Vec<i32>>,
        pub entries: Option<Map>,
    }

    let src = Indirect {
        record: Some(Box::new(None)),
        number: Some(Box::new(None)),
        items: Some(Vec::new()),
        entries: Some(Map::new()),
    };
    let (out, _) = parity(&src, Map::new);
    assert_eq!(out["record"], Value::Null);
    assert_eq!(out["number"], Value::Null);
    assert_eq!(out["items"], list([]));
    assert_eq!(out["entries"], Value::Map(Map::new()));
}

#[test]
fn populated_unions_are_replaced() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Slot {
        pub val: Value,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Slots {
        pub foo: Vec<Slot>,
    }

    let src = object([("foo", list([object([("val", Value::from("floob"))])]))]);
    let (out, _) = parity(&src, || Slots {
        foo: vec![Slot {
            val: Value::from("qux"),
        }],
    });
    assert_eq!(out.foo[0].val, Value::from("floob"));
}

// -----------------------------------------------------------------------------
// Timestamps

#[derive(Reflect, Default, Debug, PartialEq)]
struct Event {
    pub time: Timestamp,
}

#[test]
fn timestamps_from_text() {
    let src = object([("time", Value::from("2001-02-03T04:05:06.5Z"))]);
    let (event, result) = parity(&src, Event::default);
    result.unwrap();
    let expected = Utc.with_ymd_and_hms(2001, 2, 3, 4, 5, 6).unwrap() + chrono::Duration::milliseconds(500);
    assert_eq!(event.time, expected);
}

#[test]
fn invalid_timestamps_fail() {
    let src = object([("time", Value::from("badtime"))]);
    let (event, result) = parity(&src, Event::default);
    assert!(matches!(result, Err(ConvertError::Hook { .. })));
    assert_eq!(event, Event::default());
}

#[test]
fn timestamps_into_other_shapes() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Copied {
        pub time: Option<Timestamp>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Printed {
        pub time: String,
    }

    let event = Event {
        time: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
    };

    let (copied, _) = parity(&event, Copied::default);
    assert_eq!(copied.time, Some(event.time));

    let (printed, _) = parity(&event, Printed::default);
    assert_eq!(printed.time, "2024-05-01T10:00:00Z");

    let (map, _) = parity(&event, Map::new);
    assert_eq!(map["time"], Value::from("2024-05-01T10:00:00Z"));

    let (back, _) = parity(&printed, Event::default);
    assert_eq!(back, event);
}

// -----------------------------------------------------------------------------
// Text hooks

#[derive(Reflect, Default, Debug, Clone, Copy, PartialEq)]
#[morph(opaque, text)]
struct Date {
    year: i32,
    month: u32,
    day: u32,
}

impl TextEncodable for Date {
    fn encode_text(&self) -> Result<String, HookError> {
        Ok(format!("{:04}-{:02}-{:02}", self.year, self.month, self.day))
    }
}

impl TextDecodable for Date {
    fn decode_text(&mut self, text: &str) -> Result<(), HookError> {
        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(HookError::from_error)?;
        *self = Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        };
        Ok(())
    }
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Dated {
    pub date: Date,
}

#[test]
fn custom_text_hooks() {
    let src = object([("date", Value::from("2001-01-01"))]);
    let (dated, result) = parity(&src, Dated::default);
    result.unwrap();
    assert_eq!(
        dated.date,
        Date {
            year: 2001,
            month: 1,
            day: 1
        }
    );

    let (map, _) = parity(&dated, Map::new);
    assert_eq!(map["date"], Value::from("2001-01-01"));

    let src = object([("date", Value::from("2001-13-01"))]);
    let (dated, result) = parity(&src, Dated::default);
    assert!(result.is_err());
    assert_eq!(dated, Dated::default());
}

#[derive(Reflect, Default, Debug)]
#[morph(opaque, encode)]
struct CantEncode;

impl TextEncodable for CantEncode {
    fn encode_text(&self) -> Result<String, HookError> {
        Err(HookError::new("custom error"))
    }
}

#[derive(Reflect, Default, Debug)]
#[morph(opaque, decode)]
struct CantDecode;

impl TextDecodable for CantDecode {
    fn decode_text(&mut self, _text: &str) -> Result<(), HookError> {
        Err(HookError::new("custom error"))
    }
}

#[test]
fn failing_encoders_are_reported() {
    #[derive(Reflect, Default, Debug)]
    struct Wrapper {
        pub foo: CantEncode,
        pub other: i32,
    }

    let cache = FieldCache::new();
    let mut out = BTreeMap::<String, Value>::new();
    let err = Converter::new(&cache, Options::default())
        .convert(&Wrapper::default(), &mut out)
        .unwrap_err();
    assert!(matches!(err, ConvertError::Hook { .. }));
    assert!(codec::round_trip(&Wrapper::default(), &mut BTreeMap::<String, Value>::new(), &cache).is_err());
    // Siblings still convert.
    assert_eq!(out["other"], Value::F64(0.0));

    let src = BTreeMap::from([("foo".to_owned(), Value::dynamic(CantEncode))]);
    assert!(crate::convert_to::<Map>(&src).is_err());
    assert!(codec::round_trip(&src, &mut Map::new(), &cache).is_err());
}

#[test]
fn failing_decoders_are_reported() {
    #[derive(Reflect, Default, Debug)]
    struct Wrapper {
        pub foo: CantDecode,
    }

    // Nothing decodes on the way into a map.
    let (out, result) = parity(&Wrapper::default(), Map::new);
    result.unwrap();
    assert_eq!(out["foo"], Value::Map(Map::new()));

    let src = BTreeMap::from([("foo".to_owned(), Value::dynamic(CantDecode))]);
    let (out, _) = parity(&src, Map::new);
    assert_eq!(out["foo"], Value::Map(Map::new()));

    let src = object([("foo", Value::from("x"))]);
    let cache = FieldCache::new();
    let mut wrapper = Wrapper::default();
    let direct = Converter::new(&cache, Options::default()).convert(&src, &mut wrapper);
    assert!(matches!(direct, Err(ConvertError::Hook { .. })));
    assert!(codec::round_trip(&src, &mut wrapper, &cache).is_err());
}

// -----------------------------------------------------------------------------
// Unsupported input

#[test]
fn non_string_keys_fail() {
    #[derive(Reflect, Default, Debug)]
    struct Keyed {
        pub a: BTreeMap<i32, String>,
        pub b: String,
    }

    let src = Keyed {
        a: BTreeMap::from([(1, "baz".to_owned())]),
        b: "kept".into(),
    };
    let cache = FieldCache::new();
    let mut out = BTreeMap::<String, Value>::new();
    let err = Converter::new(&cache, Options::default())
        .convert(&src, &mut out)
        .unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedMapKey { .. }));
    assert!(codec::round_trip(&src, &mut BTreeMap::<String, Value>::new(), &cache).is_err());
    assert_eq!(out["a"], Value::Map(Map::new()));
    assert_eq!(out["b"], Value::from("kept"));
}

#[test]
fn fixed_arrays_are_rejected() {
    let err = crate::convert_to::<Vec<i32>>(&[1_i32, 2]).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedShape { .. }));

    let mut array = [0_i32; 2];
    let err = crate::convert(&vec![1_i32, 2], &mut array).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedShape { .. }));
}

fn answer() -> i32 {
    42
}

#[test]
fn handles_are_left_alone() {
    #[derive(Reflect, Debug)]
    struct WithHandle {
        pub bar: String,
        pub callback: fn() -> i32,
    }

    #[derive(Reflect, Debug)]
    struct Skipping {
        pub bar: String,
        #[morph(skip)]
        pub callback: fn() -> i32,
    }

    let src = object([("bar", Value::from("a")), ("callback", Value::from("2"))]);

    let mut out = WithHandle {
        bar: String::new(),
        callback: answer,
    };
    crate::convert(&src, &mut out).unwrap();
    assert_eq!(out.bar, "a");
    assert_eq!((out.callback)(), 42);

    let cache = FieldCache::new();
    let mut direct = Skipping {
        bar: String::new(),
        callback: answer,
    };
    let mut oracle = Skipping {
        bar: String::new(),
        callback: answer,
    };
    crate::convert(&src, &mut direct).unwrap();
    codec::round_trip(&src, &mut oracle, &cache).unwrap();
    assert_eq!(direct.bar, oracle.bar);
    assert_eq!((direct.callback)(), 42);
}

// -----------------------------------------------------------------------------
// Depth

#[test]
fn depth_is_bounded() {
    let src = vec![vec![vec![1_i32]]];
    let shallow = Options::new().max_depth(2);
    let err = crate::convert_to_with::<Vec<Vec<Vec<i32>>>>(&src, shallow).unwrap_err();
    assert!(matches!(err, ConvertError::CycleSuspected { max_depth: 2 }));

    let out: Vec<Vec<Vec<i32>>> = crate::convert_to(&src).unwrap();
    assert_eq!(out, src);

    let err = crate::convert_to_with::<Vec<i32>>(&src, Options::new().max_depth(0)).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidArgument(_)));
}

#[derive(Reflect, Default, Clone)]
struct Node {
    pub next: Arc<OnceLock<Node>>,
}

fn cycle() -> &'static Node {
    let root: &'static Arc<OnceLock<Node>> = Box::leak(Box::new(Arc::new(OnceLock::new())));
    let _ = root.set(Node {
        next: Arc::clone(root),
    });
    root.get().unwrap()
}

#[test]
fn cycles_are_detected() {
    let node = cycle();

    let mut out = BTreeMap::<String, Value>::new();
    let direct = crate::convert(node, &mut out);
    assert!(matches!(direct, Err(ConvertError::CycleSuspected { max_depth: 10_000 })));
    assert!(out.is_empty());

    let mut any = Value::Null;
    let direct = crate::convert(node, &mut any);
    assert!(matches!(direct, Err(ConvertError::CycleSuspected { .. })));
    assert!(any.is_null());

    let oracle = codec::marshal(node, FieldCache::shared());
    assert!(matches!(oracle, Err(ConvertError::CycleSuspected { .. })));
}

#[test]
fn cycles_are_detected_off_the_main_thread() {
    let worker = std::thread::Builder::new()
        .stack_size(1 << 20)
        .spawn(|| {
            let mut out = BTreeMap::<String, Value>::new();
            let direct = crate::convert(cycle(), &mut out);
            matches!(direct, Err(ConvertError::CycleSuspected { .. }))
        })
        .unwrap();
    assert!(worker.join().unwrap());
}
