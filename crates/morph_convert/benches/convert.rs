use std::collections::HashMap;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use morph_convert::{FieldCache, codec};
use morph_reflect::{Map, Reflect, Value};

#[derive(Reflect, Default)]
struct Wide {
    pub a: String,
    pub b: String,
    pub c: String,
}

#[derive(Reflect, Default)]
struct Narrow {
    pub a: String,
    pub b: String,
}

fn bench_records(c: &mut Criterion) {
    let src = Wide {
        a: "some a".into(),
        b: "some b".into(),
        c: "some c".into(),
    };
    let cache = FieldCache::new();

    let mut group = c.benchmark_group("record_into_record");
    group.bench_function("direct", |b| {
        b.iter(|| {
            let out: Narrow = morph_convert::convert_to(black_box(&src)).unwrap();
            black_box(out)
        });
    });
    group.bench_function("codec", |b| {
        b.iter(|| {
            let mut out = Narrow::default();
            codec::round_trip(black_box(&src), &mut out, &cache).unwrap();
            black_box(out)
        });
    });
    group.finish();
}

fn bench_maps(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_map_into_union_map");
    for size in [10, 1000] {
        let src: HashMap<String, String> = (0..size).map(|n| (n.to_string(), n.to_string())).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &src, |b, src| {
            b.iter(|| {
                let out: Map = morph_convert::convert_to(src).unwrap();
                black_box(out)
            });
        });
    }
    group.finish();

    let big: HashMap<String, String> = (0..1000).map(|n| (n.to_string(), n.to_string())).collect();
    let nested: HashMap<String, Value> = HashMap::from([
        ("big".to_owned(), Value::dynamic(big)),
        ("foo".to_owned(), Value::dynamic(HashMap::from([("a".to_owned(), 1_i32)]))),
        ("bar".to_owned(), Value::dynamic(HashMap::from([("b".to_owned(), "c".to_owned())]))),
    ]);
    c.bench_function("nested_map", |b| {
        b.iter(|| {
            let out: Map = morph_convert::convert_to(black_box(&nested)).unwrap();
            black_box(out)
        });
    });
}

criterion_group!(benches, bench_records, bench_maps);
criterion_main!(benches);
