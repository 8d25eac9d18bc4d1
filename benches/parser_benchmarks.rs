#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wolframalpha::{from_xml_str, xml::Parser};

fn bench_xml_reader(c: &mut Criterion) {
    let input = include_str!("../tests/fixtures/pi.xml");

    c.bench_function("read_xml", |b| {
        b.iter(|| Parser::new(black_box(input.as_bytes())).parse().unwrap())
    });
}

fn bench_decode_result(c: &mut Criterion) {
    let input = include_str!("../tests/fixtures/pi.xml");

    c.bench_function("decode_query_result", |b| {
        b.iter(|| {
            let result = from_xml_str(black_box(input)).unwrap();
            result.details().unwrap()
        })
    });
}

criterion_group!(benches, bench_xml_reader, bench_decode_result);
criterion_main!(benches);
