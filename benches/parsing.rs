use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wunderground_history::{parse_daily_html, parse_hourly_csv};

const CSV: &str = include_str!("../tests/fixtures/KBOS-2014-01-15.csv");
const HTML: &str = include_str!("../tests/fixtures/KBOS-2014-01-15.html");

fn bench_parsers(c: &mut Criterion) {
    c.bench_function("parse_hourly_csv", |b| {
        b.iter(|| parse_hourly_csv(black_box(CSV)))
    });
    c.bench_function("parse_daily_html", |b| {
        b.iter(|| parse_daily_html(black_box(HTML)))
    });
}

criterion_group!(benches, bench_parsers);
criterion_main!(benches);
