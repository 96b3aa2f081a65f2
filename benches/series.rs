//! Benchmarks for cost series building and rendering.

use chrono::{Duration, NaiveDate};
use costbot::query::Granularity;
use costbot::series::{build_series, render_series, RawCostRow};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

/// `days` daily rows in reverse order, so the sort has work to do.
fn rows(days: i64) -> Vec<RawCostRow> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..days)
        .rev()
        .enumerate()
        .map(|(index, offset)| {
            let date = start + Duration::days(offset);
            let value = json!([
                (offset % 97) as f64 + 0.25,
                date.format("%Y%m%d").to_string().parse::<i64>().unwrap(),
                "USD"
            ]);
            RawCostRow::from_json(index, &value).unwrap()
        })
        .collect()
}

fn bench_build_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_series");
    for days in [31, 365, 3650] {
        let input = rows(days);
        group.bench_with_input(BenchmarkId::new("daily", days), &input, |b, input| {
            b.iter(|| build_series(black_box(input), Granularity::Daily).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("monthly", days), &input, |b, input| {
            b.iter(|| build_series(black_box(input), Granularity::Monthly).unwrap())
        });
    }
    group.finish();
}

fn bench_render_series(c: &mut Criterion) {
    let series = build_series(&rows(365), Granularity::Daily).unwrap();
    c.bench_function("render_series/daily_365", |b| {
        b.iter(|| render_series(black_box(&series)))
    });
}

criterion_group!(benches, bench_build_series, bench_render_series);
criterion_main!(benches);
