//! Performance benchmarks for dashboard rendering
//!
//! Measures view building and full-frame drawing for forecast series of
//! increasing length.
//! Run with: cargo bench

use aqdash::models::{AirQualityReading, ForecastPoint, ForecastSeries, Measurement};
use aqdash::ui::view::build_view;
use aqdash::ui::{render_to_string, RenderOptions, StatusInfo};
use aqdash::view_model::FetchState;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Generate a forecast with a gentle daily wave
fn generate_series(points: usize) -> ForecastSeries {
    let points = (0..points)
        .map(|i| {
            let value = 12.0 + 4.0 * (i as f64 / 7.0).sin();
            let predicted = Measurement::from_f64(value).unwrap_or_else(|| Measurement::from(12));
            ForecastPoint::new(format!("2024-{:02}-{:02}", 1 + (i / 28) % 12, 1 + i % 28), predicted)
        })
        .collect();
    ForecastSeries::new(points)
}

fn reading() -> FetchState<AirQualityReading> {
    let reading = AirQualityReading::from_json(&serde_json::json!({
        "pm25": 12.3,
        "pm25_category": "Good",
        "o3": 0.04,
        "o3_category": "Moderate",
        "temperature": 72.5,
        "humidity": 40
    }))
    .unwrap();
    FetchState::Ready(reading)
}

/// Benchmark the pure state-to-view mapping
fn bench_build_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_view");
    let air = reading();

    for size in [7, 30, 365, 2000].iter() {
        let forecast = FetchState::Ready(generate_series(*size));
        let options = RenderOptions {
            selected_point: Some(size / 2),
            ..RenderOptions::default()
        };
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_points", size)),
            &forecast,
            |b, forecast| {
                b.iter(|| {
                    let view = build_view(black_box(&air), black_box(forecast), &options);
                    black_box(view)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark drawing a full frame into a test backend
fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    let air = reading();
    let status = StatusInfo {
        base_url: "http://127.0.0.1:8000".to_string(),
        ..StatusInfo::default()
    };

    for size in [7, 365, 2000].iter() {
        let forecast = FetchState::Ready(generate_series(*size));
        let view = build_view(&air, &forecast, &RenderOptions::default());

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_points", size)),
            &view,
            |b, view| {
                b.iter(|| {
                    let text = render_to_string(black_box(view), &status, 160, 48).unwrap();
                    black_box(text)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build_view, bench_render_frame);
criterion_main!(benches);
