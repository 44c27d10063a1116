//! Feature encoding benchmark: 40320-row series -> 57-feature vector.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mci_predictor::features::{Demographics, FeatureEncoder};
use mci_predictor::series::{RawSeries, N_CHANNELS, N_ROWS};
use ndarray::Array2;
use rand::Rng;

fn synthetic_series() -> RawSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let timestamps = (0..N_ROWS)
        .map(|i| start + Duration::minutes(i as i64))
        .collect();
    let mut rng = rand::thread_rng();
    let channels = Array2::from_shape_fn((N_ROWS, N_CHANNELS), |_| {
        if rng.gen_bool(0.3) {
            1.0
        } else {
            0.0
        }
    });
    RawSeries {
        timestamps,
        channels,
    }
}

fn bench_encode(c: &mut Criterion) {
    let series = synthetic_series();
    let demo = Demographics::from_raw(70, 0, 12, 1).unwrap();
    let encoder = FeatureEncoder::new();

    c.bench_function("encode_full_series", |b| {
        b.iter(|| black_box(encoder.encode(&demo, black_box(&series)).unwrap()))
    });
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
