//! Full pipeline benchmark: series validation through fused score, with a
//! reduced-cardinality model store so the harness stays fast.

use chrono::{Duration as ChronoDuration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mci_predictor::error::ModelFamily;
use mci_predictor::features::{RAW_FEATURE_LEN, SANITIZER};
use mci_predictor::model::{Ensemble, GbdtModel, LogisticModel, ModelStore, StandardScaler};
use mci_predictor::predictor::Predictor;
use mci_predictor::series::{RawSeries, SeriesSource, N_CHANNELS, N_ROWS};
use ndarray::Array2;
use std::time::Duration;

struct FixedSource(RawSeries);

impl SeriesSource for FixedSource {
    fn load(&self) -> mci_predictor::error::Result<RawSeries> {
        Ok(self.0.clone())
    }
}

fn synthetic_series() -> RawSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let timestamps = (0..N_ROWS)
        .map(|i| start + ChronoDuration::minutes(i as i64))
        .collect();
    let channels = Array2::from_shape_fn((N_ROWS, N_CHANNELS), |(r, c)| ((r + c) % 3 == 0) as u8 as f64);
    RawSeries {
        timestamps,
        channels,
    }
}

fn stump_json() -> GbdtModel {
    serde_json::from_str(
        r#"{
            "num_features": 15,
            "trees": [{
                "split_feature": [0],
                "threshold": [1e9],
                "left_child": [-1],
                "right_child": [-2],
                "leaf_value": [0.1, 0.1]
            }]
        }"#,
    )
    .unwrap()
}

fn small_store(n_tree: usize, n_logistic: usize) -> ModelStore {
    let tree_scaler =
        StandardScaler::new(vec![0.0; RAW_FEATURE_LEN], vec![1.0; RAW_FEATURE_LEN]).unwrap();
    let tree = Ensemble::new(
        ModelFamily::Tree,
        (0..n_tree).map(|_| stump_json()).collect(),
        tree_scaler,
        Some(SANITIZER.to_vec()),
        n_tree,
    )
    .unwrap();
    let logistic_scaler = StandardScaler::new(vec![0.0; 4], vec![1.0; 4]).unwrap();
    let logistic = Ensemble::new(
        ModelFamily::Logistic,
        (0..n_logistic)
            .map(|_| LogisticModel::new(vec![0.01, 0.02, 0.03, 0.04], -0.5))
            .collect(),
        logistic_scaler,
        None,
        n_logistic,
    )
    .unwrap();
    ModelStore { tree, logistic }
}

fn bench_calculate_score(c: &mut Criterion) {
    let predictor = Predictor::new(small_store(50, 10), Duration::from_secs(5)).unwrap();
    let source = FixedSource(synthetic_series());

    c.bench_function("calculate_score_production", |b| {
        b.iter(|| {
            black_box(
                predictor
                    .calculate_score(70, 0, 12, 1, &source, false)
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_calculate_score);
criterion_main!(benches);
