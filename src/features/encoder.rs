//! Converts a validated series plus demographics into the two raw model
//! inputs: the 57-wide tree vector and the 4-wide logistic vector.

use super::{
    Demographics, LOGISTIC_FEATURE_LEN, NIGHTTIME_HOUR_0, NIGHTTIME_HOUR_1, RAW_FEATURE_LEN,
};
use crate::error::{PredictorError, Result};
use crate::series::{RawSeries, MINUTES_PER_DAY, N_CHANNELS, N_DAYS};
use chrono::Datelike;
use ndarray::s;
use std::f64::consts::TAU;

const MIDNIGHT_END: usize = NIGHTTIME_HOUR_0 * 60; // minute 300
const DAYTIME_END: usize = MINUTES_PER_DAY - NIGHTTIME_HOUR_1 * 60; // minute 1320

/// Raw (unscaled) feature vectors for one invocation.
#[derive(Debug, Clone)]
pub struct EncodedFeatures {
    pub tree_raw: Vec<f64>,
    pub logistic_raw: [f64; LOGISTIC_FEATURE_LEN],
}

pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, demo: &Demographics, series: &RawSeries) -> Result<EncodedFeatures> {
        let calendar = calendar_sum(series);
        let (daytime, midnight) = usage_counts(series)?;

        let mut usage = [0.0f64; 2 * N_CHANNELS];
        usage[..N_CHANNELS].copy_from_slice(&daytime);
        usage[N_CHANNELS..].copy_from_slice(&midnight);

        // behavioral(7) + calendar(2) + usage(16) + outer(calendar, usage)(32)
        let mut tree_raw = Vec::with_capacity(RAW_FEATURE_LEN);
        tree_raw.extend_from_slice(&demo.behavioral_flags());
        tree_raw.extend_from_slice(&calendar);
        tree_raw.extend_from_slice(&usage);
        for &c in &calendar {
            for &u in &usage {
                tree_raw.push(c * u);
            }
        }
        debug_assert_eq!(tree_raw.len(), RAW_FEATURE_LEN);

        Ok(EncodedFeatures {
            tree_raw,
            logistic_raw: demo.logistic_vector(),
        })
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sum of per-row `[cos, sin]` day-of-year encodings. The sum over all
/// 40320 rows, not a per-row value, is the calendar signal consumed
/// downstream.
fn calendar_sum(series: &RawSeries) -> [f64; 2] {
    let mut cos_sum = 0.0;
    let mut sin_sum = 0.0;
    for ts in &series.timestamps {
        let day = ts.date().ordinal0() as f64;
        let angle = TAU * day / 365.0;
        cos_sum += angle.cos();
        sin_sum += angle.sin();
    }
    [cos_sum, sin_sum]
}

/// Per-channel counts of strictly-positive readings in the daytime and
/// midnight windows. The two midnight slices (0:00-4:59 and 22:00-23:59)
/// form one bucket; NaN readings never count.
fn usage_counts(series: &RawSeries) -> Result<([f64; N_CHANNELS], [f64; N_CHANNELS])> {
    let days = series
        .channels
        .view()
        .into_shape((N_DAYS, MINUTES_PER_DAY, N_CHANNELS))
        .map_err(|e| PredictorError::Unexpected(format!("series reshape failed: {e}")))?;

    let mut daytime = [0.0f64; N_CHANNELS];
    let mut midnight = [0.0f64; N_CHANNELS];
    for ch in 0..N_CHANNELS {
        daytime[ch] = days
            .slice(s![.., MIDNIGHT_END..DAYTIME_END, ch])
            .iter()
            .filter(|&&v| v > 0.0)
            .count() as f64;
        let early = days
            .slice(s![.., ..MIDNIGHT_END, ch])
            .iter()
            .filter(|&&v| v > 0.0)
            .count();
        let late = days
            .slice(s![.., DAYTIME_END.., ch])
            .iter()
            .filter(|&&v| v > 0.0)
            .count();
        midnight[ch] = (early + late) as f64;
    }
    Ok((daytime, midnight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::testutil::{series_of_ones, series_with};
    use crate::series::N_ROWS;

    fn demographics() -> Demographics {
        Demographics::from_raw(70, 0, 12, 1).unwrap()
    }

    #[test]
    fn window_partition_is_exhaustive_and_disjoint() {
        let daytime_minutes = DAYTIME_END - MIDNIGHT_END;
        let midnight_minutes = MIDNIGHT_END + (MINUTES_PER_DAY - DAYTIME_END);
        assert_eq!(daytime_minutes + midnight_minutes, MINUTES_PER_DAY);
        assert_eq!(daytime_minutes, 1020);
        assert_eq!(midnight_minutes, 420);
    }

    #[test]
    fn all_on_series_counts_full_windows() {
        let (daytime, midnight) = usage_counts(&series_of_ones()).unwrap();
        for ch in 0..N_CHANNELS {
            assert_eq!(daytime[ch], (N_DAYS * 1020) as f64);
            assert_eq!(midnight[ch], (N_DAYS * 420) as f64);
        }
    }

    #[test]
    fn nan_and_zero_readings_never_count() {
        let series = series_with(|r, _| match r % 3 {
            0 => f64::NAN,
            1 => 0.0,
            _ => 1.0,
        });
        let (daytime, midnight) = usage_counts(&series).unwrap();
        let total: f64 = daytime[0] + midnight[0];
        let expected = (0..N_ROWS).filter(|r| r % 3 == 2).count() as f64;
        assert_eq!(total, expected);
    }

    #[test]
    fn calendar_sum_is_invariant_to_reordering_within_a_date() {
        let series = series_of_ones();
        let mut shuffled = series.clone();
        // Reverse the minutes of the first day; the date per row is unchanged.
        shuffled.timestamps[..MINUTES_PER_DAY].reverse();
        let a = calendar_sum(&series);
        let b = calendar_sum(&shuffled);
        assert!((a[0] - b[0]).abs() < 1e-9);
        assert!((a[1] - b[1]).abs() < 1e-9);
    }

    #[test]
    fn encode_produces_contract_widths_and_order() {
        let series = series_of_ones();
        let demo = demographics();
        let out = FeatureEncoder::new().encode(&demo, &series).unwrap();
        assert_eq!(out.tree_raw.len(), RAW_FEATURE_LEN);

        // behavioral flags lead the vector
        assert_eq!(out.tree_raw[0], 70.0);
        assert_eq!(out.tree_raw[2], 1.0); // is_female
        // interactions are outer(calendar, usage) flattened row-major
        let calendar = [out.tree_raw[7], out.tree_raw[8]];
        let usage: Vec<f64> = out.tree_raw[9..25].to_vec();
        for (i, &c) in calendar.iter().enumerate() {
            for (j, &u) in usage.iter().enumerate() {
                let got = out.tree_raw[25 + i * 16 + j];
                assert!((got - c * u).abs() < 1e-9);
            }
        }
        assert_eq!(out.logistic_raw, [70.0, 2.0, 1.0, 1.0]);
    }
}
