//! Shape and coverage checks on the raw series. Runs before any feature
//! work; a rejected series never reaches the encoder.

use super::{
    RawSeries, COMPLETENESS_THRESHOLD, MAX_DEFICIENT_DAYS, MINUTES_PER_DAY, N_DAYS, N_ROWS,
};
use crate::error::{PredictorError, Result};

/// Per-day missing-reading allowance: 1440 * (1 - 0.95) = 72.
const DAILY_MISSING_LIMIT: usize = (MINUTES_PER_DAY as f64 * (1.0 - COMPLETENESS_THRESHOLD)) as usize;

pub struct SeriesValidator;

impl SeriesValidator {
    pub fn new() -> Self {
        Self
    }

    /// Checks row count, primary-channel completeness, and per-day coverage.
    /// Performs no mutation; on success the series passes through unchanged.
    pub fn validate(&self, series: &RawSeries) -> Result<()> {
        if series.rows() == 0 {
            return Err(PredictorError::SeriesEmpty);
        }
        if series.rows() != N_ROWS || series.channels.nrows() != N_ROWS {
            return Err(PredictorError::SeriesFormat(format!(
                "series has {} rows, expected {N_ROWS}",
                series.rows()
            )));
        }

        let primary = series.channels.column(0);
        let missing = primary.iter().filter(|v| v.is_nan()).count();
        let completeness = (N_ROWS - missing) as f64 / N_ROWS as f64;
        if completeness < COMPLETENESS_THRESHOLD {
            return Err(PredictorError::SeriesShortage(format!(
                "completeness is {completeness:.3}, expected >= {COMPLETENESS_THRESHOLD}"
            )));
        }

        let deficient_days = (0..N_DAYS)
            .filter(|&day| {
                let start = day * MINUTES_PER_DAY;
                let missing_in_day = primary
                    .slice(ndarray::s![start..start + MINUTES_PER_DAY])
                    .iter()
                    .filter(|v| v.is_nan())
                    .count();
                missing_in_day > DAILY_MISSING_LIMIT
            })
            .count();
        if deficient_days > MAX_DEFICIENT_DAYS {
            return Err(PredictorError::SeriesShortage(format!(
                "{deficient_days} deficient days, at most {MAX_DEFICIENT_DAYS} allowed"
            )));
        }

        Ok(())
    }
}

impl Default for SeriesValidator {
    fn default() -> Self {
        Self::new()
    }
}
