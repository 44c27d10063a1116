//! Raw electricity series: per-minute appliance on/off indicators over
//! 28 days, plus the validator that gates all downstream feature work.

mod file;
mod validate;

pub use file::CsvSeriesSource;
pub use validate::SeriesValidator;

use crate::error::Result;
use chrono::NaiveDateTime;
use ndarray::Array2;

pub const N_DAYS: usize = 28;
pub const MINUTES_PER_DAY: usize = 1440;
pub const N_ROWS: usize = N_DAYS * MINUTES_PER_DAY; // 40320
pub const N_CHANNELS: usize = 8;

/// Required fraction of present readings on the primary channel.
pub const COMPLETENESS_THRESHOLD: f64 = 0.95;
/// Maximum tolerated number of deficient days out of 28.
pub const MAX_DEFICIENT_DAYS: usize = 25;

pub const TIMESTAMP_COLUMN: &str = "date_time_jst";
/// Indicator columns in model order. The first (air conditioner) is the
/// primary channel used for completeness accounting.
pub const CHANNEL_COLUMNS: [&str; N_CHANNELS] = [
    "air_conditioner",
    "clothes_washer",
    "microwave",
    "rice_cooker",
    "TV",
    "cleaner",
    "IH",
    "Heater",
];

/// Parsed series table: one timestamp per row plus an `(rows, 8)` matrix of
/// indicator values, with NaN standing in for missing readings.
#[derive(Debug, Clone)]
pub struct RawSeries {
    pub timestamps: Vec<NaiveDateTime>,
    pub channels: Array2<f64>,
}

impl RawSeries {
    pub fn rows(&self) -> usize {
        self.timestamps.len()
    }
}

/// Yields the raw series table. The predictor consumes it opaquely; how the
/// table is materialized (file, API snapshot, fixture) is the caller's
/// concern.
pub trait SeriesSource {
    fn load(&self) -> Result<RawSeries>;
}
