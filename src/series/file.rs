//! CSV-backed series source. Column selection is header-driven so snapshot
//! files may carry extra appliance columns (e.g. refrigerator) that the
//! model does not consume.

use super::{RawSeries, SeriesSource, CHANNEL_COLUMNS, N_CHANNELS, TIMESTAMP_COLUMN};
use crate::error::{PredictorError, Result};
use chrono::NaiveDateTime;
use ndarray::Array2;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y/%m/%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

pub struct CsvSeriesSource {
    path: PathBuf,
}

impl CsvSeriesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(ts);
        }
    }
    Err(PredictorError::SeriesFormat(format!(
        "unparsable timestamp: {raw:?}"
    )))
}

fn parse_indicator(raw: &str, row: usize, column: &str) -> Result<f64> {
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>().map_err(|_| {
        PredictorError::SeriesFormat(format!(
            "row {row}: unparsable value {raw:?} in column {column}"
        ))
    })
}

impl SeriesSource for CsvSeriesSource {
    fn load(&self) -> Result<RawSeries> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            if e.is_io_error() {
                PredictorError::SeriesNotFound(self.path.display().to_string())
            } else {
                PredictorError::SeriesFormat(e.to_string())
            }
        })?;

        let headers = reader
            .headers()
            .map_err(|e| PredictorError::SeriesFormat(e.to_string()))?
            .clone();
        let position = |name: &str| -> Result<usize> {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                PredictorError::SeriesFormat(format!("missing required column: {name}"))
            })
        };
        let ts_idx = position(TIMESTAMP_COLUMN)?;
        let mut channel_idx = [0usize; N_CHANNELS];
        for (i, name) in CHANNEL_COLUMNS.iter().enumerate() {
            channel_idx[i] = position(name)?;
        }

        let mut timestamps = Vec::new();
        let mut values: Vec<f64> = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| PredictorError::SeriesFormat(e.to_string()))?;
            let raw_ts = record.get(ts_idx).ok_or_else(|| {
                PredictorError::SeriesFormat(format!("row {row}: short record"))
            })?;
            timestamps.push(parse_timestamp(raw_ts)?);
            for (i, &idx) in channel_idx.iter().enumerate() {
                let cell = record.get(idx).ok_or_else(|| {
                    PredictorError::SeriesFormat(format!("row {row}: short record"))
                })?;
                values.push(parse_indicator(cell, row, CHANNEL_COLUMNS[i])?);
            }
        }

        if timestamps.is_empty() {
            return Err(PredictorError::SeriesEmpty);
        }

        let channels = Array2::from_shape_vec((timestamps.len(), N_CHANNELS), values)
            .map_err(|e| PredictorError::SeriesFormat(e.to_string()))?;
        Ok(RawSeries {
            timestamps,
            channels,
        })
    }
}
