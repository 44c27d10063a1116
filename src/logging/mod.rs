//! Structured JSON logging for the prediction pipeline.

mod format;

pub use format::{LogEvent, StructuredLogger};
