//! Error type for the analyzer.
//!
//! `DataUnavailable` and `EmptyResult` are the two failures the provider can
//! produce; the remaining variants cover local input, config and output.
use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Ticker unknown to the provider, provider unreachable, or an unreadable response.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// The provider answered, but with nothing to work on.
    #[error("Empty result: {0}")]
    EmptyResult(String),

    #[error("Invalid ticker: {0:?}")]
    InvalidTicker(String),

    #[error("Invalid period: {0:?} (expected one of 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)")]
    InvalidPeriod(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure inside the chart backend; plotters errors are generic over the backend so only the message is kept.
    #[error("Chart error: {0}")]
    Chart(String),
}
