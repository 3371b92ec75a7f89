use std::io::Write;

use crate::error::AnalyzerError;
use crate::result::Result;
use crate::schema::{Period, PriceTable};

/// Mean/max/min of the close column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}

pub fn summarize(table: &PriceTable) -> Result<Summary> {
    if table.is_empty() {
        return Err(AnalyzerError::EmptyResult(format!(
            "{}: no closing prices to summarize",
            table.ticker()
        )));
    }

    let (sum, max, min) = table.closes().fold(
        (0.0, f64::NEG_INFINITY, f64::INFINITY),
        |(sum, max, min), close| (sum + close, max.max(close), min.min(close)),
    );
    let count = table.len();
    // clamp: float summation can put the mean a hair outside [min, max]
    let mean = (sum / count as f64).clamp(min, max);

    Ok(Summary { mean, max, min, count })
}

/// Write the "=== Additional Analysis ===" section.
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary, period: Period) -> Result<()> {
    let window = period.describe();
    writeln!(out, "\n=== Additional Analysis ===")?;
    writeln!(out, "Average Closing Price ({window}): {:.2} USD", summary.mean)?;
    writeln!(out, "Highest Closing Price ({window}): {:.2} USD", summary.max)?;
    writeln!(out, "Lowest Closing Price ({window}): {:.2} USD", summary.min)?;
    Ok(())
}
