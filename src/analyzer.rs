//! The fetch → report → plot → summarize pipeline.
use std::io::Write;
use std::path::PathBuf;

use crate::chart;
use crate::config::Chart;
use crate::report;
use crate::result::Result;
use crate::schema::{InfoRecord, Period, PriceTable, Ticker};
use crate::summary::{self, Summary};

/// Source of prices and descriptive data for a ticker.
#[allow(async_fn_in_trait)]
pub trait MarketData {
    /// Daily OHLCV records over `period`, oldest first.
    async fn history(&self, ticker: &Ticker, period: Period) -> Result<PriceTable>;

    /// Descriptive snapshot; absent fields are `None`, never an error.
    async fn info(&self, ticker: &Ticker) -> Result<InfoRecord>;
}

#[derive(Debug)]
pub struct Outcome {
    pub summary: Summary,
    pub chart: PathBuf,
}

// both fetches happen before anything is written, so a bad ticker leaves `out` untouched
pub async fn run<P: MarketData, W: Write>(
    provider: &P,
    ticker: &Ticker,
    period: Period,
    chart_config: &Chart,
    out: &mut W,
) -> Result<Outcome> {
    let table = provider.history(ticker, period).await?;
    let info = provider.info(ticker).await?;

    report::write_info(out, &info)?;

    let chart = chart::plot(&table, ticker, chart_config)?;

    let summary = summary::summarize(&table)?;
    summary::write_summary(out, &summary, period)?;
    out.flush()?;

    Ok(Outcome { summary, chart })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzerError;
    use crate::schema::PriceRecord;
    use chrono::{Duration, NaiveDate};

    struct Stub {
        closes: Option<Vec<f64>>,
        info: InfoRecord,
    }

    impl MarketData for Stub {
        async fn history(&self, ticker: &Ticker, _period: Period) -> Result<PriceTable> {
            let Some(closes) = &self.closes else {
                return Err(AnalyzerError::DataUnavailable(format!(
                    "{ticker}: No data found, symbol may be delisted"
                )));
            };
            if closes.is_empty() {
                return Err(AnalyzerError::EmptyResult(ticker.to_string()));
            }
            let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
            let records = closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PriceRecord {
                    date: start + Duration::days(i as i64),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1,
                })
                .collect();
            Ok(PriceTable::new(ticker.clone(), records))
        }

        async fn info(&self, _ticker: &Ticker) -> Result<InfoRecord> {
            Ok(self.info.clone())
        }
    }

    fn chart_config(dir: &std::path::Path) -> Chart {
        Chart {
            output_dir: dir.to_path_buf(),
            ..Chart::default()
        }
    }

    #[tokio::test]
    async fn full_run_writes_both_sections() {
        let dir = tempfile::tempdir().unwrap();
        let stub = Stub {
            closes: Some(vec![181.91, 185.64, 184.25]),
            info: InfoRecord {
                long_name: Some("Apple Inc.".into()),
                ..InfoRecord::default()
            },
        };
        let ticker: Ticker = "aapl".parse().unwrap();
        let mut out = Vec::new();

        let outcome = run(&stub, &ticker, Period::OneYear, &chart_config(dir.path()), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let info_at = text.find("=== Stock Information ===").unwrap();
        let analysis_at = text.find("=== Additional Analysis ===").unwrap();
        assert!(info_at < analysis_at);
        assert!(text.contains("Name: Apple Inc.\n"));
        assert!(text.contains("Dividend Yield: N/A\n"));
        assert!(text.contains("Average Closing Price (Last Year): 183.93 USD"));
        assert!(text.contains("Highest Closing Price (Last Year): 185.64 USD"));
        assert!(text.contains("Lowest Closing Price (Last Year): 181.91 USD"));
        assert_eq!(outcome.summary.count, 3);
        assert!(outcome.summary.min <= outcome.summary.mean);
        assert!(outcome.summary.mean <= outcome.summary.max);
        assert!(outcome.chart.ends_with("AAPL_trend.svg"));
        assert!(outcome.chart.exists());
    }

    #[tokio::test]
    async fn unknown_ticker_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let stub = Stub { closes: None, info: InfoRecord::default() };
        let ticker: Ticker = "ZZZZINVALID".parse().unwrap();
        let mut out = Vec::new();

        let result = run(&stub, &ticker, Period::OneYear, &chart_config(dir.path()), &mut out).await;

        assert!(matches!(result, Err(AnalyzerError::DataUnavailable(_))));
        assert!(out.is_empty());
        assert!(!dir.path().join("ZZZZINVALID_trend.svg").exists());
    }

    #[tokio::test]
    async fn empty_history_is_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let stub = Stub { closes: Some(Vec::new()), info: InfoRecord::default() };
        let ticker: Ticker = "DLST".parse().unwrap();
        let mut out = Vec::new();

        let result = run(&stub, &ticker, Period::OneYear, &chart_config(dir.path()), &mut out).await;

        assert!(matches!(result, Err(AnalyzerError::EmptyResult(_))));
        assert!(out.is_empty());
    }
}
