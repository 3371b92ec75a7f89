use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::config::Chart;
use crate::error::AnalyzerError;
use crate::result::Result;
use crate::schema::{PriceTable, Ticker};

const SERIES_LABEL: &str = "Closing Price";

fn chart_err<E: std::fmt::Display>(e: E) -> AnalyzerError {
    AnalyzerError::Chart(e.to_string())
}

pub fn chart_path(config: &Chart, ticker: &Ticker) -> PathBuf {
    config.output_dir.join(format!("{ticker}_trend.svg"))
}

/// Draw the closing-price line for `table` and write it as SVG; returns the file written.
pub fn plot(table: &PriceTable, ticker: &Ticker, config: &Chart) -> Result<PathBuf> {
    let (Some(first), Some(last)) = (table.records().first(), table.records().last()) else {
        return Err(AnalyzerError::EmptyResult(format!(
            "{ticker}: no closing prices to plot"
        )));
    };

    // a single day still needs a non-empty x range
    let start = first.date;
    let end = if last.date > start { last.date } else { start + Duration::days(1) };

    let (lo, hi) = table
        .closes()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| (lo.min(c), hi.max(c)));
    let pad = if hi > lo { (hi - lo) * 0.05 } else { lo.abs().max(1.0) * 0.05 };

    fs::create_dir_all(&config.output_dir)?;
    let path = chart_path(config, ticker);
    render(table, ticker, config, &path, start..end, (lo - pad)..(hi + pad))?;
    Ok(path)
}

fn render(
    table: &PriceTable,
    ticker: &Ticker,
    config: &Chart,
    path: &Path,
    x_range: Range<NaiveDate>,
    y_range: Range<f64>,
) -> Result<()> {
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{ticker} Stock Price Trend"), ("sans-serif", 24.0).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(chart_err)?;

    // mesh doubles as the grid
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Price (USD)")
        .x_labels(8)
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .y_label_formatter(&|p: &f64| format!("{p:.2}"))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            table.records().iter().map(|r| (r.date, r.close)),
            &BLUE,
        ))
        .map_err(chart_err)?
        .label(SERIES_LABEL)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PriceRecord;

    fn table(ticker: &Ticker, closes: &[f64]) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let records = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceRecord {
                date: start + Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 10,
            })
            .collect();
        PriceTable::new(ticker.clone(), records)
    }

    fn config(dir: &std::path::Path) -> Chart {
        Chart {
            output_dir: dir.join("charts"),
            ..Chart::default()
        }
    }

    #[test]
    fn writes_svg_named_after_ticker() {
        let dir = tempfile::tempdir().unwrap();
        let ticker: Ticker = "NVDA".parse().unwrap();
        let closes = [480.0, 495.2, 490.1, 502.7];
        let path = plot(&table(&ticker, &closes), &ticker, &config(dir.path())).unwrap();

        assert_eq!(path, dir.path().join("charts").join("NVDA_trend.svg"));
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("NVDA Stock Price Trend"));
        assert!(svg.contains("Closing Price"));
        assert!(svg.contains("Price (USD)"));
    }

    #[test]
    fn single_flat_record_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let ticker: Ticker = "SOFI".parse().unwrap();
        let path = plot(&table(&ticker, &[7.5]), &ticker, &config(dir.path())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn empty_table_is_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let ticker: Ticker = "SOFI".parse().unwrap();
        let result = plot(&table(&ticker, &[]), &ticker, &config(dir.path()));
        assert!(matches!(result, Err(AnalyzerError::EmptyResult(_))));
        assert!(!chart_path(&config(dir.path()), &ticker).exists());
    }
}
