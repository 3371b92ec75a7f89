use chrono::DateTime;
use serde::Deserialize;

use crate::error::AnalyzerError;
use crate::result::Result;
use crate::schema::{InfoRecord, PriceRecord, PriceTable, Ticker};

/*  PROVIDER QUIRKS
    ===============

    1) unknown symbols come back as 404 with a JSON body:
        {"chart": {"result": null, "error": {"code": "Not Found", "description": "..."}}}
        => `error` is checked before `result`

    2) any element of the quote arrays can be null (halted days, live row)
        => Vec<Option<f64>>; rows with a null price are dropped

    3) quoteSummary values are {"raw": 1.23, "fmt": "1.23"}, or {} when missing
        => Raw { raw: Option<f64> }
*/

#[derive(Debug, Deserialize)]
pub struct ProviderError {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl ProviderError {
    fn into_error(self, ticker: &Ticker) -> AnalyzerError {
        let detail = self
            .description
            .or(self.code)
            .unwrap_or_else(|| "unknown provider error".to_string());
        AnalyzerError::DataUnavailable(format!("{ticker}: {detail}"))
    }
}

// CHART (history)
// ============================================

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub struct ChartBody {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    /// seconds east of UTC for the listing exchange
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteColumns>,
    #[serde(default)]
    pub adjclose: Vec<AdjCloseColumn>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuoteColumns {
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
    pub volume: Vec<Option<u64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdjCloseColumn {
    pub adjclose: Vec<Option<f64>>,
}

impl ChartResponse {
    /// Build the price table. Provider errors become `DataUnavailable`, no usable rows `EmptyResult`.
    pub fn into_price_table(self, ticker: &Ticker, auto_adjust: bool) -> Result<PriceTable> {
        if let Some(error) = self.chart.error {
            return Err(error.into_error(ticker));
        }
        let result = self
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| {
                AnalyzerError::DataUnavailable(format!("{ticker}: provider returned no chart"))
            })?;

        let offset = result.meta.gmtoffset;
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
        let adjclose = result
            .indicators
            .adjclose
            .into_iter()
            .next()
            .unwrap_or_default()
            .adjclose;

        let mut records = Vec::with_capacity(result.timestamp.len());
        let mut skipped = 0usize;
        for (i, ts) in result.timestamp.iter().enumerate() {
            let column = |values: &[Option<f64>]| values.get(i).copied().flatten();
            let (Some(open), Some(high), Some(low), Some(close)) = (
                column(&quote.open),
                column(&quote.high),
                column(&quote.low),
                column(&quote.close),
            ) else {
                skipped += 1;
                continue;
            };
            // exchange-local calendar date
            let Some(date) = DateTime::from_timestamp(ts + offset, 0).map(|dt| dt.date_naive())
            else {
                skipped += 1;
                continue;
            };
            let volume = quote.volume.get(i).copied().flatten().unwrap_or(0);

            let mut record = PriceRecord { date, open, high, low, close, volume };
            if auto_adjust {
                if let Some(adj) = column(&adjclose) {
                    adjust(&mut record, adj);
                }
            }
            records.push(record);
        }
        if skipped > 0 {
            log::debug!("{ticker}: skipped {skipped} incomplete row(s)");
        }

        if records.is_empty() {
            return Err(AnalyzerError::EmptyResult(format!(
                "{ticker}: provider returned no price records"
            )));
        }
        Ok(PriceTable::new(ticker.clone(), records))
    }
}

// scale the whole bar by adjclose/close so it lines up with the adjusted close
fn adjust(record: &mut PriceRecord, adj_close: f64) {
    if record.close == 0.0 {
        return;
    }
    let ratio = adj_close / record.close;
    record.open *= ratio;
    record.high *= ratio;
    record.low *= ratio;
    record.close = adj_close;
}

// QUOTE SUMMARY (info)
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub quote_summary: SummaryBody,
}

#[derive(Debug, Deserialize)]
pub struct SummaryBody {
    pub result: Option<Vec<SummaryResult>>,
    pub error: Option<ProviderError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryResult {
    pub price: Option<PriceModule>,
    pub summary_profile: Option<SummaryProfile>,
    pub summary_detail: Option<SummaryDetail>,
    pub financial_data: Option<FinancialData>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Raw {
    pub raw: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceModule {
    pub long_name: Option<String>,
    pub market_cap: Option<Raw>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SummaryProfile {
    pub sector: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryDetail {
    pub market_cap: Option<Raw>,
    pub fifty_two_week_high: Option<Raw>,
    pub fifty_two_week_low: Option<Raw>,
    pub dividend_yield: Option<Raw>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialData {
    pub current_price: Option<Raw>,
}

fn raw(value: Option<Raw>) -> Option<f64> {
    value.and_then(|v| v.raw).filter(|v| v.is_finite())
}

impl SummaryResponse {
    pub fn into_info_record(self, ticker: &Ticker) -> Result<InfoRecord> {
        if let Some(error) = self.quote_summary.error {
            return Err(error.into_error(ticker));
        }
        let result = self
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| {
                AnalyzerError::DataUnavailable(format!("{ticker}: provider returned no summary"))
            })?;

        let price = result.price.unwrap_or_default();
        let profile = result.summary_profile.unwrap_or_default();
        let detail = result.summary_detail.unwrap_or_default();
        let financial = result.financial_data.unwrap_or_default();

        let market_cap = raw(detail.market_cap)
            .or_else(|| raw(price.market_cap))
            .filter(|v| *v >= 0.0)
            .map(|v| v.round() as u64);

        Ok(InfoRecord {
            long_name: price.long_name,
            sector: profile.sector,
            current_price: raw(financial.current_price),
            market_cap,
            fifty_two_week_high: raw(detail.fifty_two_week_high),
            fifty_two_week_low: raw(detail.fifty_two_week_low),
            dividend_yield: raw(detail.dividend_yield),
        })
    }
}
