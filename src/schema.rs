use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::error::AnalyzerError;

// TICKER
// ============================================

/// Exchange symbol, always stored uppercase (e.g., "AAPL", "BRK-B", "^GSPC")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = AnalyzerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let symbol = raw.trim().to_uppercase();
        // the symbol ends up in a URL path, so keep to what the provider actually lists
        let valid = !symbol.is_empty()
            && symbol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
        if valid {
            Ok(Ticker(symbol))
        } else {
            Err(AnalyzerError::InvalidTicker(raw.to_string()))
        }
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// PERIOD
// ============================================

/// History window, named by the provider's range tokens
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize,
)]
pub enum Period {
    #[strum(serialize = "1d")]
    #[serde(rename = "1d")]
    OneDay,
    #[strum(serialize = "5d")]
    #[serde(rename = "5d")]
    FiveDays,
    #[strum(serialize = "1mo")]
    #[serde(rename = "1mo")]
    OneMonth,
    #[strum(serialize = "3mo")]
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[strum(serialize = "6mo")]
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[strum(serialize = "1y")]
    #[serde(rename = "1y")]
    OneYear,
    #[strum(serialize = "2y")]
    #[serde(rename = "2y")]
    TwoYears,
    #[strum(serialize = "5y")]
    #[serde(rename = "5y")]
    FiveYears,
    #[strum(serialize = "10y")]
    #[serde(rename = "10y")]
    TenYears,
    #[strum(serialize = "ytd")]
    #[serde(rename = "ytd")]
    YearToDate,
    #[strum(serialize = "max")]
    #[serde(rename = "max")]
    Max,
}

impl Period {
    /// Parse a range token, mapping failures onto the crate error.
    pub fn parse_token(token: &str) -> Result<Self, AnalyzerError> {
        token
            .trim()
            .parse()
            .map_err(|_| AnalyzerError::InvalidPeriod(token.to_string()))
    }

    /// Label used in the analysis section, e.g. "Last Year".
    pub fn describe(&self) -> &'static str {
        match self {
            Period::OneDay => "Last Day",
            Period::FiveDays => "Last 5 Days",
            Period::OneMonth => "Last Month",
            Period::ThreeMonths => "Last 3 Months",
            Period::SixMonths => "Last 6 Months",
            Period::OneYear => "Last Year",
            Period::TwoYears => "Last 2 Years",
            Period::FiveYears => "Last 5 Years",
            Period::TenYears => "Last 10 Years",
            Period::YearToDate => "Year to Date",
            Period::Max => "All Time",
        }
    }
}

// PRICE TABLE
// ============================================

/// One trading day (OHLCV)
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Daily records for one ticker, oldest first. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    ticker: Ticker,
    records: Vec<PriceRecord>,
}

impl PriceTable {
    /// Sorts by date; on a repeated date the later row wins.
    pub fn new(ticker: Ticker, mut records: Vec<PriceRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        let before = records.len();
        records.reverse();
        records.dedup_by_key(|r| r.date);
        records.reverse();
        if records.len() != before {
            log::warn!(
                "{}: dropped {} duplicate trading date(s)",
                ticker,
                before - records.len()
            );
        }
        PriceTable { ticker, records }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The "close" column, in chronological order.
    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.close)
    }
}

// INFO RECORD
// ============================================

/// Descriptive snapshot of a security; every field may legitimately be missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoRecord {
    pub long_name: Option<String>,
    pub sector: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<u64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub dividend_yield: Option<f64>,
}
