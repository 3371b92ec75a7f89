//! Yahoo Finance as the market-data provider.
//!
//! History comes from the public chart endpoint. The info record comes from
//! quoteSummary, which wants a session cookie and a matching crumb token.
pub mod schema;

use reqwest::Client;

use crate::analyzer::MarketData;
use crate::config::{Config, Provider};
use crate::engine;
use crate::error::AnalyzerError;
use crate::result::Result;
use crate::schema::{InfoRecord, Period, PriceTable, Ticker};
use self::schema::{ChartResponse, SummaryResponse};

const INTERVAL: &str = "1d";
const EVENTS: &str = "div|split";
const MODULES: &str = "price,summaryProfile,summaryDetail,financialData";

pub struct YahooClient {
    client: Client,
    provider: Provider,
    user_agent: String,
    auto_adjust: bool,
}

impl YahooClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(YahooClient {
            client: engine::build_client(config)?,
            provider: config.provider.clone(),
            user_agent: config.auth.user_agent.clone(),
            auto_adjust: config.history.auto_adjust,
        })
    }

    fn chart_url(&self, ticker: &Ticker) -> String {
        format!("{}/{}", self.provider.chart_url.trim_end_matches('/'), ticker)
    }

    fn summary_url(&self, ticker: &Ticker) -> String {
        format!("{}/{}", self.provider.summary_url.trim_end_matches('/'), ticker)
    }

    // session handshake: the cookie endpoint answers 404 but still sets the cookie
    async fn crumb(&self) -> Result<String> {
        if let Err(e) =
            engine::get_text(&self.client, &self.provider.cookie_url, &self.user_agent, &[]).await
        {
            log::debug!("cookie request failed, trying crumb anyway: {e}");
        }

        let (status, body) =
            engine::get_text(&self.client, &self.provider.crumb_url, &self.user_agent, &[])
                .await?;
        let crumb = body.trim();
        if !status.is_success() || crumb.is_empty() || crumb.contains('<') {
            return Err(AnalyzerError::DataUnavailable(format!(
                "could not obtain a session crumb (status {status})"
            )));
        }
        Ok(crumb.to_string())
    }
}

impl MarketData for YahooClient {
    async fn history(&self, ticker: &Ticker, period: Period) -> Result<PriceTable> {
        let range = period.to_string();
        let query = [
            ("range", range.as_str()),
            ("interval", INTERVAL),
            ("events", EVENTS),
            ("includeAdjustedClose", "true"),
        ];
        let response: ChartResponse =
            engine::get_json(&self.client, &self.chart_url(ticker), &self.user_agent, &query)
                .await
                .map_err(|e| with_ticker(e, ticker))?;

        let table = response.into_price_table(ticker, self.auto_adjust)?;
        log::debug!("{}: {} daily records for {}", ticker, table.len(), period);
        Ok(table)
    }

    async fn info(&self, ticker: &Ticker) -> Result<InfoRecord> {
        let crumb = self.crumb().await?;
        let query = [("modules", MODULES), ("crumb", crumb.as_str())];
        let response: SummaryResponse =
            engine::get_json(&self.client, &self.summary_url(ticker), &self.user_agent, &query)
                .await
                .map_err(|e| with_ticker(e, ticker))?;

        response.into_info_record(ticker)
    }
}

fn with_ticker(err: AnalyzerError, ticker: &Ticker) -> AnalyzerError {
    match err {
        AnalyzerError::DataUnavailable(msg) => {
            AnalyzerError::DataUnavailable(format!("{ticker}: {msg}"))
        }
        other => other,
    }
}
