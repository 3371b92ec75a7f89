use reqwest::{header, Client};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::AnalyzerError;
use crate::result::Result;

// GENERALISED FUNCTIONS

// one client per run; the cookie store carries the provider's session between calls
pub fn build_client(config: &Config) -> Result<Client> {
    Client::builder()
        .timeout(config.http.timeout())
        .cookie_store(true)
        .build()
        .map_err(|e| AnalyzerError::DataUnavailable(format!("could not build HTTP client: {e}")))
}

// GET a url, returning the status and the raw body
pub async fn get_text(
    client: &Client,
    url: &str,
    user_agent: &str,
    query: &[(&str, &str)],
) -> Result<(reqwest::StatusCode, String)> {
    log::debug!("Requesting {} ...", url);
    let response = client
        .get(url)
        .header(header::USER_AGENT, user_agent)
        .query(query)
        .send()
        .await
        .map_err(|e| AnalyzerError::DataUnavailable(format!("request to {url} failed: {e}")))?;

    // status has to be read before the body consumes the response
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        AnalyzerError::DataUnavailable(format!("unable to read body from {url}; status {status}: {e}"))
    })?;
    Ok((status, body))
}

// GET a url and decode the body to type T
// the provider puts a JSON error object in 4xx bodies, so decoding is tried whatever the status
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    user_agent: &str,
    query: &[(&str, &str)],
) -> Result<T> {
    let (status, body) = get_text(client, url, user_agent, query).await?;
    decode_json(&body, status)
}

pub fn decode_json<T: DeserializeOwned>(body: &str, status: reqwest::StatusCode) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        if status.is_success() {
            AnalyzerError::DataUnavailable(format!("malformed provider response: {e}"))
        } else {
            AnalyzerError::DataUnavailable(format!("provider returned status {status}"))
        }
    })
}
