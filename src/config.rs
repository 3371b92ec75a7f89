use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::result::Result;
use crate::schema::Period;

/// Config file read when neither `--config` nor `STOCK_ANALYZER_CONFIG` is set
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auth: Auth,
    pub provider: Provider,
    pub http: Http,
    pub history: History,
    pub chart: Chart,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Auth {
    pub user_agent: String,
}

impl Default for Auth {
    fn default() -> Self {
        Auth {
            // the provider answers 429 to non-browser agents
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Provider {
    pub chart_url: String,
    pub summary_url: String,
    pub crumb_url: String,
    pub cookie_url: String,
}

impl Default for Provider {
    fn default() -> Self {
        Provider {
            chart_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
            summary_url: "https://query2.finance.yahoo.com/v10/finance/quoteSummary".to_string(),
            crumb_url: "https://query1.finance.yahoo.com/v1/test/getcrumb".to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Http {
    pub timeout_secs: u64,
}

impl Http {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Http {
    fn default() -> Self {
        Http { timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct History {
    pub period: Period,
    /// Replace close with adjusted close and scale open/high/low to match
    pub auto_adjust: bool,
}

impl Default for History {
    fn default() -> Self {
        History {
            period: Period::OneYear,
            auto_adjust: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Chart {
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for Chart {
    fn default() -> Self {
        Chart {
            output_dir: PathBuf::from("."),
            width: 1000,
            height: 600,
        }
    }
}

/// Load the TOML config at `path`. A missing file means defaults; a broken one is an error.
pub fn load_toml(path: &Path) -> Result<Config> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("Config file {} not found; using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}
