use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::result::Result;
use crate::schema::{Period, Ticker};

pub const PROMPT: &str = "Enter the stock ticker (e.g., SOFI, MSFT, GOOGL, AAPL, NVDA): ";

/// Prints a stock's profile and closing-price statistics, and charts its closing price.
#[derive(Parser, Debug)]
#[command(name = "stock-analyzer", version, about)]
pub struct Args {
    /// Ticker to analyze; prompted for on stdin when omitted
    pub ticker: Option<String>,

    /// History window (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)
    #[arg(short, long, value_parser = Period::parse_token)]
    pub period: Option<Period>,

    /// TOML config file
    #[arg(short, long, env = "STOCK_ANALYZER_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Directory for the chart, overriding `[chart] output_dir`
    #[arg(long)]
    pub chart_dir: Option<PathBuf>,
}

/// Ask for a ticker on `input`, echoing the prompt to `output`.
pub fn prompt_ticker<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Ticker> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    line.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzerError;
    use std::io::Cursor;

    #[test]
    fn prompt_uppercases_input() {
        let mut input = Cursor::new("nvda\n");
        let mut output = Vec::new();
        let ticker = prompt_ticker(&mut input, &mut output).unwrap();
        assert_eq!(ticker.as_str(), "NVDA");
        assert_eq!(String::from_utf8(output).unwrap(), PROMPT);
    }

    #[test]
    fn blank_answer_is_invalid() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        assert!(matches!(
            prompt_ticker(&mut input, &mut output),
            Err(AnalyzerError::InvalidTicker(_))
        ));
    }

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from(["stock-analyzer", "msft", "--period", "6mo", "--chart-dir", "out"])
            .unwrap();
        assert_eq!(args.ticker.as_deref(), Some("msft"));
        assert_eq!(args.period, Some(Period::SixMonths));
        assert_eq!(args.chart_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn no_arguments_means_prompt() {
        let args = Args::try_parse_from(["stock-analyzer"]).unwrap();
        assert!(args.ticker.is_none());
        assert!(args.period.is_none());
    }

    #[test]
    fn bad_period_lists_the_valid_tokens() {
        let err = Args::try_parse_from(["stock-analyzer", "--period", "1week"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid period: \"1week\""), "{message}");
        assert!(message.contains("expected one of 1d, 5d, 1mo"), "{message}");
    }
}
