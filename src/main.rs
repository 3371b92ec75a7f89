pub mod analyzer;
pub mod args;
pub mod chart;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod result;
pub mod schema;
pub mod summary;
pub mod yahoo;

use anyhow::Context;
use clap::Parser;
use std::io;
use std::process::ExitCode;

use crate::args::Args;
use crate::schema::Ticker;
use crate::yahoo::YahooClient;

#[tokio::main]
async fn main() -> ExitCode {
    // .env may carry RUST_LOG / STOCK_ANALYZER_CONFIG
    dotenv::dotenv().ok();
    init_logger();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR! {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    // Load config variables
    let mut config = config::load_toml(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(dir) = args.chart_dir {
        config.chart.output_dir = dir;
    }
    let period = args.period.unwrap_or(config.history.period);

    println!("=== Stock Market Analyzer ===");
    let ticker: Ticker = match args.ticker {
        Some(raw) => raw.parse()?,
        None => args::prompt_ticker(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let client = YahooClient::new(&config)?;
    let mut stdout = io::stdout();
    let outcome = analyzer::run(&client, &ticker, period, &config.chart, &mut stdout)
        .await
        .with_context(|| format!("analysis of {ticker} failed"))?;
    log::info!(
        "{ticker}: {} closing prices over {period}; chart written to {}",
        outcome.summary.count,
        outcome.chart.display()
    );

    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
