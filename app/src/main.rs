// In app/src/main.rs

use anyhow::Result;
use api_client::{MarketDataClient, MarketDataSource};
use app_config::Settings;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use strategies::{Assessment, Strategy, TrendMomentum};
use tracing_subscriber::prelude::*;
use web_server::AppState;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "BUY/SELL/HOLD signals for forex pairs and crypto assets.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the web UI and JSON API (the default).
    Serve,

    /// Fetches one instrument, analyzes it and prints the signal.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct AnalyzeArgs {
    /// A forex pair in BASE/QUOTE form (e.g., "EUR/USD").
    #[arg(long)]
    forex: Option<String>,

    /// A CoinGecko coin id (e.g., "bitcoin").
    #[arg(long)]
    crypto: Option<String>,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);

    tracing::info!(environment = %settings.app.environment, "Starting signals application");

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(settings).await?,
        Commands::Analyze(args) => handle_analyze(settings, args).await?,
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new()
            .with_target("hyper_util", tracing::Level::WARN) // Connection pool chatter
            .with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn build_strategy(settings: &Settings) -> Result<TrendMomentum> {
    Ok(TrendMomentum::try_new(settings.strategy.clone())?)
}

// --- "Serve" Subcommand Logic ---

/// Builds the market data client and strategy, then serves the web UI.
/// Runs until the process receives Ctrl-C.
async fn run_server(settings: Settings) -> Result<()> {
    let client = api_client::new(&settings.market_data)?;
    let strategy = build_strategy(&settings)?;
    let app_state = AppState::new(Arc::new(client), strategy);

    web_server::run(settings.server, app_state).await?;
    Ok(())
}

// --- "Analyze" Subcommand Logic ---

/// Handles the logic for the `analyze` subcommand.
async fn handle_analyze(settings: Settings, args: AnalyzeArgs) -> Result<()> {
    let client = MarketDataClient::new(&settings.market_data)?;
    let strategy = build_strategy(&settings)?;

    let data = match (&args.forex, &args.crypto) {
        (Some(pair), _) => client.fetch_forex_series(pair).await,
        (None, Some(coin)) => client.fetch_crypto_series(coin).await,
        (None, None) => anyhow::bail!("Pass either --forex or --crypto."),
    };

    print_assessment(&strategy.evaluate(&data));
    Ok(())
}

/// Prints the signal the same way the web page shows it.
fn print_assessment(assessment: &Assessment) {
    println!("Signal: {}", assessment.signal);
    println!("{}", assessment.rationale);

    if let Some(snapshot) = &assessment.indicators {
        let show = |value: Option<f64>| value.map(|v| format!("{v:.4}")).unwrap_or_else(|| "n/a".into());
        println!(
            "  SMA fast: {} | SMA slow: {} | RSI: {}",
            show(snapshot.sma_fast),
            show(snapshot.sma_slow),
            show(snapshot.rsi)
        );
    }
}
