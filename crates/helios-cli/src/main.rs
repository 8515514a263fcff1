//! Helios batch CLI
//!
//! Analyses each ticker in turn, writes one JSON report per ticker and a
//! portfolio summary at the end. Individual ticker failures are printed and
//! recorded but never change the exit status.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use agent_runtime::{LlmProvider, OllamaProvider};
use clap::Parser;
use helios::{
    DEFAULT_TICKER, HeliosConfig, MockPriceFetcher, PriceFetcher, Runner, TickerOutcome,
    YahooPriceFetcher,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "helios", author, version, about, long_about = None)]
struct Args {
    /// Tickers to analyse
    #[arg(value_name = "TICKER")]
    tickers: Vec<String>,

    /// Directory reports are written to
    #[arg(long, env = "HELIOS_REPORTS_DIR")]
    reports_dir: Option<PathBuf>,

    /// LLM model served by Ollama
    #[arg(long, env = "HELIOS_MODEL")]
    model: Option<String>,

    /// Use deterministic offline prices instead of Yahoo Finance
    #[arg(long)]
    mock_market: bool,
}

/// Load `.env` (or `env_file`) before reading `RUST_LOG`
fn log_filter(env_file: Option<&Path>, default: &str) -> EnvFilter {
    if let Some(path) = env_file {
        dotenvy::from_path(path).ok();
    } else {
        dotenvy::dotenv().ok();
    }
    EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(log_filter(None, "info"))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = HeliosConfig::from_env()?;
    if let Some(dir) = args.reports_dir {
        config = config.with_reports_dir(dir);
    }
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    config.validate()?;

    let tickers: Vec<String> = if args.tickers.is_empty() {
        vec![DEFAULT_TICKER.to_string()]
    } else {
        args.tickers
    };

    let provider = Arc::new(OllamaProvider::from_env()?);
    if !provider.health_check().await.unwrap_or(false) {
        tracing::warn!("⚠ Ollama not available - agent stages will fail");
        tracing::warn!("  Make sure Ollama is running: ollama serve");
    }

    let fetcher: Arc<dyn PriceFetcher> = if args.mock_market {
        Arc::new(MockPriceFetcher::new())
    } else {
        Arc::new(YahooPriceFetcher::new()?)
    };

    let runner = Runner::new(config, fetcher, provider)?;

    println!(
        "\n☀️ HELIOS AI — Portfolio Analysis for {}",
        tickers.join(", ")
    );

    let batch = runner
        .run_batch(&tickers, |outcome| match outcome {
            TickerOutcome::Success(record) => println!("✅ {} report saved", record.ticker),
            TickerOutcome::Failure(failure) => {
                println!("❌ Error processing {}: {}", failure.ticker, failure.reason);
            }
        })
        .await?;

    println!(
        "\n📁 Portfolio summary saved to {}",
        batch.summary_file.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_can_come_from_env_file() {
        let tmp = tempfile::tempdir().unwrap();
        // dotenvy never overrides a variable the shell already set
        let preset = std::env::var("RUST_LOG").ok();

        let filter = log_filter(Some(&tmp.path().join("absent.env")), "warn");
        let expected = preset.clone().unwrap_or_else(|| "warn".into());
        assert_eq!(filter.to_string(), EnvFilter::new(expected).to_string());

        let env_file = tmp.path().join(".env");
        std::fs::write(&env_file, "RUST_LOG=helios=trace\n").unwrap();
        let filter = log_filter(Some(&env_file), "info");
        let expected = preset.unwrap_or_else(|| "helios=trace".into());
        assert_eq!(filter.to_string(), EnvFilter::new(expected).to_string());
    }
}
