// src/main.rs

//! sentipulse: keyword sentiment ingester CLI
//!
//! Polls Twitter/X recent search for a configured keyword, classifies each
//! tweet's sentiment and stores it in PostgreSQL. `reanalyze` re-runs
//! classification over already-stored tweets instead of fetching new ones.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use sentipulse::config::{Config, DbConfig};
use sentipulse::context::AppContext;
use sentipulse::error::Result;
use sentipulse::pipeline::{run_ingest, run_reanalyze};
use sentipulse::services::{Classifier, InferenceApiModel, RecentSearchApi, TweetFetcher};
use sentipulse::storage::PgStore;

#[derive(Parser, Debug)]
#[command(
    name = "sentipulse",
    version,
    about = "Keyword sentiment ingester for Twitter/X"
)]
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the search endpoint and store classified tweets (runs until ctrl-c)
    Ingest,
    /// Re-run classification over tweets already in the database
    Reanalyze,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);

    if let Err(e) = config.validate() {
        error!("invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let db = DbConfig::from_env()?;
    let store = PgStore::connect(&db).await?;
    info!("connected to PostgreSQL database");

    // The token is only exercised in ingest mode; reanalysis never
    // touches the search endpoint.
    let bearer_token = match cli.command {
        Command::Ingest => sentipulse::config::require_env("BEARER_TOKEN")?,
        Command::Reanalyze => env::var("BEARER_TOKEN").unwrap_or_default(),
    };

    let model = InferenceApiModel::new(&config.classifier, config.fetch.timeout_secs)?;
    let classifier = Classifier::new(Box::new(model), config.classifier.max_input_chars);

    let api = RecentSearchApi::new(bearer_token, config.fetch.timeout_secs)?;
    let fetcher = TweetFetcher::new(Box::new(api), &config);

    let ctx = AppContext {
        store: Arc::new(store),
        classifier,
        fetcher,
        poll_interval: Duration::from_secs(config.search.poll_interval_secs),
    };

    let result = match cli.command {
        Command::Ingest => {
            info!("ingest mode: query {:?}", config.search.query);
            let shutdown = install_shutdown_flag();
            run_ingest(&ctx, &shutdown).await
        }
        Command::Reanalyze => {
            info!("reanalysis mode");
            run_reanalyze(&ctx).await.map(|count| {
                info!("processed {count} tweets");
            })
        }
    };

    // Teardown runs on the abort path too.
    ctx.close().await;
    result
}

/// Raise a flag on ctrl-c; the ingest loop checks it at each iteration
/// boundary.
fn install_shutdown_flag() -> Arc<AtomicBool> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("ctrl-c received, finishing current cycle");
            flag.store(true, Ordering::Relaxed);
        }
    });

    shutdown
}
