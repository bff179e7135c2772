use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::EnvFilter;

use threat_intel_etl::{
    AppConfig, CvePipeline, DocumentStore, HttpFetcher, MongoStore, RunReport, UrlhausPipeline,
};

#[derive(Parser)]
#[command(name = "threat-intel-etl")]
#[command(about = "Pull CVE and URLhaus threat feeds into MongoDB")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read environment variables from this file instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" (defaults to RUST_LOG, then "info")
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run the CVE Search pipeline
    Cve,
    /// Run the URLhaus recent-URLs pipeline
    Urlhaus,
    /// Run both pipelines, CVE first (default)
    All,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            dotenv::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
        }
        None => {
            dotenv::dotenv().ok();
        }
    }
    init_tracing(cli.log_level.as_deref())?;

    let config = AppConfig::from_env().context("invalid configuration")?;
    config.log_summary();
    let store = MongoStore::default();

    match cli.command.unwrap_or(Commands::All) {
        Commands::Cve => {
            run_cve(&config, &store).await?;
        }
        Commands::Urlhaus => {
            run_urlhaus(&config, &store).await?;
        }
        Commands::All => {
            run_cve(&config, &store).await?;
            run_urlhaus(&config, &store).await?;
        }
    }

    Ok(())
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level {directive:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoUtc::rfc_3339())
        .with_target(false)
        .init();
    Ok(())
}

async fn run_cve(config: &AppConfig, store: &dyn DocumentStore) -> Result<RunReport> {
    let fetcher = HttpFetcher::new(&config.cve.base_url, config.cve.timeout)?;
    Ok(CvePipeline::new(&config.cve, &fetcher, store).run().await)
}

async fn run_urlhaus(config: &AppConfig, store: &dyn DocumentStore) -> Result<RunReport> {
    let fetcher = HttpFetcher::new(&config.urlhaus.base_url, config.urlhaus.timeout)?;
    Ok(UrlhausPipeline::new(&config.urlhaus, &fetcher, store).run().await)
}
