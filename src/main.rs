//! payrun CLI: batch payslip ingestion and delivery.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;

use payrun::error::ConfigError;
use payrun::{Config, DedupCache, Orchestrator, PipelineError, init_tracing};

#[derive(Parser)]
#[command(name = "payrun", version, about = "Batch payslip ingestion and delivery pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process a folder of payslips through the delivery pipeline.
    Run {
        /// Folder containing payslip PDFs.
        #[arg(short, long, default_value = "data/payslips")]
        input: PathBuf,
        /// Override the simulated failure rate [0..1].
        #[arg(long)]
        fail_rate: Option<f64>,
    },
    /// Create demo payslip files for the current period.
    Seed {
        /// Folder to create the demo files in.
        #[arg(long, default_value = "data/payslips")]
        dir: PathBuf,
    },
    /// Clear the dedup backing store.
    FlushCache,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run { input, fail_rate } => run(input, fail_rate).await,
        Command::Seed { dir } => seed(dir).await,
        Command::FlushCache => flush_cache().await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("payrun failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(input: PathBuf, fail_rate: Option<f64>) -> Result<(), PipelineError> {
    let mut config = Config::from_env()?;
    if let Some(rate) = fail_rate {
        // Same validation surface as the FAIL_RATE env variable
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::InvalidFailRate { value: rate }.into());
        }
        info!(fail_rate = rate, "Failure rate overridden from CLI");
        config.fail_rate = rate;
    }

    let orchestrator = Orchestrator::from_config(&config).await?;
    orchestrator.run_folder(&input).await
}

/// Write a handful of mock payslips named `EMP00N_<YYYYMM>.pdf`.
async fn seed(dir: PathBuf) -> Result<(), PipelineError> {
    let period = Utc::now().format("%Y%m");

    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|source| PipelineError::Io {
            path: dir.clone(),
            source,
        })?;

    for employee in ["EMP001", "EMP002", "EMP003"] {
        let path = dir.join(format!("{employee}_{period}.pdf"));
        // Per-file content, so the content-based dedup sees each demo
        // payslip as distinct.
        let body = format!("%PDF-1.4\n% Mock payslip {employee} {period}\n");
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| PipelineError::Io {
                path: path.clone(),
                source,
            })?;
        info!(file = %path.display(), "Created demo payslip");
    }

    Ok(())
}

async fn flush_cache() -> Result<(), PipelineError> {
    let config = Config::from_env()?;
    let cache = DedupCache::connect(config.redis_url.as_deref()).await;
    cache
        .clear()
        .await
        .map_err(|source| PipelineError::CacheAdmin { source })?;
    info!("Dedup cache flushed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_out_of_range_cli_fail_rate_is_fatal() {
        // Rejected up front, before any pipeline component is built
        let err = run(PathBuf::from("data/payslips"), Some(1.5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Config {
                source: ConfigError::InvalidFailRate { .. }
            }
        ));
    }
}
