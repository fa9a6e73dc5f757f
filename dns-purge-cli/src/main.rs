//! dns-purge entry point
//!
//! `dns-purge delete-dns --zone <ZONE> --record <SUBSTRING>` resolves the zone,
//! then deletes every A, CNAME and TXT record whose name contains the substring,
//! backing off whenever Cloudflare answers HTTP 429.

mod cli;
mod credentials;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use dns_purge_core::{CoreError, PurgeReport, PurgeService};
use dns_purge_provider::{ProviderError, create_provider};
use thiserror::Error;

use cli::{Cli, Commands};
use credentials::CredentialError;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AppError {
    fn is_expected(&self) -> bool {
        match self {
            Self::Credentials(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Core(e) => e.is_expected(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    finish(run(cli).await)
}

/// Report the outcome of a run and map it to the process exit status.
fn finish(outcome: Result<PurgeReport, AppError>) -> ExitCode {
    match outcome {
        Ok(report) => {
            summarize(&report);
            exit_code(&report)
        }
        Err(e) => {
            if e.is_expected() {
                tracing::warn!("{e}");
            } else {
                tracing::error!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<PurgeReport, AppError> {
    let config = cli.purge_config();
    let Commands::DeleteDns { zone, record } = cli.command;

    let credentials = credentials::from_env()?;
    let provider = create_provider(credentials)?;
    tracing::info!("purging records containing '{record}' from zone {zone}");

    let service = PurgeService::new(provider, config);
    Ok(service.purge(&zone, &record).await?)
}

fn summarize(report: &PurgeReport) {
    for failure in &report.failed {
        tracing::warn!(
            "not deleted: {} {} ({}): {}",
            failure.record_type,
            failure.record.name,
            failure.record.id,
            failure.reason
        );
    }
    tracing::info!(
        "done: {} deleted, {} failed, {} rate-limited responses absorbed",
        report.deleted.len(),
        report.failed.len(),
        report.rate_limited
    );
}

fn exit_code(report: &PurgeReport) -> ExitCode {
    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
