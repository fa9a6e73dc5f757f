//! 命令行接口定义

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use dns_purge_core::PurgeConfig;

/// Bulk-delete Cloudflare DNS records whose name contains a substring.
///
/// Credentials are read from `CLOUDFLARE_EMAIL` and `CLOUDFLARE_API_KEY`.
#[derive(Debug, Parser)]
#[command(name = "dns-purge", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log verbosity (ignored when RUST_LOG is set)
    #[arg(long, global = true, value_enum, env = "DNS_PURGE_LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Seconds to wait after every API call and after a 429 response
    #[arg(long, global = true, env = "DNS_PURGE_DELAY_SECS", default_value_t = 10)]
    pub delay_secs: u64,

    /// Consecutive 429 responses tolerated per call before giving up (0 = never give up)
    #[arg(long, global = true, default_value_t = 30)]
    pub max_retries: u32,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Delete every A, CNAME and TXT record in a zone whose name contains a substring
    DeleteDns {
        /// Zone name, matched exactly (e.g. example.com)
        #[arg(short = 'z', long)]
        zone: String,

        /// Substring to look for in record names (case-sensitive)
        #[arg(short = 'r', long)]
        record: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Cli {
    pub fn purge_config(&self) -> PurgeConfig {
        PurgeConfig::default()
            .with_delay(Duration::from_secs(self.delay_secs))
            .with_max_rate_limit_retries(self.max_retries)
    }
}
