//! 清理循环配置

use std::time::Duration;

use dns_purge_provider::DnsRecordType;

/// Default pause between remote calls and after a 429.
const DEFAULT_DELAY: Duration = Duration::from_secs(10);
/// Consecutive 429 answers tolerated for one call.
const DEFAULT_MAX_RATE_LIMIT_RETRIES: u32 = 30;
/// Records requested per listing page.
const DEFAULT_PAGE_SIZE: u32 = 100;

/// Tunables of the purge loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeConfig {
    /// Record types scanned, in this order.
    pub record_types: Vec<DnsRecordType>,
    /// Pause after every successful remote call and after every delete attempt.
    pub call_delay: Duration,
    /// Fixed pause after an HTTP 429 before the same call is repeated.
    pub rate_limit_backoff: Duration,
    /// Consecutive 429 answers tolerated per call; `0` retries forever.
    pub max_rate_limit_retries: u32,
    /// Page size requested when listing records.
    pub page_size: u32,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            record_types: vec![DnsRecordType::A, DnsRecordType::Cname, DnsRecordType::Txt],
            call_delay: DEFAULT_DELAY,
            rate_limit_backoff: DEFAULT_DELAY,
            max_rate_limit_retries: DEFAULT_MAX_RATE_LIMIT_RETRIES,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PurgeConfig {
    /// Defaults without any pauses.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            call_delay: Duration::ZERO,
            rate_limit_backoff: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Use `delay` both between calls and as the 429 backoff.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.call_delay = delay;
        self.rate_limit_backoff = delay;
        self
    }

    #[must_use]
    pub fn with_max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.max_rate_limit_retries = retries;
        self
    }

    #[must_use]
    pub fn with_record_types(mut self, record_types: Vec<DnsRecordType>) -> Self {
        self.record_types = record_types;
        self
    }
}
