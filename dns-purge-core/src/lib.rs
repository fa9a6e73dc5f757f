//! dns-purge core library
//!
//! Turns the provider gateway into the purge workflow:
//! - zone lookup by exact name ([`resolve_zone`])
//! - paginated listing filtered by name substring ([`find_records`])
//! - the scan/delete loop with fixed pacing and HTTP 429 backoff ([`PurgeService`])
//!
//! The provider is injected as `Arc<dyn DnsProvider>`, so everything here runs
//! against an in-memory provider in tests.

pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{PurgeService, RateLimitRetry, find_records, resolve_zone};
pub use types::{FailedDeletion, MatchedRecord, PurgeConfig, PurgeReport};
