//! # dns-purge-provider
//!
//! DNS provider gateway used by `dns-purge`: list zones, list records of a zone
//! (optionally filtered by type) and delete a single record.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | `X-Auth-Email` + `X-Auth-Key` |
//!
//! ## Feature Flags
//!
//! - **`cloudflare`** *(default)*: Enable the Cloudflare provider.
//! - **`rustls`** *(default)*: Use rustls for TLS.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_purge_provider::{
//!     create_provider, DnsProvider, PaginationParams, ProviderCredentials, RecordQueryParams,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::Cloudflare {
//!         email: "ops@example.com".to_string(),
//!         api_key: "your-global-api-key".to_string(),
//!     })?;
//!
//!     let zones = provider.list_zones(&PaginationParams::default()).await?;
//!     for zone in &zones.items {
//!         let records = provider
//!             .list_records(&zone.id, &RecordQueryParams::default())
//!             .await?;
//!         println!("{}: {} records", zone.name, records.total_count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! Nothing here retries: an HTTP 429 surfaces as [`ProviderError::RateLimited`]
//! carrying the status code and reason phrase, and the caller decides whether and
//! when to repeat the call.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result, TOO_MANY_REQUESTS};

// Re-export factory functions
pub use factory::create_provider;

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsProvider;

// Re-export types
pub use types::{
    CredentialValidationError, DnsRecord, DnsRecordType, PaginatedResponse, PaginationParams,
    ProviderCredentials, ProviderType, ProviderZone, RecordQueryParams, credential_fields,
};

#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;
