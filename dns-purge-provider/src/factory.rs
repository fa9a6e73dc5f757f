//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::DnsProvider;
use crate::types::ProviderCredentials;

#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;

/// Creates a [`DnsProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
/// The returned provider is wrapped in `Arc<dyn DnsProvider>` so the purge service
/// can hold it alongside the caller.
///
/// # Errors
///
/// Returns [`ProviderError::NetworkError`](crate::ProviderError::NetworkError) when the
/// underlying HTTP client cannot be built.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_purge_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Cloudflare {
///     email: "ops@example.com".to_string(),
///     api_key: "your-global-api-key".to_string(),
/// })?;
/// # Ok::<(), dns_purge_provider::ProviderError>(())
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn DnsProvider>> {
    match credentials {
        #[cfg(feature = "cloudflare")]
        ProviderCredentials::Cloudflare { email, api_key } => {
            Ok(Arc::new(CloudflareProvider::new(email, api_key)?))
        }
    }
}
