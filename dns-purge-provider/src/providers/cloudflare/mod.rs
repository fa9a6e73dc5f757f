//! Cloudflare DNS Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::utils::log_sanitizer::mask_secret;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareZone};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare Zones API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 5000;

/// Cloudflare DNS Provider
///
/// Authenticates with the account e-mail and global API key
/// (`X-Auth-Email` / `X-Auth-Key`).
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) email: String,
    pub(crate) api_key: String,
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_key", &mask_secret(&self.api_key))
            .finish_non_exhaustive()
    }
}

impl CloudflareProvider {
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be built.
    pub fn new(email: String, api_key: String) -> Result<Self> {
        Self::with_base_url(email, api_key, CF_API_BASE)
    }

    /// Same as [`new`](Self::new) but talking to another API root, e.g. a mock server.
    pub fn with_base_url(
        email: String,
        api_key: String,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: create_http_client("cloudflare")?,
            base_url,
            email,
            api_key,
        })
    }
}
