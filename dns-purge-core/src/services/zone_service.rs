//! Zone 解析服务

use dns_purge_provider::DnsProvider;

use crate::error::{CoreError, CoreResult};
use crate::services::RateLimitRetry;
use crate::types::{PaginationParams, ProviderZone};

/// Zones requested per page (the Cloudflare maximum).
pub const ZONE_PAGE_SIZE: u32 = 50;

/// Find the zone whose name equals `name` exactly.
///
/// Walks every page of the account's zones. Rate-limit errors are returned as is;
/// the purge service wraps each page request in [`RateLimitRetry`].
pub async fn resolve_zone(provider: &dyn DnsProvider, name: &str) -> CoreResult<ProviderZone> {
    resolve_zone_with(provider, name, &mut RateLimitRetry::disabled()).await
}

pub(crate) async fn resolve_zone_with(
    provider: &dyn DnsProvider,
    name: &str,
    retry: &mut RateLimitRetry,
) -> CoreResult<ProviderZone> {
    if name.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "zone name must not be empty".to_string(),
        ));
    }

    let mut params = PaginationParams {
        page: 1,
        page_size: ZONE_PAGE_SIZE,
    };
    loop {
        let page_params = &params;
        let page = retry
            .run("list zones", move || async move {
                provider
                    .list_zones(page_params)
                    .await
                    .map_err(CoreError::from)
            })
            .await?;
        log::debug!(
            "zones page {}: {} of {} zones",
            page.page,
            page.items.len(),
            page.total_count
        );

        let exhausted = !page.has_more || page.items.is_empty();
        if let Some(zone) = page.items.into_iter().find(|z| z.name == name) {
            log::debug!("zone {} ({}) status: {}", zone.name, zone.id, zone.status);
            return Ok(zone);
        }
        if exhausted {
            return Err(CoreError::ZoneNotFound(name.to_string()));
        }
        params = params.next_page();
    }
}
