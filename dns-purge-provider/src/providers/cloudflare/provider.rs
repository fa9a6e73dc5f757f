//! Cloudflare DnsProvider trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::common::parse_record_type;
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{
    DnsRecord, PaginatedResponse, PaginationParams, ProviderZone, RecordQueryParams,
};

use super::{
    CloudflareDnsRecord, CloudflareProvider, CloudflareZone, MAX_PAGE_SIZE_RECORDS,
    MAX_PAGE_SIZE_ZONES,
};

impl CloudflareProvider {
    fn zone_to_provider_zone(zone: CloudflareZone) -> ProviderZone {
        ProviderZone {
            id: zone.id,
            name: zone.name,
            status: zone.status,
        }
    }

    /// 将 Cloudflare 记录转换为 `DnsRecord`，不支持的类型返回 `None`
    fn cf_record_to_dns_record(
        &self,
        cf_record: CloudflareDnsRecord,
        zone_id: &str,
    ) -> Option<DnsRecord> {
        match parse_record_type(&cf_record.record_type, self.provider_name()) {
            Ok(record_type) => Some(DnsRecord {
                id: cf_record.id,
                zone_id: zone_id.to_string(),
                record_type,
                name: cf_record.name,
                content: cf_record.content,
                ttl: cf_record.ttl,
            }),
            Err(e) => {
                log::debug!("Skipping record {} ({}): {e}", cf_record.id, cf_record.name);
                None
            }
        }
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn list_zones(&self, params: &PaginationParams) -> Result<PaginatedResponse<ProviderZone>> {
        let params = params.validated(MAX_PAGE_SIZE_ZONES);
        let path = format!("/zones?page={}&per_page={}", params.page, params.page_size);

        let (zones, total_count): (Vec<CloudflareZone>, u32) =
            self.get_paginated(&path, ErrorContext::default()).await?;
        let zones = zones.into_iter().map(Self::zone_to_provider_zone).collect();

        Ok(PaginatedResponse::new(
            zones,
            params.page,
            params.page_size,
            total_count,
        ))
    }

    async fn list_records(
        &self,
        zone_id: &str,
        params: &RecordQueryParams,
    ) -> Result<PaginatedResponse<DnsRecord>> {
        let params = params.validated(MAX_PAGE_SIZE_RECORDS);
        let mut path = format!(
            "/zones/{}/dns_records?page={}&per_page={}",
            urlencoding::encode(zone_id),
            params.page,
            params.page_size
        );

        // 添加记录类型过滤
        if let Some(record_type) = params.record_type {
            path.push_str(&format!("&type={}", urlencoding::encode(record_type.as_str())));
        }

        let (cf_records, total_count): (Vec<CloudflareDnsRecord>, u32) =
            self.get_paginated(&path, ErrorContext::zone(zone_id)).await?;

        let records = cf_records
            .into_iter()
            .filter_map(|r| self.cf_record_to_dns_record(r, zone_id))
            .collect();

        Ok(PaginatedResponse::new(
            records,
            params.page,
            params.page_size,
            total_count,
        ))
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let path = format!(
            "/zones/{}/dns_records/{}",
            urlencoding::encode(zone_id),
            urlencoding::encode(record_id)
        );
        self.delete(&path, ErrorContext::record(zone_id, record_id))
            .await
    }
}
