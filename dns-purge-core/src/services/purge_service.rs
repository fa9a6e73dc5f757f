//! DNS 记录清理服务
//!
//! Resolves the zone once, then for each configured record type alternates between
//! scanning for matching records and deleting them until a scan comes back empty.
//! Every remote call is issued one at a time, in order, followed by the configured
//! pause; HTTP 429 answers are absorbed by [`RateLimitRetry`].

use std::collections::HashSet;
use std::sync::Arc;

use dns_purge_provider::{DnsProvider, ProviderError};

use crate::error::{CoreError, CoreResult};
use crate::services::RateLimitRetry;
use crate::services::record_service::find_records_with;
use crate::services::zone_service::resolve_zone_with;
use crate::types::{DnsRecordType, FailedDeletion, MatchedRecord, PurgeConfig, PurgeReport};

/// DNS 记录清理服务
pub struct PurgeService {
    provider: Arc<dyn DnsProvider>,
    config: PurgeConfig,
}

impl PurgeService {
    /// 创建清理服务实例
    #[must_use]
    pub fn new(provider: Arc<dyn DnsProvider>, config: PurgeConfig) -> Self {
        Self { provider, config }
    }

    /// Delete every record of the configured types in `zone_name` whose name
    /// contains `substring`.
    ///
    /// Fails when the zone cannot be resolved or a listing fails for a reason other
    /// than rate limiting. Individual deletions that fail are collected in
    /// [`PurgeReport::failed`] and do not stop the run.
    pub async fn purge(&self, zone_name: &str, substring: &str) -> CoreResult<PurgeReport> {
        if substring.is_empty() {
            return Err(CoreError::InvalidInput(
                "record substring must not be empty".to_string(),
            ));
        }

        let mut retry = RateLimitRetry::new(&self.config);
        let zone = resolve_zone_with(self.provider.as_ref(), zone_name, &mut retry).await?;
        log::info!("zone id for {zone_name} is {}", zone.id);
        self.pace().await;

        self.reconcile_with(&zone.id, &self.config.record_types, substring, &mut retry)
            .await
    }

    /// Run the scan/delete loop against an already resolved zone id.
    pub async fn reconcile(
        &self,
        zone_id: &str,
        record_types: &[DnsRecordType],
        substring: &str,
    ) -> CoreResult<PurgeReport> {
        let mut retry = RateLimitRetry::new(&self.config);
        self.reconcile_with(zone_id, record_types, substring, &mut retry)
            .await
    }

    async fn reconcile_with(
        &self,
        zone_id: &str,
        record_types: &[DnsRecordType],
        substring: &str,
        retry: &mut RateLimitRetry,
    ) -> CoreResult<PurgeReport> {
        let mut report = PurgeReport::default();
        for &record_type in record_types {
            self.purge_type(zone_id, record_type, substring, retry, &mut report)
                .await?;
        }
        report.rate_limited = retry.absorbed();

        log::info!(
            "purge of '{substring}' finished: {} deleted, {} failed, {} rate limited",
            report.deleted.len(),
            report.failed.len(),
            report.rate_limited
        );
        Ok(report)
    }

    /// Scan and delete records of one type until a scan finds nothing left to try.
    async fn purge_type(
        &self,
        zone_id: &str,
        record_type: DnsRecordType,
        substring: &str,
        retry: &mut RateLimitRetry,
        report: &mut PurgeReport,
    ) -> CoreResult<()> {
        // 已放弃的记录不再重试，保证循环收敛
        let mut given_up: HashSet<String> = HashSet::new();

        loop {
            let matches = find_records_with(
                self.provider.as_ref(),
                zone_id,
                Some(record_type),
                substring,
                self.config.page_size,
                retry,
            )
            .await?;
            self.pace().await;

            let pending: Vec<MatchedRecord> = matches
                .into_iter()
                .filter(|r| !given_up.contains(&r.id))
                .collect();
            if pending.is_empty() {
                log::info!("no {record_type} records left matching '{substring}'");
                return Ok(());
            }

            let names: Vec<&str> = pending.iter().map(|r| r.name.as_str()).collect();
            log::info!(
                "found {} {record_type} records matching '{substring}': {}",
                pending.len(),
                names.join(", ")
            );

            for record in pending {
                let outcome = self.delete_one(zone_id, &record, retry).await;
                match outcome {
                    Ok(()) => {
                        log::info!("deleted {record_type} record {} ({})", record.name, record.id);
                        report.deleted.push(record);
                    }
                    Err(CoreError::Provider(ProviderError::RecordNotFound { .. })) => {
                        log::warn!(
                            "{record_type} record {} ({}) was already gone",
                            record.name,
                            record.id
                        );
                        given_up.insert(record.id.clone());
                    }
                    Err(e) => {
                        if e.is_expected() {
                            log::warn!(
                                "delete {record_type} record {} ({}) failed: {e}",
                                record.name,
                                record.id
                            );
                        } else {
                            log::error!(
                                "delete {record_type} record {} ({}) failed: {e}",
                                record.name,
                                record.id
                            );
                        }
                        given_up.insert(record.id.clone());
                        report.failed.push(FailedDeletion {
                            record,
                            record_type,
                            reason: e.to_string(),
                        });
                    }
                }
                self.pace().await;
            }
        }
    }

    async fn delete_one(
        &self,
        zone_id: &str,
        record: &MatchedRecord,
        retry: &mut RateLimitRetry,
    ) -> CoreResult<()> {
        let provider = self.provider.as_ref();
        let record_id = record.id.as_str();
        retry
            .run("delete record", move || async move {
                provider
                    .delete_record(zone_id, record_id)
                    .await
                    .map_err(CoreError::from)
            })
            .await
    }

    /// Fixed pause between remote calls.
    async fn pace(&self) {
        if !self.config.call_delay.is_zero() {
            tokio::time::sleep(self.config.call_delay).await;
        }
    }
}
