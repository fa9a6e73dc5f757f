//! 测试辅助模块
//!
//! 提供可编排的 mock Provider 和便捷的测试工厂方法。

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use dns_purge_provider::{
    DnsProvider, DnsRecord, DnsRecordType, PaginatedResponse, PaginationParams, ProviderError,
    ProviderZone, RecordQueryParams, Result,
};
use tokio::sync::{Mutex, RwLock};

use crate::services::PurgeService;
use crate::types::PurgeConfig;

/// One remote call observed by [`ScriptedProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListZones {
        page: u32,
    },
    ListRecords {
        zone_id: String,
        page: u32,
        record_type: Option<DnsRecordType>,
    },
    Delete {
        zone_id: String,
        record_id: String,
    },
}

// ===== ScriptedProvider =====

/// In-memory provider. Deleting removes the record from the remote set, so later
/// listings observe earlier deletions.
pub struct ScriptedProvider {
    zones: RwLock<Vec<ProviderZone>>,
    records: RwLock<Vec<DnsRecord>>,
    /// 下次 `list_zones` 依次返回的错误
    zone_failures: Mutex<VecDeque<ProviderError>>,
    /// 下次 `list_records` 依次返回的错误
    list_failures: Mutex<VecDeque<ProviderError>>,
    /// 按记录 ID 排队的删除错误，用完后删除成功
    delete_failures: Mutex<HashMap<String, VecDeque<ProviderError>>>,
    /// 每次删除都失败的记录
    undeletable: RwLock<HashMap<String, ProviderError>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(Vec::new()),
            records: RwLock::new(Vec::new()),
            zone_failures: Mutex::new(VecDeque::new()),
            list_failures: Mutex::new(VecDeque::new()),
            delete_failures: Mutex::new(HashMap::new()),
            undeletable: RwLock::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn add_zone(&self, id: &str, name: &str) {
        self.zones.write().await.push(ProviderZone {
            id: id.to_string(),
            name: name.to_string(),
            status: "active".to_string(),
        });
    }

    pub async fn add_record(&self, zone_id: &str, id: &str, record_type: DnsRecordType, name: &str) {
        self.records.write().await.push(DnsRecord {
            id: id.to_string(),
            zone_id: zone_id.to_string(),
            record_type,
            name: name.to_string(),
            content: "value".to_string(),
            ttl: 1,
        });
    }

    pub async fn fail_next_zone_list(&self, err: ProviderError) {
        self.zone_failures.lock().await.push_back(err);
    }

    pub async fn fail_next_record_list(&self, err: ProviderError) {
        self.list_failures.lock().await.push_back(err);
    }

    /// Queue `err` for the next delete of `record_id`.
    pub async fn fail_next_delete(&self, record_id: &str, err: ProviderError) {
        self.delete_failures
            .lock()
            .await
            .entry(record_id.to_string())
            .or_default()
            .push_back(err);
    }

    /// Every delete of `record_id` fails with `err`.
    pub async fn fail_every_delete(&self, record_id: &str, err: ProviderError) {
        self.undeletable
            .write()
            .await
            .insert(record_id.to_string(), err);
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn delete_attempts(&self, record_id: &str) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| matches!(c, Call::Delete { record_id: id, .. } if id == record_id))
            .count()
    }

    pub async fn remaining_ids(&self) -> Vec<String> {
        self.records
            .read()
            .await
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }
}

fn page_of<T: Clone>(all: &[T], page: u32, page_size: u32) -> PaginatedResponse<T> {
    let start = (page.saturating_sub(1) as usize).saturating_mul(page_size as usize);
    let items: Vec<T> = all
        .iter()
        .skip(start)
        .take(page_size as usize)
        .cloned()
        .collect();
    let total = u32::try_from(all.len()).unwrap_or(u32::MAX);
    PaginatedResponse::new(items, page, page_size, total)
}

#[async_trait]
impl DnsProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn list_zones(&self, params: &PaginationParams) -> Result<PaginatedResponse<ProviderZone>> {
        self.calls
            .lock()
            .await
            .push(Call::ListZones { page: params.page });
        if let Some(err) = self.zone_failures.lock().await.pop_front() {
            return Err(err);
        }
        let zones = self.zones.read().await;
        Ok(page_of(&zones, params.page, params.page_size))
    }

    async fn list_records(
        &self,
        zone_id: &str,
        params: &RecordQueryParams,
    ) -> Result<PaginatedResponse<DnsRecord>> {
        self.calls.lock().await.push(Call::ListRecords {
            zone_id: zone_id.to_string(),
            page: params.page,
            record_type: params.record_type,
        });
        if let Some(err) = self.list_failures.lock().await.pop_front() {
            return Err(err);
        }
        let matching: Vec<DnsRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.zone_id == zone_id)
            .filter(|r| params.record_type.is_none_or(|t| r.record_type == t))
            .cloned()
            .collect();
        Ok(page_of(&matching, params.page, params.page_size))
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.calls.lock().await.push(Call::Delete {
            zone_id: zone_id.to_string(),
            record_id: record_id.to_string(),
        });
        if let Some(err) = self
            .delete_failures
            .lock()
            .await
            .get_mut(record_id)
            .and_then(VecDeque::pop_front)
        {
            return Err(err);
        }
        if let Some(err) = self.undeletable.read().await.get(record_id) {
            return Err(err.clone());
        }
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !(r.zone_id == zone_id && r.id == record_id));
        if records.len() == before {
            return Err(ProviderError::RecordNotFound {
                provider: "mock".to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            });
        }
        Ok(())
    }
}

// ===== 错误工厂 =====

pub fn rate_limited() -> ProviderError {
    ProviderError::RateLimited {
        provider: "mock".to_string(),
        status_code: 429,
        status_text: "Too Many Requests".to_string(),
        retry_after: None,
        raw_message: None,
    }
}

pub fn server_error() -> ProviderError {
    ProviderError::HttpStatus {
        provider: "mock".to_string(),
        status_code: 500,
        status_text: "Internal Server Error".to_string(),
        raw_message: None,
    }
}

pub fn permission_denied() -> ProviderError {
    ProviderError::PermissionDenied {
        provider: "mock".to_string(),
        raw_message: Some("record is locked".to_string()),
    }
}

// ===== 便捷工厂方法 =====

/// Provider with zone `example.com` (id `zone-1`).
pub async fn provider_with_zone() -> Arc<ScriptedProvider> {
    let provider = Arc::new(ScriptedProvider::new());
    provider.add_zone("zone-1", "example.com").await;
    provider
}

/// Service without pauses over `provider`.
pub fn service(provider: &Arc<ScriptedProvider>, config: PurgeConfig) -> PurgeService {
    PurgeService::new(provider.clone(), config)
}
