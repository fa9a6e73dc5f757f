use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{DnsRecord, PaginatedResponse, PaginationParams, ProviderZone, RecordQueryParams};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录 ID（用于 `RecordNotFound` 等错误）
    pub record_id: Option<String>,
    /// Zone ID（用于 `ZoneNotFound` 等错误）
    pub zone: Option<String>,
}

impl ErrorContext {
    pub fn zone(zone_id: &str) -> Self {
        Self {
            record_id: None,
            zone: Some(zone_id.to_string()),
        }
    }

    pub fn record(zone_id: &str, record_id: &str) -> Self {
        Self {
            record_id: Some(record_id.to_string()),
            zone: Some(zone_id.to_string()),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// DNS 提供商 Trait
///
/// The gateway contract used by the purge loop: list zones, list records with an
/// optional type filter, delete one record. Implementations perform exactly one
/// remote call per method invocation and never retry; a rate-limited call surfaces
/// as [`ProviderError::RateLimited`].
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取 Zone 列表 (分页)
    async fn list_zones(&self, params: &PaginationParams)
    -> Result<PaginatedResponse<ProviderZone>>;

    /// 获取 DNS 记录列表 (分页 + 类型过滤)
    async fn list_records(
        &self,
        zone_id: &str,
        params: &RecordQueryParams,
    ) -> Result<PaginatedResponse<DnsRecord>>;

    /// 删除 DNS 记录
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}
