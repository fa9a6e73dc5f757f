//! 核心类型定义

mod config;
mod purge;

pub use config::PurgeConfig;
pub use purge::{FailedDeletion, MatchedRecord, PurgeReport};

// Re-export library types used by the services
pub use dns_purge_provider::{
    DnsRecord, DnsRecordType, PaginatedResponse, PaginationParams, ProviderZone,
    RecordQueryParams,
};
