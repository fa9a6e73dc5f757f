//! 业务逻辑服务层

mod purge_service;
mod record_service;
mod retry;
mod zone_service;

pub use purge_service::PurgeService;
pub use record_service::find_records;
pub use retry::RateLimitRetry;
pub use zone_service::{ZONE_PAGE_SIZE, resolve_zone};
