//! Purge result types

use serde::Serialize;

use dns_purge_provider::{DnsRecord, DnsRecordType};

/// The part of a record the purge loop cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedRecord {
    pub id: String,
    pub name: String,
}

impl From<DnsRecord> for MatchedRecord {
    fn from(record: DnsRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}

/// A record whose deletion gave up.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedDeletion {
    pub record: MatchedRecord,
    pub record_type: DnsRecordType,
    /// Display text of the last error.
    pub reason: String,
}

/// Outcome of one purge run
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeReport {
    /// Records deleted, in the order they were deleted.
    pub deleted: Vec<MatchedRecord>,
    /// Records that could not be deleted.
    pub failed: Vec<FailedDeletion>,
    /// Number of HTTP 429 answers absorbed by backing off.
    pub rate_limited: u32,
}

impl PurgeReport {
    /// No record failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
