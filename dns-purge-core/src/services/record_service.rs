//! DNS 记录查找服务

use dns_purge_provider::DnsProvider;

use crate::error::{CoreError, CoreResult};
use crate::services::RateLimitRetry;
use crate::types::{DnsRecord, DnsRecordType, MatchedRecord, RecordQueryParams};

/// List every record of `zone_id` (optionally of one type) whose name contains
/// `substring`, in provider order.
///
/// Matching is plain, case-sensitive substring containment on the fully-qualified
/// name. All pages are fetched before filtering.
pub async fn find_records(
    provider: &dyn DnsProvider,
    zone_id: &str,
    record_type: Option<DnsRecordType>,
    substring: &str,
    page_size: u32,
) -> CoreResult<Vec<MatchedRecord>> {
    find_records_with(
        provider,
        zone_id,
        record_type,
        substring,
        page_size,
        &mut RateLimitRetry::disabled(),
    )
    .await
}

pub(crate) async fn find_records_with(
    provider: &dyn DnsProvider,
    zone_id: &str,
    record_type: Option<DnsRecordType>,
    substring: &str,
    page_size: u32,
    retry: &mut RateLimitRetry,
) -> CoreResult<Vec<MatchedRecord>> {
    if substring.is_empty() {
        return Err(CoreError::InvalidInput(
            "record substring must not be empty".to_string(),
        ));
    }
    if zone_id.is_empty() {
        return Err(CoreError::InvalidInput("zone id must not be empty".to_string()));
    }

    let operation = match record_type {
        Some(t) => format!("list {t} records"),
        None => "list records".to_string(),
    };
    let mut params = RecordQueryParams {
        page: 1,
        page_size,
        record_type,
    };
    let mut candidates: Vec<DnsRecord> = Vec::new();
    loop {
        let page_params = &params;
        let page = retry
            .run(&operation, move || async move {
                provider
                    .list_records(zone_id, page_params)
                    .await
                    .map_err(CoreError::from)
            })
            .await?;
        log::debug!(
            "{operation} page {}: {} of {}",
            page.page,
            page.items.len(),
            page.total_count
        );

        // A page may come back empty after the gateway drops unsupported types,
        // so only `has_more` ends the scan.
        let has_more = page.has_more;
        candidates.extend(page.items);
        if !has_more {
            break;
        }
        params = params.next_page();
    }

    Ok(candidates
        .into_iter()
        .filter(|r| r.name.contains(substring))
        .map(MatchedRecord::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use dns_purge_provider::{PaginatedResponse, PaginationParams, ProviderZone, Result as ProviderResult};

    use super::*;
    use crate::test_utils::{Call, ScriptedProvider, server_error};

    fn ids(records: &[MatchedRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn keeps_matching_names_in_provider_order() {
        let provider = ScriptedProvider::new();
        provider.add_record("zone-1", "r-1", DnsRecordType::Txt, "_acme-challenge.example.com").await;
        provider.add_record("zone-1", "r-2", DnsRecordType::Txt, "other.example.com").await;
        provider.add_record("zone-1", "r-3", DnsRecordType::Txt, "_acme-challenge.www.example.com").await;

        let found = find_records(&provider, "zone-1", Some(DnsRecordType::Txt), "_acme-challenge", 100).await;
        let found = match found {
            Ok(f) => f,
            Err(e) => panic!("find_records failed: {e}"),
        };
        assert_eq!(ids(&found), vec!["r-1", "r-3"]);
        assert_eq!(found[1].name, "_acme-challenge.www.example.com");
    }

    #[tokio::test]
    async fn match_is_unanchored_and_case_sensitive() {
        let provider = ScriptedProvider::new();
        provider.add_record("zone-1", "r-1", DnsRecordType::A, "host-tmp-1.example.com").await;
        provider.add_record("zone-1", "r-2", DnsRecordType::A, "HOST-TMP-2.example.com").await;

        let found = find_records(&provider, "zone-1", Some(DnsRecordType::A), "tmp", 100).await;
        assert!(matches!(&found, Ok(f) if ids(f) == vec!["r-1"]), "unexpected result: {found:?}");
    }

    #[tokio::test]
    async fn filters_by_type() {
        let provider = ScriptedProvider::new();
        provider.add_record("zone-1", "r-a", DnsRecordType::A, "test.example.com").await;
        provider.add_record("zone-1", "r-txt", DnsRecordType::Txt, "test.example.com").await;

        let found = find_records(&provider, "zone-1", Some(DnsRecordType::Txt), "test", 100).await;
        assert!(matches!(&found, Ok(f) if ids(f) == vec!["r-txt"]));

        let all = find_records(&provider, "zone-1", None, "test", 100).await;
        assert!(matches!(&all, Ok(f) if ids(f) == vec!["r-a", "r-txt"]));
    }

    #[tokio::test]
    async fn collects_every_page() {
        let provider = ScriptedProvider::new();
        for i in 0..250 {
            provider.add_record("zone-1", &format!("r-{i}"), DnsRecordType::Txt, &format!("t{i}.example.com")).await;
        }

        let found = find_records(&provider, "zone-1", Some(DnsRecordType::Txt), "example", 100).await;
        assert!(matches!(&found, Ok(f) if f.len() == 250));
        let pages: Vec<u32> = provider
            .calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                Call::ListRecords { page, .. } => Some(page),
                _ => None,
            })
            .collect();
        assert_eq!(pages, vec![1, 2, 3]);
    }

    /// Serves fixed pages; page 1 is empty the way a gateway reports a page that
    /// held only record types it cannot represent.
    struct SparsePages;

    #[async_trait::async_trait]
    impl DnsProvider for SparsePages {
        fn id(&self) -> &'static str {
            "sparse"
        }

        async fn list_zones(
            &self,
            _params: &PaginationParams,
        ) -> ProviderResult<PaginatedResponse<ProviderZone>> {
            Ok(PaginatedResponse::new(Vec::new(), 1, 1, 0))
        }

        async fn list_records(
            &self,
            zone_id: &str,
            params: &RecordQueryParams,
        ) -> ProviderResult<PaginatedResponse<DnsRecord>> {
            let items = if params.page == 2 {
                vec![DnsRecord {
                    id: "txt-1".to_string(),
                    zone_id: zone_id.to_string(),
                    record_type: DnsRecordType::Txt,
                    name: "tmp.example.com".to_string(),
                    content: "v".to_string(),
                    ttl: 1,
                }]
            } else {
                Vec::new()
            };
            Ok(PaginatedResponse::new(items, params.page, params.page_size, 2))
        }

        async fn delete_record(&self, _zone_id: &str, _record_id: &str) -> ProviderResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn empty_page_with_more_pages_keeps_scanning() {
        let found = find_records(&SparsePages, "zone-1", None, "tmp", 1).await;
        assert!(
            matches!(&found, Ok(f) if ids(f) == vec!["txt-1"]),
            "unexpected result: {found:?}"
        );
    }

    #[tokio::test]
    async fn no_match_is_empty() {
        let provider = ScriptedProvider::new();
        provider.add_record("zone-1", "r-1", DnsRecordType::Cname, "www.example.com").await;

        let found = find_records(&provider, "zone-1", Some(DnsRecordType::Cname), "_acme", 100).await;
        assert!(matches!(&found, Ok(f) if f.is_empty()));
    }

    #[tokio::test]
    async fn empty_substring_is_rejected() {
        let provider = ScriptedProvider::new();
        let found = find_records(&provider, "zone-1", None, "", 100).await;
        assert!(matches!(found, Err(CoreError::InvalidInput(_))));
        assert!(provider.calls().await.is_empty());
    }

    #[tokio::test]
    async fn listing_error_propagates() {
        let provider = ScriptedProvider::new();
        provider.fail_next_record_list(server_error()).await;
        let found = find_records(&provider, "zone-1", None, "x", 100).await;
        assert!(matches!(found, Err(CoreError::Provider(_))));
    }
}
