//! HTTP client for a Grafana-compatible REST API.

use async_trait::async_trait;
use dashbak_core::{BackupError, BackupResult};
use dashbak_domain::{
    DashboardMeta, DashboardSummary, DatasourceRecord, RawDashboard, SearchFilter, UserRecord,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;
use std::time::Duration;

use crate::traits::RemoteService;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The search endpoint caps results per request; pages are fetched until a
/// short page signals the end.
const SEARCH_PAGE_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
pub struct GrafanaClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

/// The dashboard endpoint wraps the document in an envelope. The document
/// member is captured as raw JSON so the backup keeps the upstream bytes.
#[derive(Debug, Deserialize)]
struct DashboardEnvelope {
    meta: DashboardMeta,
    dashboard: Box<RawValue>,
}

impl GrafanaClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| format!("failed to build http client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref key) = self.api_key {
            req.bearer_auth(key)
        } else {
            req
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, String> {
        let url = self.endpoint(path);
        let req = self.client.get(&url).query(query);
        let req = self.auth_header(req);

        let resp = req
            .send()
            .await
            .map_err(|e| format!("failed to call {path}: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("{} returned status {}", path, resp.status()));
        }

        resp.json()
            .await
            .map_err(|e| format!("failed to parse {path} response: {e}"))
    }
}

fn search_query(filter: &SearchFilter, page: usize) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("limit", SEARCH_PAGE_LIMIT.to_string()),
        ("page", page.to_string()),
        ("type", "dash-db".to_string()),
    ];
    if let Some(ref title) = filter.title {
        query.push(("query", title.clone()));
    }
    if filter.starred_only {
        query.push(("starred", "true".to_string()));
    }
    for tag in &filter.tags {
        query.push(("tag", tag.clone()));
    }
    query
}

fn is_last_page(hits: usize) -> bool {
    hits < SEARCH_PAGE_LIMIT
}

/// Fetch pages in order, concatenating hits until a short page signals the
/// end of the result set.
async fn collect_paged<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, String>
where
    F: FnMut(usize) -> Fut,
    Fut: std::future::Future<Output = Result<Vec<T>, String>>,
{
    let mut found = Vec::new();
    let mut page = 1;
    loop {
        let mut hits = fetch_page(page).await?;
        let last_page = is_last_page(hits.len());
        found.append(&mut hits);
        if last_page {
            break;
        }
        page += 1;
    }
    Ok(found)
}

#[async_trait]
impl RemoteService for GrafanaClient {
    async fn search_dashboards(
        &self,
        filter: &SearchFilter,
    ) -> BackupResult<Vec<DashboardSummary>> {
        let found = collect_paged(|page| {
            let query = search_query(filter, page);
            async move { self.get_json("/api/search", &query).await }
        })
        .await
        .map_err(|message| BackupError::List {
            entity: "dashboards",
            message,
        })?;

        tracing::debug!("search matched {} dashboards", found.len());
        Ok(found)
    }

    async fn fetch_dashboard(&self, uri: &str) -> BackupResult<RawDashboard> {
        let path = format!("/api/dashboards/{}", uri);
        let envelope: DashboardEnvelope =
            self.get_json(&path, &[])
                .await
                .map_err(|message| BackupError::Fetch {
                    entity: uri.to_string(),
                    message,
                })?;

        Ok(RawDashboard {
            meta: envelope.meta,
            raw: envelope.dashboard.get().as_bytes().to_vec(),
        })
    }

    async fn list_datasources(&self) -> BackupResult<Vec<DatasourceRecord>> {
        self.get_json("/api/datasources", &[])
            .await
            .map_err(|message| BackupError::List {
                entity: "datasources",
                message,
            })
    }

    async fn list_users(&self) -> BackupResult<Vec<UserRecord>> {
        self.get_json("/api/users", &[])
            .await
            .map_err(|message| BackupError::List {
                entity: "users",
                message,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_defaults() {
        let query = search_query(&SearchFilter::default(), 1);
        assert_eq!(
            query,
            vec![
                ("limit", "1000".to_string()),
                ("page", "1".to_string()),
                ("type", "dash-db".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_query_includes_filter_criteria() {
        let filter = SearchFilter {
            title: Some("prod".to_string()),
            starred_only: true,
            tags: vec!["infra".to_string(), "db".to_string()],
        };
        let query = search_query(&filter, 3);

        assert!(query.contains(&("page", "3".to_string())));
        assert!(query.contains(&("query", "prod".to_string())));
        assert!(query.contains(&("starred", "true".to_string())));
        assert!(query.contains(&("tag", "infra".to_string())));
        assert!(query.contains(&("tag", "db".to_string())));
    }

    #[test]
    fn test_pagination_stops_on_a_short_page() {
        assert!(is_last_page(0));
        assert!(is_last_page(999));
        assert!(!is_last_page(1000));
    }

    #[tokio::test]
    async fn test_collect_paged_requests_until_a_short_page() {
        let mut requested = Vec::new();
        let found = collect_paged(|page| {
            requested.push(page);
            let hits = if page == 1 {
                vec![1_u32; SEARCH_PAGE_LIMIT]
            } else {
                vec![2_u32, 2, 2]
            };
            async move { Ok::<_, String>(hits) }
        })
        .await
        .unwrap();

        assert_eq!(requested, vec![1, 2]);
        assert_eq!(found.len(), SEARCH_PAGE_LIMIT + 3);
        assert_eq!(found[0], 1);
        assert_eq!(*found.last().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_collect_paged_propagates_page_failures() {
        let result: Result<Vec<u32>, String> =
            collect_paged(|_page| async move { Err("search exploded".to_string()) }).await;

        assert_eq!(result.unwrap_err(), "search exploded");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GrafanaClient::new("http://grafana:3000/").unwrap();
        assert_eq!(
            client.endpoint("/api/search"),
            "http://grafana:3000/api/search"
        );
    }

    #[test]
    fn test_envelope_keeps_dashboard_bytes_verbatim() {
        let body = r#"{"meta":{"slug":"cpu"},"dashboard":{"title": "CPU",  "rows": []}}"#;
        let envelope: DashboardEnvelope = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.meta.slug, "cpu");
        assert_eq!(envelope.dashboard.get(), r#"{"title": "CPU",  "rows": []}"#);
    }
}
