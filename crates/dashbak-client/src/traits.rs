use async_trait::async_trait;
use dashbak_core::BackupResult;
use dashbak_domain::{DashboardSummary, DatasourceRecord, RawDashboard, SearchFilter, UserRecord};

/// The remote dashboarding service as the backup engine sees it.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Search dashboards matching the filter.
    async fn search_dashboards(&self, filter: &SearchFilter)
        -> BackupResult<Vec<DashboardSummary>>;

    /// Fetch one dashboard by its search URI, bytes untouched.
    async fn fetch_dashboard(&self, uri: &str) -> BackupResult<RawDashboard>;

    /// List every datasource visible to the caller.
    async fn list_datasources(&self) -> BackupResult<Vec<DatasourceRecord>>;

    /// List every user account visible to the caller.
    async fn list_users(&self) -> BackupResult<Vec<UserRecord>>;
}
