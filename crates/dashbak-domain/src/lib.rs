pub mod dashboard;
pub mod datasource;
pub mod naming;
pub mod request;
pub mod user;

pub use dashboard::{DashboardDocument, DashboardMeta, DashboardSummary, Panel, RawDashboard, Row};
pub use datasource::DatasourceRecord;
pub use naming::{backup_file_name, slugify, EntityKind};
pub use request::{BackupRequest, SearchFilter};
pub use user::UserRecord;
