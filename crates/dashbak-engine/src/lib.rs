pub mod orchestrator;
pub mod report;
pub mod store;

pub use orchestrator::BackupOrchestrator;
pub use report::{BackupReport, ErrorSummary, PassKind, PassReport, PassSummary, ReportSummary};
