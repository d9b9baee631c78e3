use chrono::{DateTime, Utc};
use dashbak_core::BackupError;
use serde::Serialize;
use std::fmt;

/// Which backup pass a report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    Dashboards,
    Datasources,
    Users,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboards => write!(f, "dashboards"),
            Self::Datasources => write!(f, "datasources"),
            Self::Users => write!(f, "users"),
        }
    }
}

/// Outcome of one pass: how many files were written, how many items failed,
/// and the recorded errors. A pass that could not list its entities carries
/// the cause in `aborted`.
#[derive(Debug)]
pub struct PassReport {
    pub kind: PassKind,
    pub written: usize,
    pub failed: usize,
    pub errors: Vec<BackupError>,
    pub aborted: Option<BackupError>,
}

impl PassReport {
    pub fn new(kind: PassKind) -> Self {
        Self {
            kind,
            written: 0,
            failed: 0,
            errors: Vec::new(),
            aborted: None,
        }
    }

    pub fn record_failure(&mut self, error: BackupError) {
        self.failed += 1;
        self.errors.push(error);
    }

    pub fn abort(&mut self, error: BackupError) {
        self.aborted = Some(error);
    }

    pub fn completed(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Outcome of a whole run.
#[derive(Debug)]
pub struct BackupReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub passes: Vec<PassReport>,
}

impl BackupReport {
    pub fn files_written(&self) -> usize {
        self.passes.iter().map(|pass| pass.written).sum()
    }

    pub fn items_failed(&self) -> usize {
        self.passes.iter().map(|pass| pass.failed).sum()
    }

    /// True when every pass ran to the end of its item list. Per-item
    /// failures do not make a run incomplete.
    pub fn is_complete(&self) -> bool {
        self.passes.iter().all(|pass| pass.completed())
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            success: self.is_complete(),
            started_at: self.started_at,
            finished_at: self.finished_at,
            files_written: self.files_written(),
            items_failed: self.items_failed(),
            passes: self
                .passes
                .iter()
                .map(|pass| PassSummary {
                    pass: pass.kind,
                    written: pass.written,
                    failed: pass.failed,
                    errors: pass
                        .errors
                        .iter()
                        .map(|error| ErrorSummary {
                            kind: error.kind(),
                            message: error.to_string(),
                        })
                        .collect(),
                    aborted: pass.aborted.as_ref().map(|error| error.to_string()),
                })
                .collect(),
        }
    }
}

/// Serializable view of a finished run for CLI output.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub success: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub files_written: usize,
    pub items_failed: usize,
    pub passes: Vec<PassSummary>,
}

#[derive(Debug, Serialize)]
pub struct PassSummary {
    pub pass: PassKind,
    pub written: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

/// One recorded per-item failure, tagged with its error kind.
#[derive(Debug, Serialize)]
pub struct ErrorSummary {
    pub kind: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_totals_span_passes() {
        let mut dashboards = PassReport::new(PassKind::Dashboards);
        dashboards.written = 3;
        dashboards.record_failure(BackupError::Fetch {
            entity: "db/broken".to_string(),
            message: "timeout".to_string(),
        });

        let mut users = PassReport::new(PassKind::Users);
        users.written = 2;

        let report = BackupReport {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            passes: vec![dashboards, users],
        };

        assert_eq!(report.files_written(), 5);
        assert_eq!(report.items_failed(), 1);
        assert!(report.is_complete());
    }

    #[test]
    fn test_aborted_pass_makes_run_incomplete() {
        let mut pass = PassReport::new(PassKind::Datasources);
        pass.abort(BackupError::List {
            entity: "datasources",
            message: "connection refused".to_string(),
        });

        let report = BackupReport {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            passes: vec![pass],
        };

        assert!(!report.is_complete());

        let summary = report.summary();
        assert!(!summary.success);
        assert!(summary.passes[0]
            .aborted
            .as_deref()
            .unwrap()
            .contains("connection refused"));
    }

    #[test]
    fn test_summary_tags_recorded_errors() {
        let mut pass = PassReport::new(PassKind::Dashboards);
        pass.record_failure(BackupError::Fetch {
            entity: "db/broken".to_string(),
            message: "timeout".to_string(),
        });

        let report = BackupReport {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            passes: vec![pass],
        };

        let json = serde_json::to_value(report.summary()).unwrap();
        assert_eq!(json["passes"][0]["errors"][0]["kind"], "fetch");
        assert!(json["passes"][0]["errors"][0]["message"]
            .as_str()
            .unwrap()
            .contains("db/broken"));
    }

    #[test]
    fn test_summary_serializes_pass_names() {
        let report = BackupReport {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            passes: vec![PassReport::new(PassKind::Dashboards)],
        };

        let json = serde_json::to_value(report.summary()).unwrap();
        assert_eq!(json["passes"][0]["pass"], "dashboards");
        assert_eq!(json["success"], true);
    }
}
