use std::path::PathBuf;

/// What one backup invocation should do, resolved from flags, environment,
/// and the config file before the orchestrator runs.
#[derive(Debug, Clone, Default)]
pub struct BackupRequest {
    pub hierarchical: bool,
    pub dashboards: bool,
    pub datasources: bool,
    pub users: bool,
    pub filter: SearchFilter,
    pub output_dir: PathBuf,
    pub verbose: bool,
}

impl BackupRequest {
    /// True when at least one backup mode is requested.
    pub fn wants_any(&self) -> bool {
        self.hierarchical || self.dashboards || self.datasources || self.users
    }
}

/// Server-side search criteria for the dashboard pass.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub title: Option<String>,
    pub starred_only: bool,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_any() {
        let mut request = BackupRequest::default();
        assert!(!request.wants_any());

        request.users = true;
        assert!(request.wants_any());

        let hierarchical = BackupRequest {
            hierarchical: true,
            ..Default::default()
        };
        assert!(hierarchical.wants_any());
    }
}
