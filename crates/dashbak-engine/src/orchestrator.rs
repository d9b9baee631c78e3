//! The backup run itself: mode resolution and the three entity passes.

use dashbak_client::RemoteService;
use dashbak_core::{BackupError, BackupResult, CancellationToken};
use dashbak_domain::{backup_file_name, BackupRequest, EntityKind};
use std::collections::HashSet;
use std::sync::Arc;

use crate::report::{BackupReport, PassKind, PassReport};
use crate::store;

pub struct BackupOrchestrator {
    remote: Arc<dyn RemoteService>,
    request: BackupRequest,
    token: CancellationToken,
}

impl BackupOrchestrator {
    pub fn new(remote: Arc<dyn RemoteService>, request: BackupRequest) -> Self {
        Self {
            remote,
            request,
            token: CancellationToken::new(),
        }
    }

    /// Use an externally owned token so callers can cancel the run.
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Run the requested passes. Setup failures and cancellation abort the
    /// run; in hierarchical mode a failed dashboard search does too. Any
    /// other pass-level failure is recorded and the remaining passes run.
    pub async fn run(&self) -> BackupResult<BackupReport> {
        let started_at = chrono::Utc::now();
        let mut passes = Vec::new();

        if self.request.hierarchical {
            // Dashboards drive everything else; the other mode flags are
            // ignored and only referenced datasources get backed up.
            let mut references = HashSet::new();
            passes.push(self.dashboard_pass(Some(&mut references)).await?);
            passes.push(self.datasource_pass(Some(&references)).await?);
        } else {
            if self.request.dashboards {
                let outcome = self.dashboard_pass(None).await;
                self.finish_pass(&mut passes, PassKind::Dashboards, outcome)?;
            }
            if self.request.datasources {
                let outcome = self.datasource_pass(None).await;
                self.finish_pass(&mut passes, PassKind::Datasources, outcome)?;
            }
            if self.request.users {
                let outcome = self.user_pass().await;
                self.finish_pass(&mut passes, PassKind::Users, outcome)?;
            }
        }

        Ok(BackupReport {
            started_at,
            finished_at: chrono::Utc::now(),
            passes,
        })
    }

    fn finish_pass(
        &self,
        passes: &mut Vec<PassReport>,
        kind: PassKind,
        outcome: BackupResult<PassReport>,
    ) -> BackupResult<()> {
        match outcome {
            Ok(report) => {
                passes.push(report);
                Ok(())
            }
            Err(error @ (BackupError::Setup { .. } | BackupError::Cancelled)) => Err(error),
            Err(error) => {
                tracing::error!("{} pass aborted: {}", kind, error);
                let mut report = PassReport::new(kind);
                report.abort(error);
                passes.push(report);
                Ok(())
            }
        }
    }

    async fn dashboard_pass(
        &self,
        mut references: Option<&mut HashSet<String>>,
    ) -> BackupResult<PassReport> {
        let mut report = PassReport::new(PassKind::Dashboards);

        store::ensure_dir(&self.request.output_dir).await?;

        let summaries = self.remote.search_dashboards(&self.request.filter).await?;
        tracing::info!("found {} dashboards matching the conditions", summaries.len());

        for summary in &summaries {
            if self.token.is_cancelled() {
                return Err(BackupError::Cancelled);
            }

            let dashboard = match self.remote.fetch_dashboard(&summary.uri).await {
                Ok(dashboard) => dashboard,
                Err(error) => {
                    tracing::error!("{}", error);
                    report.record_failure(error);
                    continue;
                }
            };

            // A malformed document loses its references but still gets
            // backed up below.
            if let Some(names) = references.as_deref_mut() {
                match dashboard.parse() {
                    Ok(document) => {
                        for name in document.referenced_datasources() {
                            tracing::info!(
                                "found datasource [{}] in dashboard [{}]",
                                name,
                                summary.title
                            );
                            names.insert(name);
                        }
                    }
                    Err(error) => {
                        let error = BackupError::Parse {
                            entity: dashboard.meta.slug.clone(),
                            message: error.to_string(),
                        };
                        tracing::error!("{}", error);
                        report.record_failure(error);
                    }
                }
            }

            let file_name = backup_file_name(EntityKind::Dashboard, &dashboard.meta.slug);
            match store::write_entity(&self.request.output_dir, &file_name, &dashboard.raw).await {
                Ok(path) => {
                    report.written += 1;
                    tracing::info!("{} written into {}", dashboard.meta.slug, path.display());
                }
                Err(error) => {
                    tracing::error!("{}", error);
                    report.record_failure(error);
                }
            }
        }

        Ok(report)
    }

    async fn datasource_pass(
        &self,
        references: Option<&HashSet<String>>,
    ) -> BackupResult<PassReport> {
        let mut report = PassReport::new(PassKind::Datasources);

        store::ensure_dir(&self.request.output_dir).await?;

        let records = self.remote.list_datasources().await?;
        tracing::info!("found {} datasources", records.len());

        for record in &records {
            // Hierarchical runs only keep datasources some dashboard uses.
            if let Some(wanted) = references {
                if !wanted.contains(&record.name) {
                    continue;
                }
            }

            if self.token.is_cancelled() {
                return Err(BackupError::Cancelled);
            }

            let bytes = match serde_json::to_vec_pretty(record) {
                Ok(bytes) => bytes,
                Err(error) => {
                    let error = BackupError::Serialize {
                        entity: record.name.clone(),
                        message: error.to_string(),
                    };
                    tracing::error!("{}", error);
                    report.record_failure(error);
                    continue;
                }
            };

            let file_name = backup_file_name(
                EntityKind::Datasource {
                    org_id: record.org_id,
                },
                &record.name,
            );
            match store::write_entity(&self.request.output_dir, &file_name, &bytes).await {
                Ok(path) => {
                    report.written += 1;
                    tracing::info!("{} written into {}", record.name, path.display());
                }
                Err(error) => {
                    tracing::error!("{}", error);
                    report.record_failure(error);
                }
            }
        }

        Ok(report)
    }

    async fn user_pass(&self) -> BackupResult<PassReport> {
        let mut report = PassReport::new(PassKind::Users);

        store::ensure_dir(&self.request.output_dir).await?;

        let users = self.remote.list_users().await?;
        tracing::info!("found {} users", users.len());

        for user in &users {
            if self.token.is_cancelled() {
                return Err(BackupError::Cancelled);
            }

            let bytes = match serde_json::to_vec_pretty(user) {
                Ok(bytes) => bytes,
                Err(error) => {
                    let error = BackupError::Serialize {
                        entity: user.login.clone(),
                        message: error.to_string(),
                    };
                    tracing::error!("{}", error);
                    report.record_failure(error);
                    continue;
                }
            };

            let file_name =
                backup_file_name(EntityKind::User { org_id: user.org_id }, &user.login);
            match store::write_entity(&self.request.output_dir, &file_name, &bytes).await {
                Ok(path) => {
                    report.written += 1;
                    tracing::info!("{} written into {}", user.login, path.display());
                }
                Err(error) => {
                    tracing::error!("{}", error);
                    report.record_failure(error);
                }
            }
        }

        Ok(report)
    }
}
