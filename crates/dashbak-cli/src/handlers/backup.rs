use crate::cli::BackupArgs;
use crate::output;
use dashbak_client::GrafanaClient;
use dashbak_core::{AppConfig, CancellationToken};
use dashbak_domain::{BackupRequest, SearchFilter};
use dashbak_engine::BackupOrchestrator;
use std::sync::Arc;

pub async fn handle(
    url: Option<String>,
    api_key: Option<String>,
    args: BackupArgs,
) -> anyhow::Result<()> {
    let config = AppConfig::load();

    let request = BackupRequest {
        hierarchical: args.hierarchical,
        dashboards: args.dashboards,
        datasources: args.datasources,
        users: args.users,
        filter: SearchFilter {
            title: args.title,
            starred_only: args.starred,
            tags: args.tags,
        },
        output_dir: args.dir.unwrap_or_else(|| config.effective_output_dir()),
        verbose: args.verbose,
    };

    if !request.wants_any() {
        output::output_error(
            "nothing to back up: pass --dashboards, --datasources, --users, or --hierarchical",
        );
    }

    let url = match url.or(config.url) {
        Some(url) => url,
        None => output::output_error(
            "no service url configured: pass --url, set DASHBAK_URL, or add url to the config file",
        ),
    };
    let api_key = api_key.or(config.api_key);

    let client = match GrafanaClient::new(url) {
        Ok(client) => client,
        Err(message) => output::output_error(&message),
    };
    let client = match api_key {
        Some(key) => client.with_api_key(key),
        None => client,
    };

    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping after the current item");
            signal_token.cancel();
        }
    });

    let orchestrator = BackupOrchestrator::new(Arc::new(client), request).with_token(token);

    match orchestrator.run().await {
        Ok(report) => {
            output::print_summary(&report.summary());
            if report.is_complete() {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
        Err(error) if error.is_cancelled() => {
            tracing::warn!("backup cancelled");
            std::process::exit(130);
        }
        Err(error) => output::output_error(&error.to_string()),
    }
}
