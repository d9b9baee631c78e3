mod cli;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Backup(args) => args.verbose,
        _ => false,
    };
    init_tracing(verbose)?;

    match cli.command {
        Commands::Backup(args) => handlers::backup::handle(cli.url, cli.api_key, args).await,
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    // When DASHBAK_DEBUG_LOG is set, send everything to that file instead
    // of stderr so the JSON output stays clean.
    if let Ok(log_path) = std::env::var("DASHBAK_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        let level = if verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        };
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(level)
            .init();
    }
    Ok(())
}
