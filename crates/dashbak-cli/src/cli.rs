use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dashbak")]
#[command(about = "Back up dashboards, datasources, and users from a Grafana-compatible service")]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Base URL of the service, e.g. http://localhost:3000
    #[arg(long, env = "DASHBAK_URL")]
    pub url: Option<String>,

    /// API key used as a bearer token on every request
    #[arg(long, env = "DASHBAK_API_KEY")]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export entities into a directory of JSON files
    Backup(BackupArgs),
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct BackupArgs {
    /// Directory the backup files are written into
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Back up dashboards
    #[arg(long)]
    pub dashboards: bool,

    /// Back up datasources
    #[arg(long)]
    pub datasources: bool,

    /// Back up users
    #[arg(long)]
    pub users: bool,

    /// Back up dashboards plus only the datasources they reference
    #[arg(long)]
    pub hierarchical: bool,

    /// Keep only dashboards whose title matches this search string
    #[arg(long, value_name = "QUERY")]
    pub title: Option<String>,

    /// Keep only starred dashboards
    #[arg(long)]
    pub starred: bool,

    /// Keep only dashboards carrying these tags (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "TAG")]
    pub tags: Vec<String>,

    /// Log per-item progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
