use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Setup failed for {}: {source}", path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Listing {entity} failed: {message}")]
    List {
        entity: &'static str,
        message: String,
    },

    #[error("Fetching {entity} failed: {message}")]
    Fetch { entity: String, message: String },

    #[error("Parsing {entity} failed: {message}")]
    Parse { entity: String, message: String },

    #[error("Serializing {entity} failed: {message}")]
    Serialize { entity: String, message: String },

    #[error("Writing {} failed: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Backup cancelled")]
    Cancelled,
}

impl BackupError {
    /// Short stable tag for summaries and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Setup { .. } => "setup",
            Self::List { .. } => "list",
            Self::Fetch { .. } => "fetch",
            Self::Parse { .. } => "parse",
            Self::Serialize { .. } => "serialize",
            Self::Write { .. } => "write",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
