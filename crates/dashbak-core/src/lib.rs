pub mod cancel;
pub mod config;
pub mod error;
pub mod result;

pub use cancel::CancellationToken;
pub use config::AppConfig;
pub use error::BackupError;
pub use result::BackupResult;
