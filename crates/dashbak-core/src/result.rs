use crate::error::BackupError;

pub type BackupResult<T> = Result<T, BackupError>;
