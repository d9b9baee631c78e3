//! Filesystem side of a backup run.

use dashbak_core::{BackupError, BackupResult};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Verify the backup directory exists, creating it and any missing parents.
/// Fails when the path exists but is not a directory.
pub async fn ensure_dir(path: &Path) -> BackupResult<()> {
    match fs::metadata(path).await {
        Ok(meta) => {
            if meta.is_dir() {
                Ok(())
            } else {
                Err(BackupError::Setup {
                    path: path.to_path_buf(),
                    source: io::Error::other("path exists and is not a directory"),
                })
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => fs::create_dir_all(path)
            .await
            .map_err(|source| BackupError::Setup {
                path: path.to_path_buf(),
                source,
            }),
        Err(source) => Err(BackupError::Setup {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write one entity file atomically: temp file in the target directory,
/// then rename over the final name.
pub async fn write_entity(dir: &Path, file_name: &str, bytes: &[u8]) -> BackupResult<PathBuf> {
    let path = dir.join(file_name);

    let temp_file = tempfile::NamedTempFile::new_in(dir).map_err(|source| BackupError::Write {
        path: path.clone(),
        source,
    })?;
    let temp_path = temp_file.path().to_path_buf();

    fs::write(&temp_path, bytes)
        .await
        .map_err(|source| BackupError::Write {
            path: path.clone(),
            source,
        })?;

    fs::rename(&temp_path, &path)
        .await
        .map_err(|source| BackupError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
