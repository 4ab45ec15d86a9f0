//! Archive mounted on the local filesystem.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{basename, install, staging_dir, RemoteStore};
use crate::error::{AuxError, Result};

#[derive(Debug, Default)]
pub struct LocalStore;

fn local_path(path: &str) -> &Path {
    Path::new(path.strip_prefix("file://").unwrap_or(path))
}

impl RemoteStore for LocalStore {
    async fn exists(&self, path: &str) -> Result<bool> {
        let found = tokio::fs::try_exists(local_path(path)).await?;
        debug!(path, found, "checked archive path");

        Ok(found)
    }

    async fn copy_to_local(&self, path: &str, dest_dir: &Path) -> Result<PathBuf> {
        let dest = dest_dir.join(basename(path));
        let staging = staging_dir(dest_dir)?;
        let staged = staging.path().join(basename(path));

        tokio::fs::copy(local_path(path), &staged)
            .await
            .map_err(|e| AuxError::Transfer {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        install(&staged, &dest)?;

        Ok(dest)
    }
}

#[cfg(test)]
mod tests {

    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn should_check_and_copy_files() {
        let archive = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let source = archive.path().join("N200516600_O3_TOMSOMI_24h.hdf");
        fs::write(&source, b"ozone").unwrap();
        let source = source.to_string_lossy().to_string();

        let store = LocalStore;
        assert!(store.exists(&source).await.unwrap());
        assert!(!store.exists(&format!("{source}.missing")).await.unwrap());

        let copied = store.copy_to_local(&source, work.path()).await.unwrap();
        assert_eq!(copied, work.path().join("N200516600_O3_TOMSOMI_24h.hdf"));
        assert_eq!(fs::read(&copied).unwrap(), b"ozone");

        // Only the installed file remains, the staging directory is gone.
        assert_eq!(fs::read_dir(work.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn should_accept_file_urls() {
        let archive = TempDir::new().unwrap();
        let source = archive.path().join("a.hdf");
        fs::write(&source, b"a").unwrap();

        let url = format!("file://{}", source.display());
        assert!(LocalStore.exists(&url).await.unwrap());
    }

    #[tokio::test]
    async fn should_fail_transfer_of_missing_file() {
        let work = TempDir::new().unwrap();
        let err = LocalStore
            .copy_to_local("/nonexistent/anc/x.hdf", work.path())
            .await
            .unwrap_err();

        assert!(matches!(err, AuxError::Transfer { .. }));
    }
}
