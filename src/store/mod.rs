//! Remote archive access: existence checks and copies into the work directory.

pub mod hadoop;
pub mod http;
pub mod local;
#[cfg(test)]
pub mod testing;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tracing::debug;

use crate::error::Result;

pub use hadoop::HadoopStore;
pub use http::HttpStore;
pub use local::LocalStore;

/// The operations the materializer needs from an archive.
pub trait RemoteStore {
    /// Whether `path` exists in the archive.
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Copies `path` into `dest_dir` under its basename and returns the local path.
    ///
    /// If another writer installs the same basename first, its file is kept.
    async fn copy_to_local(&self, path: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// Store chosen from the scheme of the archive location.
pub enum ArchiveStore {
    Hadoop(HadoopStore),
    Http(HttpStore),
    Local(LocalStore),
}

impl ArchiveStore {
    pub fn for_location(location: &str, hadoop_program: &str) -> Self {
        match location.split_once("://") {
            Some(("http", _)) | Some(("https", _)) => ArchiveStore::Http(HttpStore::new()),
            Some(("file", _)) | None => ArchiveStore::Local(LocalStore),
            Some(_) => ArchiveStore::Hadoop(HadoopStore::new(hadoop_program)),
        }
    }
}

impl RemoteStore for ArchiveStore {
    async fn exists(&self, path: &str) -> Result<bool> {
        match self {
            ArchiveStore::Hadoop(store) => store.exists(path).await,
            ArchiveStore::Http(store) => store.exists(path).await,
            ArchiveStore::Local(store) => store.exists(path).await,
        }
    }

    async fn copy_to_local(&self, path: &str, dest_dir: &Path) -> Result<PathBuf> {
        match self {
            ArchiveStore::Hadoop(store) => store.copy_to_local(path, dest_dir).await,
            ArchiveStore::Http(store) => store.copy_to_local(path, dest_dir).await,
            ArchiveStore::Local(store) => store.copy_to_local(path, dest_dir).await,
        }
    }
}

/// Last path segment of an archive path or URL.
pub fn basename(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

/// Private directory in `dest_dir` that a copy is written into before install.
pub(crate) fn staging_dir(dest_dir: &Path) -> io::Result<TempDir> {
    tempfile::Builder::new()
        .prefix(".staging-")
        .tempdir_in(dest_dir)
}

/// Publishes `staged` as `dest` unless `dest` already exists.
///
/// The hard link either creates `dest` or fails, so concurrent runs sharing a
/// work directory never observe a partially written file.
pub(crate) fn install(staged: &Path, dest: &Path) -> io::Result<()> {
    match fs::hard_link(staged, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            debug!(path = %dest.display(), "already installed by another writer");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
