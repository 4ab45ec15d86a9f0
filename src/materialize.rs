//! Makes bracket datasets available as local files.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    bracket::{identifiers, Bracket, BracketBoundary, DatasetIdentifier},
    error::Result,
    store::{basename, RemoteStore},
};

#[derive(Debug, Clone, PartialEq)]
/// A bracket dataset present in the work directory.
pub struct LocalDataset {
    pub identifier: DatasetIdentifier,
    pub path: PathBuf,
}

/// Fetches bracket datasets from an archive into a flat work directory.
pub struct Materializer<'a, S> {
    store: &'a S,
    archive: &'a str,
    work_dir: &'a Path,
}

impl<'a, S: RemoteStore> Materializer<'a, S> {
    pub fn new(store: &'a S, archive: &'a str, work_dir: &'a Path) -> Self {
        Materializer {
            store,
            archive,
            work_dir,
        }
    }

    /// Returns the first candidate of `boundary` that exists in the archive.
    ///
    /// `Ok(None)` means no candidate exists. A failed copy of an existing
    /// candidate is an error.
    pub async fn materialize(&self, boundary: &BracketBoundary) -> Result<Option<LocalDataset>> {
        for (rank, identifier) in identifiers(self.archive, boundary).into_iter().enumerate() {
            if !self.store.exists(&identifier.path).await? {
                debug!(path = %identifier.path, "not in archive");
                continue;
            }
            if rank > 0 {
                info!(path = %identifier.path, scheme = ?identifier.scheme, "using fallback naming");
            }

            let path = self.fetch(&identifier.path).await?;
            return Ok(Some(LocalDataset { identifier, path }));
        }

        warn!(
            family = %boundary.family,
            instant = %boundary.instant,
            "no dataset in archive"
        );
        Ok(None)
    }

    /// Materializes both boundaries; `None` unless both are available.
    pub async fn materialize_bracket(
        &self,
        bracket: &Bracket,
    ) -> Result<Option<(LocalDataset, LocalDataset)>> {
        let start = self.materialize(&bracket.start).await?;
        let end = self.materialize(&bracket.end).await?;

        match (start, end) {
            (Some(start), Some(end)) => Ok(Some((start, end))),
            _ => Ok(None),
        }
    }

    // Copy-if-absent, keyed on basename.
    async fn fetch(&self, remote: &str) -> Result<PathBuf> {
        let local = self.work_dir.join(basename(remote));
        if tokio::fs::try_exists(&local).await? {
            debug!(path = %local.display(), "reusing local copy");
            return Ok(local);
        }

        info!(path = remote, "copying to work directory");
        self.store.copy_to_local(remote, self.work_dir).await
    }
}

// -- Tests -------------------------------------------------------------------
