//! Store helpers for tests.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::Mutex,
};

use super::{LocalStore, RemoteStore};
use crate::error::{AuxError, Result};

/// A local archive that records every copy and fails copies of chosen paths.
#[derive(Default)]
pub struct RecordingStore {
    inner: LocalStore,
    failing: HashSet<String>,
    copies: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn failing_on(path: &str) -> Self {
        let mut store = RecordingStore::default();
        store.failing.insert(path.to_string());
        store
    }

    pub fn copies(&self) -> Vec<String> {
        self.copies.lock().unwrap().clone()
    }
}

impl RemoteStore for RecordingStore {
    async fn exists(&self, path: &str) -> Result<bool> {
        self.inner.exists(path).await
    }

    async fn copy_to_local(&self, path: &str, dest_dir: &Path) -> Result<PathBuf> {
        self.copies.lock().unwrap().push(path.to_string());
        if self.failing.contains(path) {
            return Err(AuxError::Transfer {
                path: path.to_string(),
                reason: "connection reset".to_string(),
            });
        }

        self.inner.copy_to_local(path, dest_dir).await
    }
}
