//! Archive published over HTTP, e.g. the OBPG ancillary mirror.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use indicatif::ProgressStyle;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::debug;

use super::{basename, install, staging_dir, RemoteStore};
use crate::{
    cli::create_spinner,
    error::{AuxError, Result},
};

#[derive(Debug, Default)]
pub struct HttpStore {
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new() -> Self {
        HttpStore::default()
    }

    /// Streams `url` into `file_path`, showing byte progress when the length is known.
    async fn download_with_progress(&self, url: &str, file_path: &Path) -> Result<()> {
        let transfer_error = |reason: String| AuxError::Transfer {
            path: url.to_string(),
            reason,
        };

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(transfer_error(format!("server answered {}", response.status())));
        }

        let bar = create_spinner(format!("Downloading {}...", basename(url)));
        let total_size = response.content_length().unwrap_or(0);
        if total_size > 0 {
            if let Ok(style) = ProgressStyle::with_template(
                "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {eta}",
            ) {
                bar.set_length(total_size);
                bar.set_style(style.progress_chars("=> "));
            }
        }

        let mut file = File::create(file_path).await?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| transfer_error(format!("error reading chunk: {e}")))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            bar.set_position(downloaded);
        }
        file.flush().await?;
        bar.finish_with_message(format!("Downloaded {}", basename(url)));

        Ok(())
    }
}

impl RemoteStore for HttpStore {
    async fn exists(&self, path: &str) -> Result<bool> {
        let response = self.client.head(path).send().await?;
        let found = response.status().is_success();
        debug!(path, found, status = %response.status(), "checked archive path");

        Ok(found)
    }

    async fn copy_to_local(&self, path: &str, dest_dir: &Path) -> Result<PathBuf> {
        let dest = dest_dir.join(basename(path));
        let staging = staging_dir(dest_dir)?;
        let staged = staging.path().join(basename(path));

        self.download_with_progress(path, &staged)
            .await
            .map_err(|e| match e {
                AuxError::Transfer { .. } => e,
                other => AuxError::Transfer {
                    path: path.to_string(),
                    reason: other.to_string(),
                },
            })?;
        install(&staged, &dest)?;

        Ok(dest)
    }
}
