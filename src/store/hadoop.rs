//! Archive on a Hadoop filesystem, reached through the `hadoop fs` client.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::process::Command;
use tracing::debug;

use super::{basename, install, staging_dir, RemoteStore};
use crate::{
    cli::create_spinner,
    error::{AuxError, Result},
};

#[derive(Debug)]
pub struct HadoopStore {
    program: String,
}

impl HadoopStore {
    pub fn new(program: &str) -> Self {
        HadoopStore {
            program: program.to_string(),
        }
    }

    fn exists_command(&self, path: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["fs", "-test", "-e", path])
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }

    fn get_command(&self, path: &str, dest: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["fs", "-get", path])
            .arg(dest)
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        command
    }
}

impl RemoteStore for HadoopStore {
    // A non-zero exit of `-test -e` means the path is absent.
    async fn exists(&self, path: &str) -> Result<bool> {
        let status = self.exists_command(path).status().await?;
        debug!(path, found = status.success(), "checked archive path");

        Ok(status.success())
    }

    async fn copy_to_local(&self, path: &str, dest_dir: &Path) -> Result<PathBuf> {
        let dest = dest_dir.join(basename(path));
        let staging = staging_dir(dest_dir)?;
        let staged = staging.path().join(basename(path));

        let bar = create_spinner(format!("Copying {}...", basename(path)));
        let output = self
            .get_command(path, &staged)
            .output()
            .await
            .map_err(|e| AuxError::Transfer {
                path: path.to_string(),
                reason: format!("cannot run `{}`: {e}", self.program),
            })?;

        if !output.status.success() {
            bar.abandon_with_message(format!("Copy of {} failed", basename(path)));
            return Err(AuxError::Transfer {
                path: path.to_string(),
                reason: format!(
                    "`{} fs -get` exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        bar.finish_with_message(format!("Copied {}", basename(path)));

        install(&staged, &dest)?;

        Ok(dest)
    }
}

#[cfg(test)]
mod tests {

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn should_build_client_arguments() {
        let store = HadoopStore::new("hadoop");
        let command = store.exists_command("hdfs://m:9000/anc/x.hdf");
        let args: Vec<_> = command.as_std().get_args().collect();

        assert_eq!(command.as_std().get_program(), "hadoop");
        assert_eq!(args, ["fs", "-test", "-e", "hdfs://m:9000/anc/x.hdf"]);

        let command = store.get_command("hdfs://m:9000/anc/x.hdf", Path::new("/tmp/x.hdf"));
        let args: Vec<_> = command.as_std().get_args().collect();
        assert_eq!(args, ["fs", "-get", "hdfs://m:9000/anc/x.hdf", "/tmp/x.hdf"]);
    }

    #[tokio::test]
    async fn should_treat_missing_client_as_transfer_failure() {
        let work = TempDir::new().unwrap();
        let store = HadoopStore::new("/nonexistent/bin/hadoop");

        let err = store
            .copy_to_local("hdfs://m:9000/anc/x.hdf", work.path())
            .await
            .unwrap_err();
        assert!(matches!(err, AuxError::Transfer { .. }));
    }

    // Client that finds every path but aborts `-get` after writing part of the file.
    fn write_failing_client(dir: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("hadoop");
        std::fs::write(
            &script,
            "#!/bin/sh\n\
             case \"$2\" in\n\
             -test) exit 0 ;;\n\
             -get) echo partial > \"$4\"; echo 'get: connection reset' >&2; exit 1 ;;\n\
             esac\n\
             exit 2\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        script
    }

    #[tokio::test]
    async fn should_fail_transfer_and_leave_nothing_when_get_exits_non_zero() {
        let bin = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let client = write_failing_client(bin.path());
        let store = HadoopStore::new(&client.to_string_lossy());

        assert!(store.exists("hdfs://m/anc/x.hdf").await.unwrap());

        let err = store
            .copy_to_local("hdfs://m/anc/x.hdf", work.path())
            .await
            .unwrap_err();
        match err {
            AuxError::Transfer { path, reason } => {
                assert_eq!(path, "hdfs://m/anc/x.hdf");
                assert!(reason.contains("connection reset"));
            }
            other => panic!("expected transfer failure, got {other:?}"),
        }

        let leftovers: Vec<_> = std::fs::read_dir(work.path()).unwrap().collect();
        assert!(leftovers.is_empty());
    }
}
