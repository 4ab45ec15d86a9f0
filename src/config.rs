//! Run configuration.

use std::path::PathBuf;

/// Archive base location of the SeaDAS ancillary data on the Calvalus cluster.
pub const DEFAULT_ARCHIVE: &str = "hdfs://master00:9000/calvalus/auxiliary/seadas/anc";

#[derive(Debug, Clone)]
/// Where bracket datasets come from and where files are written.
pub struct Config {
    /// Base location of the ancillary archive (`hdfs://`, `http(s)://`, or a local path).
    pub archive: String,
    /// Flat directory that bracket datasets are copied into and reused from.
    pub work_dir: PathBuf,
    /// Directory receiving the interpolated containers.
    pub output_dir: PathBuf,
    /// Hadoop filesystem client used for `hdfs://` archives.
    pub hadoop: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            archive: DEFAULT_ARCHIVE.to_string(),
            work_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            hadoop: "hadoop".to_string(),
        }
    }
}
