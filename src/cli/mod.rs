//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use indicatif::ProgressBar;

use crate::{
    config::{Config, DEFAULT_ARCHIVE},
    input::DEFAULT_STAMP_OFFSET,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Interpolates NCEP meteo and TOMS/OMI ozone ancillary data in time
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interpolate both families to the time stamped in a product name
    Interpolate {
        /// Product file name holding a `YYYYMMDD_HHMMSS` stamp
        input: String,
        /// Character offset of the stamp in the file name
        #[arg(long, default_value_t = DEFAULT_STAMP_OFFSET)]
        offset: usize,
    },
    /// Show bracket boundaries and candidate archive paths without fetching
    Resolve {
        /// Product file name holding a `YYYYMMDD_HHMMSS` stamp
        input: String,
        /// Character offset of the stamp in the file name
        #[arg(long, default_value_t = DEFAULT_STAMP_OFFSET)]
        offset: usize,
    },
}

#[derive(Args)]
/// Archive and directory settings
pub struct Settings {
    /// Base location of the ancillary archive
    #[arg(long, global = true, env = "AUXINTERP_ARCHIVE", default_value = DEFAULT_ARCHIVE)]
    pub archive: String,

    /// Directory bracket files are copied into and reused from
    #[arg(long, global = true, env = "AUXINTERP_WORK_DIR", default_value = ".")]
    pub work_dir: PathBuf,

    /// Directory receiving the interpolated files
    #[arg(long, global = true, env = "AUXINTERP_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Hadoop client used for hdfs archives
    #[arg(long, global = true, env = "AUXINTERP_HADOOP", default_value = "hadoop")]
    pub hadoop: String,
}

impl Settings {
    pub fn config(&self) -> Config {
        Config {
            archive: self.archive.clone(),
            work_dir: self.work_dir.clone(),
            output_dir: self.output_dir.clone(),
            hadoop: self.hadoop.clone(),
        }
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}
