//! Error taxonomy for bracket materialization and interpolation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuxError>;

/// Errors raised while resolving, fetching or interpolating ancillary data.
///
/// An unavailable bracket is not an error: it is reported as `None` by the
/// materializer. Everything here is fatal for the run.
#[derive(Debug, Error)]
pub enum AuxError {
    /// The store reported the path as present but the copy failed.
    #[error("transfer of `{path}` failed: {reason}")]
    Transfer { path: String, reason: String },

    /// The two bracket files disagree on a variable's type or shape.
    #[error("schema mismatch between bracket files for `{variable}`: {detail}")]
    SchemaMismatch { variable: String, detail: String },

    /// An expected variable is absent from a bracket file.
    #[error("variable `{variable}` not found in {}", path.display())]
    MissingVariable { variable: String, path: PathBuf },

    /// The invocation input could not be turned into a timestamp.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A container is readable but its contents are malformed.
    #[error("malformed container: {0}")]
    Container(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
