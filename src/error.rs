//! Error types shared by the loader, the classifier and the entry point.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller handed the classifier something it cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// The dataset file could not be read or parsed.
    #[error("failed to load dataset: {0}")]
    Load(#[from] LoadError),

    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Process exit status for the binary: 1 when the dataset cannot be
    /// loaded, 2 for configuration and classification input errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Load(_) => 1,
            Error::InvalidInput(_) | Error::Config(_) => 2,
        }
    }
}

/// Precondition failures of distance computation and classification.
///
/// These are recoverable: the caller can fix the input and try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("dataset is empty")]
    EmptyDataset,

    /// `k` must be at least 1.
    #[error("k must be a positive integer, got {0}")]
    NonPositiveK(i64),

    #[error("k = {k} exceeds the dataset size of {len}")]
    KExceedsDataset { k: usize, len: usize },

    /// Two feature vectors that must be compared have different lengths.
    /// `index` is the 0-based dataset position involved, when there is one.
    #[error("feature length mismatch{}: expected {expected}, found {found}", index_suffix(.index))]
    DimensionMismatch {
        expected: usize,
        found: usize,
        index: Option<usize>,
    },
}

fn index_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}

/// Errors produced while reading or writing a dataset file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV, ragged rows or an I/O failure mid-read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}, column {column}: {value:?} is not a real number")]
    InvalidFeature {
        row: usize,
        column: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("row {row} has no label column")]
    MissingLabel { row: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced while building a [`crate::config::KnnConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot parse query point {input:?}: {reason}")]
    Query { input: String, reason: String },
}
