//! Error types for the Duel pipeline.
//!
//! Every stage (loading, metrics, rendering, reporting) reports failures
//! through [`DuelError`] so the pipeline can abort before any output is
//! produced.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized Result type for Duel operations.
pub type DuelResult<T> = Result<T, DuelError>;

/// The main error type for Duel operations.
#[derive(Error, Debug)]
pub enum DuelError {
    /// An input file could not be opened or read.
    #[error("Cannot read {}: {source}", path.display())]
    ResourceUnavailable {
        /// Path of the unreadable resource.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A data row contained a field that could not be parsed.
    #[error("Malformed record in {} at line {line}: {reason}", path.display())]
    MalformedRecord {
        /// Path of the offending file.
        path: PathBuf,
        /// 1-based line number in the source file.
        line: u64,
        /// Description of the parse failure.
        reason: String,
    },

    /// A metric requiring at least one record was given none.
    #[error("Cannot compute {metric}: series is empty")]
    EmptySeries {
        /// Name of the metric being computed.
        metric: &'static str,
    },

    /// A computation would divide by zero.
    #[error("Division by zero in {operation}")]
    DivisionByZero {
        /// The operation that failed.
        operation: &'static str,
    },

    /// An output artifact could not be written.
    #[error("Cannot write {}: {source}", path.display())]
    OutputWriteFailure {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The drawing backend failed while rendering a chart.
    #[error("Chart rendering failed: {reason}")]
    RenderFailure {
        /// Description of the failure.
        reason: String,
    },
}

impl DuelError {
    /// Create a resource unavailable error.
    #[must_use]
    pub fn unavailable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::ResourceUnavailable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a malformed record error.
    #[must_use]
    pub fn malformed(path: impl AsRef<Path>, line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            path: path.as_ref().to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    /// Create an output write failure.
    #[must_use]
    pub fn write_failure(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::OutputWriteFailure {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a render failure.
    #[must_use]
    pub fn render(reason: impl Into<String>) -> Self {
        Self::RenderFailure {
            reason: reason.into(),
        }
    }
}
