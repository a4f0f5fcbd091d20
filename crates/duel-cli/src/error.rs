//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum CliError {
    /// The config file could not be read.
    #[error("Cannot read config file {}: {source}", path.display())]
    ConfigRead {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`DuelConfig`](crate::config::DuelConfig).
    #[error("Invalid config file {}: {source}", path.display())]
    ConfigParse {
        /// Config path.
        path: PathBuf,
        /// Parser failure.
        #[source]
        source: toml::de::Error,
    },

    /// A series has no ticker.
    #[error("Series {series} ticker is empty")]
    EmptyTicker {
        /// `a` or `b`.
        series: &'static str,
    },

    /// Both series name the same security.
    #[error("Both series use ticker {ticker}; pick two different securities")]
    DuplicateTicker {
        /// The shared ticker.
        ticker: String,
    },

    /// The requested canvas is too small to lay out.
    #[error("Chart size {width}x{height} is below the minimum of {min_width}x{min_height}")]
    ChartTooSmall {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Minimum width.
        min_width: u32,
        /// Minimum height.
        min_height: u32,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
