//! Run configuration.
//!
//! Loaded from a TOML file when `--config` is given, otherwise built from
//! defaults. Command-line flags are applied on top before validation.

use std::path::{Path, PathBuf};

use duel_chart::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use duel_core::Security;
use duel_report::{InputSpec, DEFAULT_SUMMARY_FILE};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CliError, CliResult};

/// Smallest canvas the chart layout supports.
pub const MIN_CHART_SIZE: (u32, u32) = (400, 300);

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Directory holding the conventional CSV files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// First security
    #[serde(default = "default_series_a")]
    pub series_a: SeriesConfig,

    /// Second security
    #[serde(default = "default_series_b")]
    pub series_b: SeriesConfig,

    /// Output destinations
    #[serde(default)]
    pub output: OutputConfig,
}

/// One security and optional explicit input paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Exchange ticker
    pub ticker: String,

    /// Display name; the ticker is used when absent
    pub name: Option<String>,

    /// Price table, overriding `<data_dir>/<TICKER>_stock_price.csv`
    pub prices: Option<PathBuf>,

    /// Dividend table, overriding `<data_dir>/<TICKER>_stock_dividend.csv`
    pub dividends: Option<PathBuf>,
}

impl SeriesConfig {
    fn named(ticker: &str, name: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: Some(name.to_string()),
            prices: None,
            dividends: None,
        }
    }

    /// The security described by this entry.
    pub fn security(&self) -> Security {
        let ticker = self.ticker.trim();
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(ticker);
        Security::new(ticker, name)
    }

    /// Input paths, falling back to the conventional names under `data_dir`.
    pub fn input(&self, data_dir: &Path) -> InputSpec {
        let conventional = InputSpec::conventional(data_dir, self.security());
        InputSpec::new(
            conventional.security,
            self.prices.clone().unwrap_or(conventional.prices),
            self.dividends.clone().unwrap_or(conventional.dividends),
        )
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Chart PNG path
    #[serde(default = "default_chart")]
    pub chart: PathBuf,

    /// Summary text path
    #[serde(default = "default_summary")]
    pub summary: PathBuf,

    /// Render the chart
    #[serde(default = "default_true")]
    pub chart_enabled: bool,

    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Chart title; derived from the security names when absent
    pub title: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_series_a() -> SeriesConfig {
    SeriesConfig::named("KO", "Coca-Cola")
}

fn default_series_b() -> SeriesConfig {
    SeriesConfig::named("PEP", "PepsiCo")
}

fn default_chart() -> PathBuf {
    PathBuf::from("comparison_chart.png")
}

fn default_summary() -> PathBuf {
    PathBuf::from(DEFAULT_SUMMARY_FILE)
}

fn default_true() -> bool {
    true
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            chart: default_chart(),
            summary: default_summary(),
            chart_enabled: true,
            width: default_width(),
            height: default_height(),
            title: None,
        }
    }
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            series_a: default_series_a(),
            series_b: default_series_b(),
            output: OutputConfig::default(),
        }
    }
}

impl DuelConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Checks tickers and chart size.
    pub fn validate(&self) -> CliResult<()> {
        let a = self.series_a.ticker.trim();
        let b = self.series_b.ticker.trim();
        if a.is_empty() {
            return Err(CliError::EmptyTicker { series: "a" });
        }
        if b.is_empty() {
            return Err(CliError::EmptyTicker { series: "b" });
        }
        if a.eq_ignore_ascii_case(b) {
            return Err(CliError::DuplicateTicker {
                ticker: a.to_string(),
            });
        }

        let (min_width, min_height) = MIN_CHART_SIZE;
        let (width, height) = (self.output.width, self.output.height);
        if self.output.chart_enabled && (width < min_width || height < min_height) {
            return Err(CliError::ChartTooSmall {
                width,
                height,
                min_width,
                min_height,
            });
        }
        Ok(())
    }

    /// Inputs for both series.
    pub fn inputs(&self) -> (InputSpec, InputSpec) {
        (
            self.series_a.input(&self.data_dir),
            self.series_b.input(&self.data_dir),
        )
    }
}
