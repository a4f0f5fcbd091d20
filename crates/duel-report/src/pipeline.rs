//! Load, compare, emit.
//!
//! Both securities are loaded and summarized before any sink runs, so a bad
//! input file never leaves a half-written set of outputs behind.

use std::path::{Path, PathBuf};

use duel_core::{
    load_dividends, load_prices, Comparison, DuelResult, PriceRecord, Security, SecurityData,
    SideSummary,
};
use tracing::{debug, info};

use crate::sink::OutputSink;

/// Where one security's records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    /// The security.
    pub security: Security,
    /// Price table path.
    pub prices: PathBuf,
    /// Dividend table path.
    pub dividends: PathBuf,
}

impl InputSpec {
    /// Creates an input from explicit paths.
    pub fn new(
        security: Security,
        prices: impl Into<PathBuf>,
        dividends: impl Into<PathBuf>,
    ) -> Self {
        Self {
            security,
            prices: prices.into(),
            dividends: dividends.into(),
        }
    }

    /// Uses `<data_dir>/<TICKER>_stock_price.csv` and
    /// `<data_dir>/<TICKER>_stock_dividend.csv`.
    pub fn conventional(data_dir: impl AsRef<Path>, security: Security) -> Self {
        let dir = data_dir.as_ref();
        let prices = dir.join(price_file_name(&security.ticker));
        let dividends = dir.join(dividend_file_name(&security.ticker));
        Self::new(security, prices, dividends)
    }

    /// Reads both tables.
    pub fn load(&self) -> DuelResult<SecurityData> {
        Ok(SecurityData {
            security: self.security.clone(),
            prices: load_prices(&self.prices)?,
            dividends: load_dividends(&self.dividends)?,
        })
    }
}

/// Conventional price file name for `ticker`.
pub fn price_file_name(ticker: &str) -> String {
    format!("{ticker}_stock_price.csv")
}

/// Conventional dividend file name for `ticker`.
pub fn dividend_file_name(ticker: &str) -> String {
    format!("{ticker}_stock_dividend.csv")
}

struct Loaded {
    prices: Vec<PriceRecord>,
    summary: SideSummary,
}

fn load_and_summarize(input: &InputSpec) -> DuelResult<Loaded> {
    let data = input.load()?;
    let summary = SideSummary::compute(&data)?;
    Ok(Loaded {
        prices: data.prices,
        summary,
    })
}

#[cfg(feature = "parallel")]
fn load_pair(a: &InputSpec, b: &InputSpec) -> DuelResult<(Loaded, Loaded)> {
    let (a, b) = rayon::join(|| load_and_summarize(a), || load_and_summarize(b));
    Ok((a?, b?))
}

#[cfg(not(feature = "parallel"))]
fn load_pair(a: &InputSpec, b: &InputSpec) -> DuelResult<(Loaded, Loaded)> {
    Ok((load_and_summarize(a)?, load_and_summarize(b)?))
}

/// A comparison run with its output sinks.
pub struct Pipeline {
    a: InputSpec,
    b: InputSpec,
    sinks: Vec<Box<dyn OutputSink>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("a", &self.a)
            .field("b", &self.b)
            .field("sinks", &self.sinks.iter().map(|s| s.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl Pipeline {
    /// Creates a pipeline with no sinks.
    pub fn new(a: InputSpec, b: InputSpec) -> Self {
        Self {
            a,
            b,
            sinks: Vec::new(),
        }
    }

    /// Appends a sink. Sinks run in the order added.
    pub fn with_sink(mut self, sink: impl OutputSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Appends a boxed sink.
    pub fn add_sink(&mut self, sink: Box<dyn OutputSink>) {
        self.sinks.push(sink);
    }

    /// Files the sinks will write, in sink order.
    pub fn artifacts(&self) -> Vec<PathBuf> {
        self.sinks
            .iter()
            .filter_map(|s| s.artifact().map(Path::to_path_buf))
            .collect()
    }

    /// Loads both securities and scores them without emitting anything.
    pub fn compare(&self) -> DuelResult<Comparison> {
        let (a, b) = load_pair(&self.a, &self.b)?;
        info!(
            a = %self.a.security.ticker,
            a_rows = a.prices.len(),
            b = %self.b.security.ticker,
            b_rows = b.prices.len(),
            "Loaded both securities"
        );
        Comparison::from_summaries(&a.prices, a.summary, b.summary)
    }

    /// Compares and then runs every sink. Stops at the first sink error.
    pub fn run(&mut self) -> DuelResult<Comparison> {
        let comparison = self.compare()?;
        for sink in &mut self.sinks {
            debug!(sink = sink.name(), "Emitting");
            sink.emit(&comparison)?;
        }
        Ok(comparison)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_paths() {
        let input = InputSpec::conventional("data", Security::new("KO", "Coca-Cola"));
        assert_eq!(input.prices, Path::new("data").join("KO_stock_price.csv"));
        assert_eq!(input.dividends, Path::new("data").join("KO_stock_dividend.csv"));
    }

    #[test]
    fn test_missing_input_is_unavailable() {
        let a = InputSpec::new(Security::new("KO", "Coca-Cola"), "nope.csv", "nope.csv");
        let b = a.clone();
        let err = Pipeline::new(a, b).compare().unwrap_err();
        assert!(matches!(err, duel_core::DuelError::ResourceUnavailable { .. }));
    }
}
