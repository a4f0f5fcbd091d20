//! Output sinks.
//!
//! A sink receives the finished [`Comparison`] and writes it somewhere. The
//! pipeline only calls sinks after both securities loaded and scored.

use std::io::Write;
use std::path::{Path, PathBuf};

use duel_chart::{ChartRenderer, ChartSpec};
use duel_core::{Comparison, DuelError, DuelResult};
use tracing::debug;

use crate::console::{verdict_line, ConsoleReport};
use crate::json::Snapshot;
use crate::summary::write_summary;

/// Name used in write errors for stream sinks.
const STREAM_TARGET: &str = "<stdout>";

/// Destination for a finished comparison.
pub trait OutputSink {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// File written by this sink, if any.
    fn artifact(&self) -> Option<&Path> {
        None
    }

    /// Writes the comparison.
    fn emit(&mut self, comparison: &Comparison) -> DuelResult<()>;
}

fn stream_error(err: std::io::Error) -> DuelError {
    DuelError::write_failure(STREAM_TARGET, err)
}

/// How much the console sink prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleMode {
    /// Header, metric table, scorecard and verdict.
    #[default]
    Full,
    /// The verdict line only.
    VerdictOnly,
}

/// Prints the transcript to a writer.
#[derive(Debug)]
pub struct ConsoleSink<W> {
    out: W,
    color: bool,
    mode: ConsoleMode,
}

impl ConsoleSink<std::io::Stdout> {
    /// Sink writing to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Creates an uncolored full transcript sink.
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: false,
            mode: ConsoleMode::Full,
        }
    }

    /// Enables ANSI colors.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Sets how much is printed.
    pub fn with_mode(mut self, mode: ConsoleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn emit(&mut self, comparison: &Comparison) -> DuelResult<()> {
        match self.mode {
            ConsoleMode::Full => ConsoleReport::new(comparison)
                .with_color(self.color)
                .write_to(&mut self.out)
                .map_err(stream_error)?,
            ConsoleMode::VerdictOnly => {
                writeln!(self.out, "{}", verdict_line(comparison)).map_err(stream_error)?
            }
        }
        self.out.flush().map_err(stream_error)
    }
}

/// Writes the plain-text summary file.
#[derive(Debug, Clone)]
pub struct SummaryFileSink {
    path: PathBuf,
}

impl SummaryFileSink {
    /// Creates a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for SummaryFileSink {
    fn name(&self) -> &str {
        "summary"
    }

    fn artifact(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn emit(&mut self, comparison: &Comparison) -> DuelResult<()> {
        write_summary(comparison, &self.path)
    }
}

/// Renders the grouped bar chart to a PNG file.
#[derive(Debug, Clone)]
pub struct ChartSink {
    path: PathBuf,
    title: Option<String>,
    renderer: ChartRenderer,
}

impl ChartSink {
    /// Creates a sink with the default renderer.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            title: None,
            renderer: ChartRenderer::default(),
        }
    }

    /// Overrides the chart title. Defaults to `"A vs B"` using security names.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the renderer.
    pub fn with_renderer(mut self, renderer: ChartRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Chart input for `comparison`.
    pub fn chart_spec(&self, comparison: &Comparison) -> ChartSpec {
        let title = self.title.clone().unwrap_or_else(|| {
            format!(
                "{} vs {}: Stock Comparison",
                comparison.a.security.name, comparison.b.security.name
            )
        });
        ChartSpec::from_comparison(comparison, title)
    }
}

impl OutputSink for ChartSink {
    fn name(&self) -> &str {
        "chart"
    }

    fn artifact(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn emit(&mut self, comparison: &Comparison) -> DuelResult<()> {
        let spec = self.chart_spec(comparison);
        debug!(title = %spec.title, groups = spec.groups.len(), "Built chart spec");
        self.renderer.render_to_file(&spec, &self.path)
    }
}

/// Writes the JSON snapshot to a writer.
#[derive(Debug)]
pub struct JsonSink<W> {
    out: W,
}

impl JsonSink<std::io::Stdout> {
    /// Sink writing to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonSink<W> {
    /// Creates a sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for JsonSink<W> {
    fn name(&self) -> &str {
        "json"
    }

    fn emit(&mut self, comparison: &Comparison) -> DuelResult<()> {
        let json = Snapshot::new(comparison)
            .to_json()
            .map_err(|e| stream_error(e.into()))?;
        writeln!(self.out, "{json}").map_err(stream_error)?;
        self.out.flush().map_err(stream_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{PriceRecord, Security, SecurityData};
    use tempfile::TempDir;

    fn comparison() -> Comparison {
        let side = |ticker: &str, name: &str, closes: &[f64]| SecurityData {
            security: Security::new(ticker, name),
            prices: closes
                .iter()
                .map(|&c| PriceRecord::flat("2024-03-01", c, 1_000))
                .collect(),
            dividends: Vec::new(),
        };
        Comparison::compute(
            &side("KO", "Coca-Cola", &[50.0, 55.0]),
            &side("PEP", "PepsiCo", &[100.0, 90.0]),
        )
        .unwrap()
    }

    #[test]
    fn test_console_sink_full() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.emit(&comparison()).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("FINAL SCORECARD"));
    }

    #[test]
    fn test_console_sink_verdict_only() {
        let mut sink = ConsoleSink::new(Vec::new()).with_mode(ConsoleMode::VerdictOnly);
        sink.emit(&comparison()).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("VERDICT:"));
    }

    #[test]
    fn test_json_sink() {
        let mut sink = JsonSink::new(Vec::new());
        sink.emit(&comparison()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();
        assert_eq!(value["b"]["security"]["name"], "PepsiCo");
    }

    #[test]
    fn test_chart_sink_default_title() {
        let sink = ChartSink::new("chart.png");
        let spec = sink.chart_spec(&comparison());
        assert_eq!(spec.title, "Coca-Cola vs PepsiCo: Stock Comparison");
        assert_eq!(sink.artifact(), Some(Path::new("chart.png")));
    }

    #[test]
    fn test_file_sinks_write() {
        let dir = TempDir::new().unwrap();
        let chart = dir.path().join("chart.png");
        let summary = dir.path().join("summary.txt");
        let cmp = comparison();

        ChartSink::new(&chart)
            .with_renderer(ChartRenderer::new(600, 400))
            .emit(&cmp)
            .unwrap();
        SummaryFileSink::new(&summary).emit(&cmp).unwrap();

        assert!(chart.metadata().unwrap().len() > 0);
        assert!(std::fs::read_to_string(summary).unwrap().contains("Score:"));
    }
}
