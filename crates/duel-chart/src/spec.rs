//! Chart input.

use serde::{Deserialize, Serialize};

use duel_core::Comparison;

/// One category on the x axis with a bar for each series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGroup {
    /// Category label drawn below the baseline.
    pub label: String,
    /// Value of series A.
    pub value_a: f64,
    /// Value of series B.
    pub value_b: f64,
}

impl ChartGroup {
    /// Creates a new group.
    pub fn new(label: impl Into<String>, value_a: f64, value_b: f64) -> Self {
        Self {
            label: label.into(),
            value_a,
            value_b,
        }
    }
}

/// Everything the renderer needs to draw a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Title centered at the top of the canvas.
    pub title: String,
    /// Optional line under the title.
    pub subtitle: Option<String>,
    /// Legend name of series A.
    pub name_a: String,
    /// Legend name of series B.
    pub name_b: String,
    /// Categories in drawing order.
    pub groups: Vec<ChartGroup>,
}

impl ChartSpec {
    /// Creates an empty spec with a title and the two legend names.
    pub fn new(
        title: impl Into<String>,
        name_a: impl Into<String>,
        name_b: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            name_a: name_a.into(),
            name_b: name_b.into(),
            groups: Vec::new(),
        }
    }

    /// Sets the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Appends a group.
    pub fn with_group(mut self, label: impl Into<String>, value_a: f64, value_b: f64) -> Self {
        self.groups.push(ChartGroup::new(label, value_a, value_b));
        self
    }

    /// Projects a comparison onto the five charted metrics.
    ///
    /// Volume is charted in thousands of shares so it shares a scale with
    /// the price metrics. Max and min close are left to the text reports.
    pub fn from_comparison(comparison: &Comparison, title: impl Into<String>) -> Self {
        let a = &comparison.a.metrics;
        let b = &comparison.b.metrics;
        Self::new(
            title,
            comparison.a.security.label(),
            comparison.b.security.label(),
        )
        .with_subtitle(format!("Period {}", comparison.period))
        .with_group("Avg Close ($)", a.average_close, b.average_close)
        .with_group("Return (%)", a.total_return_percent, b.total_return_percent)
        .with_group("Volume (K)", a.average_volume / 1_000.0, b.average_volume / 1_000.0)
        .with_group("Volatility ($)", a.volatility, b.volatility)
        .with_group("Dividends ($)", a.total_dividends, b.total_dividends)
    }

    /// Largest value across both series, or `None` when there are no groups.
    pub fn peak(&self) -> Option<f64> {
        self.groups
            .iter()
            .flat_map(|g| [g.value_a, g.value_b])
            .reduce(f64::max)
    }
}
