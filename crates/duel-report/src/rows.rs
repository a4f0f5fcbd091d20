//! Reported metric rows.
//!
//! Every text output reports the same seven metrics in the same order: the
//! six scored criteria with min close slotted in after max close. Min close
//! is informational and never carries a winner.

use duel_core::{Comparison, Criterion, Side};
use serde::Serialize;

/// How a metric value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// `$55.00`
    Dollars,
    /// `20.00%`
    Percent,
    /// `1,234,567`
    Shares,
}

impl Unit {
    /// Formats `value` in this unit.
    pub fn format(self, value: f64) -> String {
        match self {
            Unit::Dollars => format!("${value:.2}"),
            Unit::Percent => format!("{value:.2}%"),
            Unit::Shares => group_thousands(value),
        }
    }
}

/// One line of the metric table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    /// Display label.
    pub label: &'static str,
    /// Short label used in the summary file.
    pub short_label: &'static str,
    /// Value for series A.
    pub value_a: f64,
    /// Value for series B.
    pub value_b: f64,
    /// Display unit.
    pub unit: Unit,
    /// Scored winner, `None` for informational rows.
    pub winner: Option<Side>,
    /// Whether the lower value wins.
    pub lower_wins: bool,
}

impl MetricRow {
    /// Formatted value for `side`.
    pub fn formatted(&self, side: Side) -> String {
        match side {
            Side::A => self.unit.format(self.value_a),
            Side::B => self.unit.format(self.value_b),
        }
    }
}

fn unit_of(criterion: Criterion) -> Unit {
    match criterion {
        Criterion::TotalReturn => Unit::Percent,
        Criterion::AverageVolume => Unit::Shares,
        _ => Unit::Dollars,
    }
}

fn short_label(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::AverageClose => "Avg Close",
        Criterion::TotalReturn => "Total Return",
        Criterion::AverageVolume => "Avg Volume",
        Criterion::Volatility => "Volatility",
        Criterion::MaxClose => "Max Close",
        Criterion::TotalDividends => "Total Divs",
    }
}

/// Builds the seven reported rows from a comparison.
pub fn metric_rows(comparison: &Comparison) -> Vec<MetricRow> {
    let mut rows = Vec::with_capacity(comparison.scorecard.total() + 1);
    for outcome in &comparison.scorecard.outcomes {
        let criterion = outcome.criterion;
        rows.push(MetricRow {
            label: criterion.label(),
            short_label: short_label(criterion),
            value_a: outcome.value_a,
            value_b: outcome.value_b,
            unit: unit_of(criterion),
            winner: Some(outcome.winner),
            lower_wins: criterion == Criterion::Volatility,
        });
        if criterion == Criterion::MaxClose {
            rows.push(MetricRow {
                label: "Min Close",
                short_label: "Min Close",
                value_a: comparison.a.metrics.min_close,
                value_b: comparison.b.metrics.min_close,
                unit: Unit::Dollars,
                winner: None,
                lower_wins: false,
            });
        }
    }
    rows
}

/// Rounds to a whole number and inserts thousands separators.
pub fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        grouped.insert(0, '-');
    }
    grouped
}
