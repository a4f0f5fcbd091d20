//! JSON snapshot of a comparison.

use duel_core::{Comparison, Security, Verdict};
use serde::Serialize;

use crate::rows::{metric_rows, MetricRow};

/// Serializable view of a finished comparison.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    /// The full comparison.
    #[serde(flatten)]
    pub comparison: &'a Comparison,
    /// Calendar days covered, when the dates are ISO formatted.
    pub calendar_days: Option<i64>,
    /// Reported rows in display order.
    pub rows: Vec<MetricRow>,
    /// Overall verdict.
    pub verdict: Verdict,
    /// The winning security, absent on a tie.
    pub winner: Option<&'a Security>,
}

impl<'a> Snapshot<'a> {
    /// Builds the snapshot.
    pub fn new(comparison: &'a Comparison) -> Self {
        Self {
            comparison,
            calendar_days: comparison.period.calendar_days(),
            rows: metric_rows(comparison),
            verdict: comparison.verdict(),
            winner: comparison.winner(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
