//! Plain-text summary file.

use std::path::Path;

use duel_core::{Comparison, DuelError, DuelResult, Side, Verdict};
use tracing::info;

use crate::rows::metric_rows;

/// Default summary file name.
pub const DEFAULT_SUMMARY_FILE: &str = "analysis_output.txt";

/// Builds the summary text.
///
/// The last two lines are always the score pair followed by either
/// `WINNER: Name (TICKER)` or `RESULT: TIE`.
pub fn summary_text(comparison: &Comparison) -> String {
    let a = &comparison.a.security;
    let b = &comparison.b.security;
    let mut lines = vec![
        format!(
            "{} vs {}: STOCK ANALYSIS RESULTS",
            a.name.to_uppercase(),
            b.name.to_uppercase()
        ),
        format!("Period: {}", comparison.period),
        String::new(),
    ];

    lines.extend(metric_rows(comparison).into_iter().map(|row| {
        format!(
            "{:<13}{}: {}  |  {}: {}",
            row.short_label,
            a.ticker,
            row.formatted(Side::A),
            b.ticker,
            row.formatted(Side::B),
        )
    }));

    let (score_a, score_b) = comparison.scorecard.scores();
    lines.push(String::new());
    lines.push(format!("Score: {}={score_a} {}={score_b}", a.ticker, b.ticker));
    lines.push(match comparison.verdict() {
        Verdict::SeriesA => format!("WINNER: {}", a.label()),
        Verdict::SeriesB => format!("WINNER: {}", b.label()),
        Verdict::Tie => "RESULT: TIE".to_string(),
    });

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Writes the summary to `path`, replacing any existing file.
pub fn write_summary(comparison: &Comparison, path: impl AsRef<Path>) -> DuelResult<()> {
    let path = path.as_ref();
    std::fs::write(path, summary_text(comparison))
        .map_err(|e| DuelError::write_failure(path, e))?;
    info!(path = %path.display(), "Wrote summary");
    Ok(())
}
