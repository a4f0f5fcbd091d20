//! Console transcript.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use duel_core::{Comparison, Side, Verdict};
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use crate::rows::{metric_rows, MetricRow};

const RULE_WIDTH: usize = 67;

/// One-line verdict, e.g. `VERDICT: Coca-Cola (KO) is the better stock (4 / 6)`.
pub fn verdict_line(comparison: &Comparison) -> String {
    let total = comparison.scorecard.total();
    let (a, b) = comparison.scorecard.scores();
    match comparison.verdict() {
        Verdict::SeriesA => format!(
            "VERDICT: {} is the better stock ({a} / {total})",
            comparison.a.security.label()
        ),
        Verdict::SeriesB => format!(
            "VERDICT: {} is the better stock ({b} / {total})",
            comparison.b.security.label()
        ),
        Verdict::Tie => format!("VERDICT: tie, {a} / {total} each"),
    }
}

/// Renders the full console transcript for a comparison.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReport<'a> {
    comparison: &'a Comparison,
    color: bool,
}

impl<'a> ConsoleReport<'a> {
    /// Creates a plain-text report.
    pub fn new(comparison: &'a Comparison) -> Self {
        Self {
            comparison,
            color: false,
        }
    }

    /// Enables or disables ANSI colors.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Renders the transcript into a string.
    pub fn render(&self) -> String {
        let mut lines = self.header_lines();
        lines.push(String::new());
        lines.push(self.metric_table());
        lines.push(String::new());
        lines.extend(self.score_lines());
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Writes the transcript to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.render().as_bytes())
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn header_lines(&self) -> Vec<String> {
        let cmp = self.comparison;
        let rule = self.paint(&"═".repeat(RULE_WIDTH), |s| s.dimmed());
        let title = format!(
            "{} vs {}",
            cmp.a.security.label(),
            cmp.b.security.label()
        );
        let period = match cmp.period.calendar_days() {
            Some(days) => format!("  Period  : {} ({days} days)", cmp.period),
            None => format!("  Period  : {}", cmp.period),
        };

        vec![
            rule.clone(),
            format!("  {}", self.paint(&title, |s| s.bold())),
            rule,
            String::new(),
            period,
            format!(
                "  Records : {}={} prices, {} dividends | {}={} prices, {} dividends",
                cmp.a.security.ticker,
                cmp.a.price_rows,
                cmp.a.dividend_rows,
                cmp.b.security.ticker,
                cmp.b.price_rows,
                cmp.b.dividend_rows,
            ),
        ]
    }

    fn winner_cell(&self, row: &MetricRow) -> String {
        let cmp = self.comparison;
        match row.winner {
            Some(side) => format!("{} ✓", cmp.side(side).security.ticker),
            None => "-".to_string(),
        }
    }

    /// Metric comparison table; cells stay uncolored so widths line up.
    fn metric_table(&self) -> String {
        let cmp = self.comparison;
        let mut builder = Builder::default();
        builder.push_record([
            "Metric".to_string(),
            cmp.a.security.label(),
            cmp.b.security.label(),
            "Winner".to_string(),
        ]);
        for row in metric_rows(cmp) {
            let label = if row.lower_wins {
                format!("{} (lower wins)", row.label)
            } else {
                row.label.to_string()
            };
            builder.push_record([
                label,
                row.formatted(Side::A),
                row.formatted(Side::B),
                self.winner_cell(&row),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..3)).with(Alignment::right()));
        table.to_string()
    }

    fn score_lines(&self) -> Vec<String> {
        let cmp = self.comparison;
        let total = cmp.scorecard.total();
        let (a, b) = cmp.scorecard.scores();
        let (label_a, label_b) = (cmp.a.security.label(), cmp.b.security.label());
        let width = label_a.chars().count().max(label_b.chars().count());

        let verdict = verdict_line(cmp);
        let painted = match cmp.verdict() {
            Verdict::SeriesA => self.paint(&verdict, |s| s.red().bold()),
            Verdict::SeriesB => self.paint(&verdict, |s| s.blue().bold()),
            Verdict::Tie => self.paint(&verdict, |s| s.yellow().bold()),
        };

        vec![
            format!("  {}", self.paint("FINAL SCORECARD", |s| s.bold().underline())),
            format!("  {label_a:<width$} : {a} / {total} metrics won"),
            format!("  {label_b:<width$} : {b} / {total} metrics won"),
            String::new(),
            format!("  ★  {painted}  ★"),
            format!("     {}", self.explanation()),
        ]
    }

    fn explanation(&self) -> String {
        let cmp = self.comparison;
        let winner_of = |side: Side| {
            metric_rows(cmp)
                .into_iter()
                .filter(|row| row.winner == Some(side))
                .map(|row| row.label.to_lowercase())
                .collect::<Vec<_>>()
                .join(", ")
        };
        match cmp.verdict() {
            Verdict::SeriesA => format!("{} leads on {}.", cmp.a.security.name, winner_of(Side::A)),
            Verdict::SeriesB => format!("{} leads on {}.", cmp.b.security.name, winner_of(Side::B)),
            Verdict::Tie => "Both securities won the same number of metrics.".to_string(),
        }
    }
}
