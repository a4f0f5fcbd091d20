//! The immutable snapshot shared by every output sink.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DuelError, DuelResult};
use crate::metrics::SeriesMetrics;
use crate::records::{Period, PriceRecord, Security, SecurityData};
use crate::scorecard::{score_comparison, Scorecard, Side, Verdict};

/// Metrics for one side plus the context needed to report them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideSummary {
    /// The security.
    pub security: Security,
    /// Number of price rows loaded.
    pub price_rows: usize,
    /// Number of dividend rows loaded.
    pub dividend_rows: usize,
    /// Derived metrics.
    pub metrics: SeriesMetrics,
}

impl SideSummary {
    /// Computes the summary for one security's records.
    pub fn compute(data: &SecurityData) -> DuelResult<Self> {
        let metrics = SeriesMetrics::compute(&data.prices, &data.dividends)?;
        debug!(ticker = %data.security.ticker, ?metrics, "Computed series metrics");
        Ok(Self {
            security: data.security.clone(),
            price_rows: data.prices.len(),
            dividend_rows: data.dividends.len(),
            metrics,
        })
    }
}

/// Complete result of comparing two securities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Period covered by series A's prices.
    pub period: Period,
    /// First security.
    pub a: SideSummary,
    /// Second security.
    pub b: SideSummary,
    /// Per-criterion outcomes and totals.
    pub scorecard: Scorecard,
}

impl Comparison {
    /// Computes both sides and scores them.
    pub fn compute(a: &SecurityData, b: &SecurityData) -> DuelResult<Self> {
        let a_summary = SideSummary::compute(a)?;
        let b_summary = SideSummary::compute(b)?;
        Self::from_summaries(&a.prices, a_summary, b_summary)
    }

    /// Scores two precomputed summaries; `a_prices` supplies the period.
    pub fn from_summaries(
        a_prices: &[PriceRecord],
        a: SideSummary,
        b: SideSummary,
    ) -> DuelResult<Self> {
        let period = Period::of(a_prices).ok_or(DuelError::EmptySeries { metric: "period" })?;
        let scorecard = score_comparison(&a.metrics, &b.metrics);
        Ok(Self {
            period,
            a,
            b,
            scorecard,
        })
    }

    /// Summary for one side.
    pub fn side(&self, side: Side) -> &SideSummary {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Overall verdict.
    pub fn verdict(&self) -> Verdict {
        self.scorecard.verdict()
    }

    /// The winning security, or `None` for a tie.
    pub fn winner(&self) -> Option<&Security> {
        match self.verdict() {
            Verdict::SeriesA => Some(&self.a.security),
            Verdict::SeriesB => Some(&self.b.security),
            Verdict::Tie => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(ticker: &str, closes: &[f64]) -> SecurityData {
        SecurityData {
            security: Security::new(ticker, ticker),
            prices: closes
                .iter()
                .enumerate()
                .map(|(i, &c)| PriceRecord::flat(format!("d{}", i + 1), c, 100))
                .collect(),
            dividends: Vec::new(),
        }
    }

    #[test]
    fn test_period_from_series_a() {
        let cmp = Comparison::compute(&data("KO", &[50.0, 60.0]), &data("PEP", &[1.0])).unwrap();
        assert_eq!(cmp.period.start, "d1");
        assert_eq!(cmp.period.end, "d2");
        assert_eq!(cmp.a.price_rows, 2);
        assert_eq!(cmp.side(Side::B).security.ticker, "PEP");
    }

    #[test]
    fn test_empty_side_fails() {
        let err = Comparison::compute(&data("KO", &[50.0]), &data("PEP", &[])).unwrap_err();
        assert!(matches!(err, DuelError::EmptySeries { .. }));
    }
}
