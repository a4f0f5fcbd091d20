//! Head-to-head scoring.
//!
//! Six criteria are evaluated in a fixed order and each awards exactly one
//! point. Series B takes the point only when it is strictly better; every
//! tie goes to series A.

use serde::{Deserialize, Serialize};

use crate::metrics::SeriesMetrics;

/// One side of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The first security.
    A,
    /// The second security.
    B,
}

/// Which direction of a metric is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    /// Larger values win.
    Higher,
    /// Smaller values win.
    Lower,
}

/// A scored comparison criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    /// Mean closing price, higher is better.
    AverageClose,
    /// First-to-last return, higher is better.
    TotalReturn,
    /// Mean daily volume (liquidity), higher is better.
    AverageVolume,
    /// Standard deviation of close, lower is better.
    Volatility,
    /// Peak close, higher is better.
    MaxClose,
    /// Dividends per share, higher is better.
    TotalDividends,
}

impl Criterion {
    /// All criteria in scoring order.
    pub const ALL: [Criterion; 6] = [
        Criterion::AverageClose,
        Criterion::TotalReturn,
        Criterion::AverageVolume,
        Criterion::Volatility,
        Criterion::MaxClose,
        Criterion::TotalDividends,
    ];

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Criterion::AverageClose => "Average Close",
            Criterion::TotalReturn => "Total Return",
            Criterion::AverageVolume => "Average Volume",
            Criterion::Volatility => "Volatility",
            Criterion::MaxClose => "Max Close",
            Criterion::TotalDividends => "Total Dividends",
        }
    }

    /// Direction in which this criterion is won.
    pub fn preference(self) -> Preference {
        match self {
            Criterion::Volatility => Preference::Lower,
            _ => Preference::Higher,
        }
    }

    /// Reads this criterion's value out of a metrics snapshot.
    pub fn value(self, metrics: &SeriesMetrics) -> f64 {
        match self {
            Criterion::AverageClose => metrics.average_close,
            Criterion::TotalReturn => metrics.total_return_percent,
            Criterion::AverageVolume => metrics.average_volume,
            Criterion::Volatility => metrics.volatility,
            Criterion::MaxClose => metrics.max_close,
            Criterion::TotalDividends => metrics.total_dividends,
        }
    }

    /// Decides the winner for a pair of values.
    pub fn winner(self, a: f64, b: f64) -> Side {
        let b_better = match self.preference() {
            Preference::Higher => b > a,
            Preference::Lower => b < a,
        };
        if b_better {
            Side::B
        } else {
            Side::A
        }
    }
}

/// Result of a single criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionOutcome {
    /// The criterion evaluated.
    pub criterion: Criterion,
    /// Value for series A.
    pub value_a: f64,
    /// Value for series B.
    pub value_b: f64,
    /// Side awarded the point.
    pub winner: Side,
}

/// Final result of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Series A won more criteria.
    SeriesA,
    /// Series B won more criteria.
    SeriesB,
    /// Both won the same number of criteria.
    Tie,
}

/// Per-criterion outcomes and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    /// Outcomes in scoring order.
    pub outcomes: Vec<CriterionOutcome>,
    /// Points won by series A.
    pub score_a: u8,
    /// Points won by series B.
    pub score_b: u8,
}

impl Scorecard {
    /// Both scores as `(a, b)`.
    pub fn scores(&self) -> (u8, u8) {
        (self.score_a, self.score_b)
    }

    /// Number of criteria scored.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Outcome for one criterion.
    pub fn outcome(&self, criterion: Criterion) -> Option<&CriterionOutcome> {
        self.outcomes.iter().find(|o| o.criterion == criterion)
    }

    /// Higher score wins; equal scores tie.
    pub fn verdict(&self) -> Verdict {
        match self.score_a.cmp(&self.score_b) {
            std::cmp::Ordering::Greater => Verdict::SeriesA,
            std::cmp::Ordering::Less => Verdict::SeriesB,
            std::cmp::Ordering::Equal => Verdict::Tie,
        }
    }
}

/// Scores two metric snapshots against each other.
pub fn score_comparison(a: &SeriesMetrics, b: &SeriesMetrics) -> Scorecard {
    let outcomes: Vec<CriterionOutcome> = Criterion::ALL
        .iter()
        .map(|&criterion| {
            let value_a = criterion.value(a);
            let value_b = criterion.value(b);
            CriterionOutcome {
                criterion,
                value_a,
                value_b,
                winner: criterion.winner(value_a, value_b),
            }
        })
        .collect();

    let score_b = outcomes.iter().filter(|o| o.winner == Side::B).count() as u8;
    let score_a = outcomes.len() as u8 - score_b;

    Scorecard {
        outcomes,
        score_a,
        score_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(base: f64) -> SeriesMetrics {
        SeriesMetrics {
            average_close: base,
            total_return_percent: base,
            average_volume: base,
            volatility: base,
            max_close: base,
            min_close: base,
            total_dividends: base,
        }
    }

    #[test]
    fn test_ties_go_to_a() {
        let card = score_comparison(&metrics(1.0), &metrics(1.0));
        assert_eq!(card.scores(), (6, 0));
        assert_eq!(card.verdict(), Verdict::SeriesA);
    }

    #[test]
    fn test_volatility_lower_wins() {
        let card = score_comparison(&metrics(1.0), &metrics(2.0));
        assert_eq!(card.outcome(Criterion::Volatility).unwrap().winner, Side::A);
        assert_eq!(card.outcome(Criterion::AverageClose).unwrap().winner, Side::B);
        assert_eq!(card.scores(), (1, 5));
        assert_eq!(card.verdict(), Verdict::SeriesB);
    }

    #[test]
    fn test_even_split_is_tie() {
        let a = SeriesMetrics {
            average_close: 55.0,
            total_return_percent: 20.0,
            average_volume: 2_000.0,
            volatility: 4.0,
            max_close: 60.0,
            min_close: 50.0,
            total_dividends: 1.0,
        };
        let b = SeriesMetrics {
            average_close: 95.0,
            total_return_percent: -5.0,
            average_volume: 1_000.0,
            volatility: 4.1,
            max_close: 100.0,
            min_close: 90.0,
            total_dividends: 2.0,
        };
        let card = score_comparison(&a, &b);
        assert_eq!(card.scores(), (3, 3));
        assert_eq!(card.verdict(), Verdict::Tie);
        assert_eq!(card.total(), 6);
    }

    #[test]
    fn test_min_close_is_not_scored() {
        let card = score_comparison(&metrics(1.0), &metrics(1.0));
        assert!(card
            .outcomes
            .iter()
            .all(|o| o.criterion.label() != "Min Close"));
    }
}
