//! Typed input records and security identity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of price data.
///
/// The date is kept as the source text; rows are ordered by their position
/// in the input file, which defines "first" and "last" for return
/// calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Trading date as written in the source file.
    pub date: String,
    /// Opening price.
    pub open: f64,
    /// Intraday high.
    pub high: f64,
    /// Intraday low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Shares traded.
    pub volume: u64,
}

impl PriceRecord {
    /// Creates a record with open, high and low all equal to `close`.
    pub fn flat(date: impl Into<String>, close: f64, volume: u64) -> Self {
        Self {
            date: date.into(),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }
}

/// One dividend payment per share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendRecord {
    /// Payment date as written in the source file.
    pub date: String,
    /// Amount paid per share.
    pub amount: f64,
}

impl DividendRecord {
    /// Creates a new dividend record.
    pub fn new(date: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            amount,
        }
    }
}

/// Identity of one side of the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    /// Exchange ticker, e.g. `KO`.
    pub ticker: String,
    /// Display name, e.g. `Coca-Cola`.
    pub name: String,
}

impl Security {
    /// Creates a new security.
    pub fn new(ticker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
        }
    }

    /// Name followed by the ticker, e.g. `Coca-Cola (KO)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.ticker)
    }
}

/// Loaded records for one security.
#[derive(Debug, Clone)]
pub struct SecurityData {
    /// Which security these records belong to.
    pub security: Security,
    /// Daily prices in file order.
    pub prices: Vec<PriceRecord>,
    /// Dividend payments in file order.
    pub dividends: Vec<DividendRecord>,
}

/// Date range covered by a price series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Date of the first record.
    pub start: String,
    /// Date of the last record.
    pub end: String,
}

impl Period {
    /// Period spanned by `prices`, or `None` for an empty series.
    pub fn of(prices: &[PriceRecord]) -> Option<Self> {
        let first = prices.first()?;
        let last = prices.last()?;
        Some(Self {
            start: first.date.clone(),
            end: last.date.clone(),
        })
    }

    /// Number of calendar days between start and end when both are ISO dates.
    pub fn calendar_days(&self) -> Option<i64> {
        let start = NaiveDate::parse_from_str(&self.start, "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(&self.end, "%Y-%m-%d").ok()?;
        Some((end - start).num_days())
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_label() {
        let ko = Security::new("KO", "Coca-Cola");
        assert_eq!(ko.label(), "Coca-Cola (KO)");
    }

    #[test]
    fn test_period_uses_file_order() {
        let prices = vec![
            PriceRecord::flat("2019-01-02", 46.9, 100),
            PriceRecord::flat("2019-01-03", 46.6, 100),
            PriceRecord::flat("2019-02-01", 47.4, 100),
        ];
        let period = Period::of(&prices).unwrap();
        assert_eq!(period.start, "2019-01-02");
        assert_eq!(period.end, "2019-02-01");
        assert_eq!(period.calendar_days(), Some(30));
        assert_eq!(period.to_string(), "2019-01-02 to 2019-02-01");
    }

    #[test]
    fn test_period_non_iso_dates() {
        let prices = vec![PriceRecord::flat("d1", 1.0, 1), PriceRecord::flat("d3", 1.0, 1)];
        let period = Period::of(&prices).unwrap();
        assert_eq!(period.calendar_days(), None);
        assert!(Period::of(&[]).is_none());
    }
}
