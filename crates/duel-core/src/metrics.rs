//! Per-series metrics.
//!
//! Pure functions over record slices. Price metrics reject empty input with
//! [`DuelError::EmptySeries`]; dividend totals treat an empty series as zero.

use serde::{Deserialize, Serialize};

use crate::error::{DuelError, DuelResult};
use crate::records::{DividendRecord, PriceRecord};

/// Derived metrics for one security.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetrics {
    /// Mean closing price.
    pub average_close: f64,
    /// Percent change from the first to the last close.
    pub total_return_percent: f64,
    /// Mean daily volume.
    pub average_volume: f64,
    /// Population standard deviation of closing prices.
    pub volatility: f64,
    /// Highest close.
    pub max_close: f64,
    /// Lowest close.
    pub min_close: f64,
    /// Sum of dividends paid per share.
    pub total_dividends: f64,
}

impl SeriesMetrics {
    /// Computes every metric for one security.
    pub fn compute(prices: &[PriceRecord], dividends: &[DividendRecord]) -> DuelResult<Self> {
        Ok(Self {
            average_close: average_close(prices)?,
            total_return_percent: total_return_percent(prices)?,
            average_volume: average_volume(prices)?,
            volatility: volatility(prices)?,
            max_close: max_close(prices)?,
            min_close: min_close(prices)?,
            total_dividends: total_dividends(dividends),
        })
    }
}

fn non_empty<'a>(series: &'a [PriceRecord], metric: &'static str) -> DuelResult<&'a PriceRecord> {
    series.first().ok_or(DuelError::EmptySeries { metric })
}

/// Arithmetic mean of closing prices.
pub fn average_close(series: &[PriceRecord]) -> DuelResult<f64> {
    non_empty(series, "average close")?;
    let sum: f64 = series.iter().map(|r| r.close).sum();
    Ok(sum / series.len() as f64)
}

/// Percent change between the first and last close in file order.
pub fn total_return_percent(series: &[PriceRecord]) -> DuelResult<f64> {
    let first = non_empty(series, "total return")?.close;
    let last = series.last().map_or(first, |r| r.close);
    if first == 0.0 {
        return Err(DuelError::DivisionByZero {
            operation: "total return",
        });
    }
    Ok((last - first) / first * 100.0)
}

/// Arithmetic mean of daily volume.
pub fn average_volume(series: &[PriceRecord]) -> DuelResult<f64> {
    non_empty(series, "average volume")?;
    let sum: u128 = series.iter().map(|r| u128::from(r.volume)).sum();
    Ok(sum as f64 / series.len() as f64)
}

/// Population standard deviation of closing prices.
///
/// Deviations are taken from values shifted by the first close, so a series
/// of identical closes yields exactly zero.
pub fn volatility(series: &[PriceRecord]) -> DuelResult<f64> {
    let shift = non_empty(series, "volatility")?.close;
    let n = series.len() as f64;
    let mean = series.iter().map(|r| r.close - shift).sum::<f64>() / n;
    let sum_sq: f64 = series
        .iter()
        .map(|r| {
            let d = r.close - shift - mean;
            d * d
        })
        .sum();
    Ok((sum_sq / n).max(0.0).sqrt())
}

/// Highest closing price.
pub fn max_close(series: &[PriceRecord]) -> DuelResult<f64> {
    let first = non_empty(series, "max close")?.close;
    Ok(series.iter().skip(1).map(|r| r.close).fold(first, f64::max))
}

/// Lowest closing price.
pub fn min_close(series: &[PriceRecord]) -> DuelResult<f64> {
    let first = non_empty(series, "min close")?.close;
    Ok(series.iter().skip(1).map(|r| r.close).fold(first, f64::min))
}

/// Sum of dividend amounts; zero when no dividends were paid.
pub fn total_dividends(series: &[DividendRecord]) -> f64 {
    series.iter().map(|r| r.amount).sum()
}
