//! CSV record loaders.
//!
//! Both loaders discard the header row, trim every field and keep rows in
//! file order. Rows with too few fields are skipped; any field that cannot be
//! parsed aborts the whole load with [`DuelError::MalformedRecord`].

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::{DuelError, DuelResult};
use crate::records::{DividendRecord, PriceRecord};

/// Minimum fields in a price row: date, open, high, low, close, volume.
pub const PRICE_FIELDS: usize = 6;

/// Minimum fields in a dividend row: date, amount.
pub const DIVIDEND_FIELDS: usize = 2;

/// Loads a `date,open,high,low,close,volume` table.
pub fn load_prices(path: impl AsRef<Path>) -> DuelResult<Vec<PriceRecord>> {
    let path = path.as_ref();
    let records = load_table(path, PRICE_FIELDS, |row| {
        Ok(PriceRecord {
            date: row.text(0).to_string(),
            open: row.price(1, "open")?,
            high: row.price(2, "high")?,
            low: row.price(3, "low")?,
            close: row.price(4, "close")?,
            volume: row.volume(5)?,
        })
    })?;
    info!(path = %path.display(), rows = records.len(), "Loaded price series");
    Ok(records)
}

/// Loads a `date,amount` table.
pub fn load_dividends(path: impl AsRef<Path>) -> DuelResult<Vec<DividendRecord>> {
    let path = path.as_ref();
    let records = load_table(path, DIVIDEND_FIELDS, |row| {
        Ok(DividendRecord {
            date: row.text(0).to_string(),
            amount: row.price(1, "amount")?,
        })
    })?;
    info!(path = %path.display(), rows = records.len(), "Loaded dividend series");
    Ok(records)
}

fn load_table<T>(
    path: &Path,
    min_fields: usize,
    parse: impl Fn(&Row<'_>) -> DuelResult<T>,
) -> DuelResult<Vec<T>> {
    let file = File::open(path).map_err(|e| DuelError::unavailable(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let mut out = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = record.position().map_or(0, csv::Position::line);

        if record.len() < min_fields {
            debug!(
                path = %path.display(),
                line,
                fields = record.len(),
                "Skipping short row"
            );
            continue;
        }

        out.push(parse(&Row {
            path,
            line,
            record: &record,
        })?);
    }
    Ok(out)
}

fn csv_error(path: &Path, err: csv::Error) -> DuelError {
    let line = err.position().map_or(0, csv::Position::line);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => DuelError::unavailable(path, source),
        _ => DuelError::malformed(path, line, reason),
    }
}

/// A data row with enough context to report parse failures.
struct Row<'a> {
    path: &'a Path,
    line: u64,
    record: &'a StringRecord,
}

impl Row<'_> {
    fn text(&self, index: usize) -> &str {
        self.record.get(index).unwrap_or("")
    }

    /// Parses a non-negative finite decimal.
    fn price(&self, index: usize, field: &str) -> DuelResult<f64> {
        let raw = self.text(index);
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
            Ok(_) => Err(self.fail(format!("{field} must be a non-negative number, got '{raw}'"))),
            Err(_) => Err(self.fail(format!("invalid {field} '{raw}'"))),
        }
    }

    fn volume(&self, index: usize) -> DuelResult<u64> {
        let raw = self.text(index);
        raw.parse::<u64>()
            .map_err(|_| self.fail(format!("invalid volume '{raw}'")))
    }

    fn fail(&self, reason: String) -> DuelError {
        DuelError::malformed(self.path, self.line, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_prices_keeps_file_order() {
        let file = csv_file(
            "date,open,high,low,close,volume\n\
             2019-01-03,46.5,47.0,46.1,46.6,1200\n\
             2019-01-02,46.0,47.2,45.9,46.9,1500\n",
        );
        let prices = load_prices(file.path()).unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].date, "2019-01-03");
        assert_eq!(prices[1].date, "2019-01-02");
        assert_eq!(prices[1].volume, 1500);
        assert!((prices[0].close - 46.6).abs() < 1e-12);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let file = csv_file(
            "date,open,high,low,close,volume\n\
             2019-01-02,46.0,47.2,45.9,46.9,1500\n\
             2019-01-03,46.5\n\
             2019-01-04,46.1,46.8,45.7,46.2,900\n",
        );
        let prices = load_prices(file.path()).unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[1].date, "2019-01-04");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let file = csv_file("date,amount\n 2019-03-14 , 0.40 \n");
        let dividends = load_dividends(file.path()).unwrap();
        assert_eq!(dividends, vec![DividendRecord::new("2019-03-14", 0.40)]);
    }

    #[test]
    fn test_malformed_close_reports_line() {
        let file = csv_file(
            "date,open,high,low,close,volume\n\
             2019-01-02,46.0,47.2,45.9,46.9,1500\n\
             2019-01-03,46.5,47.0,46.1,abc,1200\n",
        );
        match load_prices(file.path()) {
            Err(DuelError::MalformedRecord { line, reason, .. }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("close"));
                assert!(reason.contains("abc"));
            }
            other => panic!("Expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_fractional_volume_is_malformed() {
        let file = csv_file("date,open,high,low,close,volume\n2019-01-02,1,1,1,1,10.5\n");
        assert!(matches!(
            load_prices(file.path()),
            Err(DuelError::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_negative_dividend_is_malformed() {
        let file = csv_file("date,amount\n2019-03-14,-0.40\n");
        assert!(matches!(
            load_dividends(file.path()),
            Err(DuelError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_header_only_loads_empty() {
        let file = csv_file("date,amount\n");
        assert!(load_dividends(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_prices("/nonexistent/duel/KO_stock_price.csv").unwrap_err();
        assert!(matches!(err, DuelError::ResourceUnavailable { .. }));
        assert!(err.to_string().contains("KO_stock_price.csv"));
    }
}
