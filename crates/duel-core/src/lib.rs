//! # Duel Core
//!
//! Record loading, metrics and scoring for head-to-head stock comparison.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: metrics are stateless functions of a record slice
//! - **File order is meaningful**: loaders never re-sort, so "first" and
//!   "last" for total return mean first and last row in the file
//! - **All-or-nothing**: any load or metric failure is returned before any
//!   output is produced
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use duel_core::prelude::*;
//!
//! let ko = SecurityData {
//!     security: Security::new("KO", "Coca-Cola"),
//!     prices: load_prices("data/KO_stock_price.csv")?,
//!     dividends: load_dividends("data/KO_stock_dividend.csv")?,
//! };
//! let pep = /* ... */;
//!
//! let comparison = Comparison::compute(&ko, &pep)?;
//! println!("{:?}", comparison.verdict());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod comparison;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod records;
pub mod scorecard;

pub use comparison::{Comparison, SideSummary};
pub use error::{DuelError, DuelResult};
pub use loader::{load_dividends, load_prices};
pub use metrics::SeriesMetrics;
pub use records::{DividendRecord, Period, PriceRecord, Security, SecurityData};
pub use scorecard::{score_comparison, Criterion, CriterionOutcome, Scorecard, Side, Verdict};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::comparison::{Comparison, SideSummary};
    pub use crate::error::{DuelError, DuelResult};
    pub use crate::loader::{load_dividends, load_prices};
    pub use crate::metrics::{
        average_close, average_volume, max_close, min_close, total_dividends,
        total_return_percent, volatility, SeriesMetrics,
    };
    pub use crate::records::{DividendRecord, Period, PriceRecord, Security, SecurityData};
    pub use crate::scorecard::{
        score_comparison, Criterion, CriterionOutcome, Scorecard, Side, Verdict,
    };
}
