//! # Duel Report
//!
//! Output for a finished head-to-head comparison.
//!
//! ## Design Philosophy
//!
//! - **One snapshot, many sinks**: console, summary file, chart and JSON all
//!   read the same [`Comparison`](duel_core::Comparison)
//! - **All-or-nothing**: [`Pipeline::run`] loads and scores both securities
//!   before the first sink is called
//! - **Optional parallel loading**: the `parallel` feature loads the two
//!   securities on separate rayon tasks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use duel_report::prelude::*;
//!
//! let ko = InputSpec::conventional("data", Security::new("KO", "Coca-Cola"));
//! let pep = InputSpec::conventional("data", Security::new("PEP", "PepsiCo"));
//!
//! let comparison = Pipeline::new(ko, pep)
//!     .with_sink(ChartSink::new("comparison_chart.png"))
//!     .with_sink(SummaryFileSink::new("analysis_output.txt"))
//!     .with_sink(ConsoleSink::stdout().with_color(true))
//!     .run()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Load both securities concurrently with rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod console;
pub mod json;
pub mod pipeline;
pub mod rows;
pub mod sink;
pub mod summary;

pub use console::{verdict_line, ConsoleReport};
pub use json::Snapshot;
pub use pipeline::{dividend_file_name, price_file_name, InputSpec, Pipeline};
pub use rows::{metric_rows, MetricRow, Unit};
pub use sink::{ChartSink, ConsoleMode, ConsoleSink, JsonSink, OutputSink, SummaryFileSink};
pub use summary::{summary_text, write_summary, DEFAULT_SUMMARY_FILE};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::console::{verdict_line, ConsoleReport};
    pub use crate::pipeline::{InputSpec, Pipeline};
    pub use crate::sink::{
        ChartSink, ConsoleMode, ConsoleSink, JsonSink, OutputSink, SummaryFileSink,
    };
    pub use crate::summary::{summary_text, write_summary};
    pub use duel_core::prelude::*;
}
