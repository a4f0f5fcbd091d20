//! # Duel Chart
//!
//! Grouped bar chart rendering for two-series comparisons.
//!
//! ## Design Philosophy
//!
//! - **Layout is data**: [`ChartLayout`] is computed without touching pixels,
//!   so geometry can be tested on its own
//! - **Self-contained fonts**: DejaVu Sans is embedded and registered once
//! - **One bar pair per category**: series A on the left, B on the right
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use duel_chart::prelude::*;
//!
//! let spec = ChartSpec::new("KO vs PEP", "Coca-Cola (KO)", "PepsiCo (PEP)")
//!     .with_group("Avg Close ($)", 55.0, 95.0)
//!     .with_group("Return (%)", 20.0, -5.0);
//!
//! ChartRenderer::default().render_to_file(&spec, "comparison_chart.png")?;
//! ```
//!
//! ## Module Overview
//!
//! - [`spec`] - Chart input (title, legend names, groups)
//! - [`layout`] - Pixel geometry
//! - [`format`] - Bar and axis label formatting
//! - [`theme`] - Colors
//! - [`render`] - PNG output

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod format;
pub mod layout;
pub mod render;
pub mod spec;
pub mod theme;

pub use format::{format_axis, format_value};
pub use layout::{ChartLayout, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use render::ChartRenderer;
pub use spec::{ChartGroup, ChartSpec};
pub use theme::Theme;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::format::{format_axis, format_value};
    pub use crate::layout::{Bar, ChartLayout, Gridline, GroupLayout, PlotArea};
    pub use crate::render::ChartRenderer;
    pub use crate::spec::{ChartGroup, ChartSpec};
    pub use crate::theme::{SeriesColors, Theme};
}
