//! Pixel geometry for the grouped bar chart.
//!
//! Everything here is pure arithmetic on a [`ChartSpec`] and the canvas size; the
//! renderer only paints what [`ChartLayout::compute`] returns. Coordinates
//! are in pixels with the origin at the top-left corner.

use duel_core::Side;
use serde::{Deserialize, Serialize};

use crate::format::{format_axis, format_value};
use crate::spec::ChartSpec;

/// Default canvas width.
pub const DEFAULT_WIDTH: u32 = 1200;

/// Default canvas height.
pub const DEFAULT_HEIGHT: u32 = 750;

/// Scale headroom above the tallest bar.
pub const HEADROOM: f64 = 1.15;

/// Number of intervals between gridlines (one more line than this is drawn).
pub const GRID_INTERVALS: i32 = 5;

/// Bar width as a fraction of group width.
pub const BAR_FRACTION: f64 = 0.30;

/// Gap between the two bars as a fraction of group width.
pub const GAP_FRACTION: f64 = 0.08;

/// Distance between a bar top and its value label baseline.
pub const VALUE_LABEL_OFFSET: i32 = 6;

/// Distance between the baseline and the category label baseline.
pub const CATEGORY_LABEL_OFFSET: i32 = 18;

/// Distance between the plot's left edge and the right end of axis labels.
pub const AXIS_LABEL_GAP: i32 = 8;

/// Legend swatch size.
pub const SWATCH_SIZE: (i32, i32) = (20, 14);

/// Horizontal distance from the first legend entry to the second.
pub const LEGEND_SPACING: i32 = 170;

/// Space reserved around the plot region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    /// Left margin, room for axis labels.
    pub left: i32,
    /// Right margin.
    pub right: i32,
    /// Top margin, room for title and subtitle.
    pub top: i32,
    /// Bottom margin, room for category labels and legend.
    pub bottom: i32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 80,
            right: 40,
            top: 100,
            bottom: 120,
        }
    }
}

/// The rectangle bars are drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotArea {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge, the baseline.
    pub bottom: i32,
}

impl PlotArea {
    /// Width in pixels, never negative.
    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    /// Height in pixels, never negative.
    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }
}

/// A horizontal gridline and its axis label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gridline {
    /// Vertical position.
    pub y: i32,
    /// Value the line represents.
    pub value: f64,
    /// Formatted value.
    pub label: String,
}

/// One bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Series the bar belongs to.
    pub side: Side,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels; zero for zero or negative values.
    pub height: i32,
    /// Value drawn.
    pub value: f64,
    /// Formatted value shown above the bar.
    pub label: String,
}

impl Bar {
    /// Horizontal center.
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Bottom edge (the baseline).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Geometry for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupLayout {
    /// Category label.
    pub label: String,
    /// Horizontal center of the label.
    pub label_x: i32,
    /// Bars for series A and B, in that order.
    pub bars: [Bar; 2],
}

/// Legend anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendLayout {
    /// Left edge of the first swatch.
    pub x: i32,
    /// Top edge of both swatches.
    pub y: i32,
}

impl LegendLayout {
    /// Top-left corner of the swatch for `side`.
    pub fn swatch(&self, side: Side) -> (i32, i32) {
        match side {
            Side::A => (self.x, self.y),
            Side::B => (self.x + LEGEND_SPACING, self.y),
        }
    }
}

/// Complete chart geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Plot region.
    pub plot: PlotArea,
    /// Value mapped to the top of the plot region.
    pub max_value: f64,
    /// Gridlines from baseline to top.
    pub gridlines: Vec<Gridline>,
    /// One entry per spec group, in order.
    pub groups: Vec<GroupLayout>,
    /// Legend position.
    pub legend: LegendLayout,
}

impl ChartLayout {
    /// Computes the layout with default margins.
    pub fn compute(spec: &ChartSpec, width: u32, height: u32) -> Self {
        Self::compute_with_margins(spec, width, height, Margins::default())
    }

    /// Computes the layout with explicit margins.
    pub fn compute_with_margins(
        spec: &ChartSpec,
        width: u32,
        height: u32,
        margins: Margins,
    ) -> Self {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        let plot = PlotArea {
            left: margins.left,
            top: margins.top,
            right: w - margins.right,
            bottom: h - margins.bottom,
        };
        let max_value = scale_max(spec);

        let gridlines = (0..=GRID_INTERVALS)
            .map(|i| {
                let y = plot.bottom
                    - (f64::from(plot.height()) * f64::from(i) / f64::from(GRID_INTERVALS)) as i32;
                let value = max_value * f64::from(i) / f64::from(GRID_INTERVALS);
                Gridline {
                    y,
                    value,
                    label: format_axis(value),
                }
            })
            .collect();

        let groups = layout_groups(spec, &plot, max_value);

        Self {
            width,
            height,
            plot,
            max_value,
            gridlines,
            groups,
            legend: LegendLayout {
                x: w / 2 - 120,
                y: h - 55,
            },
        }
    }
}

/// Value at the top of the plot: the peak plus headroom, floored at 1.0
/// when the peak is not a positive finite number.
pub fn scale_max(spec: &ChartSpec) -> f64 {
    let scaled = spec.peak().unwrap_or(0.0) * HEADROOM;
    if scaled.is_finite() && scaled > 0.0 {
        scaled
    } else {
        1.0
    }
}

/// Height of a bar for `value`, truncated and clamped to the plot.
pub fn bar_height(value: f64, max_value: f64, plot_height: i32) -> i32 {
    let raw = (f64::from(plot_height) * (value / max_value)) as i32;
    raw.clamp(0, plot_height)
}

fn layout_groups(spec: &ChartSpec, plot: &PlotArea, max_value: f64) -> Vec<GroupLayout> {
    let count = i32::try_from(spec.groups.len()).unwrap_or(i32::MAX);
    if count == 0 {
        return Vec::new();
    }

    let group_width = plot.width() / count;
    let bar_width = (f64::from(group_width) * BAR_FRACTION) as i32;
    let gap = (f64::from(group_width) * GAP_FRACTION) as i32;

    spec.groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let i = i as i32;
            let start = plot.left + i * group_width + (group_width - 2 * bar_width - gap) / 2;
            let bar = |side: Side, x: i32, value: f64| {
                let height = bar_height(value, max_value, plot.height());
                Bar {
                    side,
                    x,
                    y: plot.bottom - height,
                    width: bar_width,
                    height,
                    value,
                    label: format_value(value),
                }
            };
            GroupLayout {
                label: group.label.clone(),
                label_x: start + (2 * bar_width + gap) / 2,
                bars: [
                    bar(Side::A, start, group.value_a),
                    bar(Side::B, start + bar_width + gap, group.value_b),
                ],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spec() -> ChartSpec {
        ChartSpec::new("Test", "A", "B")
            .with_group("Avg Close ($)", 55.0, 95.0)
            .with_group("Return (%)", 20.0, -5.0)
            .with_group("Volume (K)", 1_100.0, 950.0)
            .with_group("Volatility ($)", 4.08, 4.08)
            .with_group("Dividends ($)", 0.4, 1.0)
    }

    #[test]
    fn test_plot_area_default_margins() {
        let layout = ChartLayout::compute(&spec(), DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_eq!(
            layout.plot,
            PlotArea {
                left: 80,
                top: 100,
                right: 1160,
                bottom: 630
            }
        );
        assert_eq!(layout.plot.width(), 1080);
        assert_eq!(layout.plot.height(), 530);
    }

    #[test]
    fn test_scale_has_headroom() {
        let layout = ChartLayout::compute(&spec(), DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_relative_eq!(layout.max_value, 1_100.0 * 1.15);
    }

    #[test]
    fn test_gridlines() {
        let layout = ChartLayout::compute(&spec(), DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_eq!(layout.gridlines.len(), 6);
        assert_eq!(layout.gridlines[0].y, 630);
        assert_eq!(layout.gridlines[0].label, "0.0");
        assert_eq!(layout.gridlines[1].y, 630 - 106);
        assert_eq!(layout.gridlines[5].y, 100);
        assert_eq!(layout.gridlines[5].label, "1265.0");
    }

    #[test]
    fn test_group_geometry() {
        let layout = ChartLayout::compute(&spec(), DEFAULT_WIDTH, DEFAULT_HEIGHT);
        // 1080 / 5 = 216 per group, bars 64 wide, gap 17
        let first = &layout.groups[0];
        let [a, b] = &first.bars;
        assert_eq!(a.width, 64);
        assert_eq!(b.width, 64);
        assert_eq!(a.x, 80 + (216 - 128 - 17) / 2);
        assert_eq!(b.x, a.x + 64 + 17);
        assert_eq!(first.label_x, a.x + (128 + 17) / 2);

        let second = &layout.groups[1];
        assert_eq!(second.bars[0].x, a.x + 216);
    }

    #[test]
    fn test_bars_anchor_at_baseline() {
        let layout = ChartLayout::compute(&spec(), DEFAULT_WIDTH, DEFAULT_HEIGHT);
        for group in &layout.groups {
            for bar in &group.bars {
                assert_eq!(bar.bottom(), layout.plot.bottom);
                assert!(bar.y >= layout.plot.top);
            }
        }
        let volume = &layout.groups[2].bars[0];
        assert_eq!(volume.height, (530.0 / 1.15) as i32);
        assert_eq!(volume.label, "1.1K");
    }

    #[test]
    fn test_negative_value_collapses() {
        let layout = ChartLayout::compute(&spec(), DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let pep_return = &layout.groups[1].bars[1];
        assert_eq!(pep_return.side, Side::B);
        assert_eq!(pep_return.height, 0);
        assert_eq!(pep_return.label, "-5");
    }

    #[test]
    fn test_all_zero_scale_floor() {
        let zeros = ChartSpec::new("z", "A", "B")
            .with_group("x", 0.0, 0.0)
            .with_group("y", 0.0, 0.0);
        let layout = ChartLayout::compute(&zeros, DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_eq!(layout.max_value, 1.0);
        assert!(layout.groups.iter().all(|g| g.bars.iter().all(|b| b.height == 0)));
        assert_eq!(layout.gridlines[5].label, "1.0");
    }

    #[test]
    fn test_empty_spec() {
        let layout = ChartLayout::compute(&ChartSpec::new("e", "A", "B"), 800, 600);
        assert!(layout.groups.is_empty());
        assert_eq!(layout.max_value, 1.0);
        assert_eq!(layout.gridlines.len(), 6);
    }

    #[test]
    fn test_legend_position() {
        let layout = ChartLayout::compute(&spec(), DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_eq!(layout.legend.swatch(Side::A), (480, 695));
        assert_eq!(layout.legend.swatch(Side::B), (650, 695));
    }
}
