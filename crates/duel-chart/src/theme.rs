//! Chart colors.

use duel_core::Side;
use plotters::style::RGBColor;

/// Fill, shade and label color for one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesColors {
    /// Bar fill and legend swatch.
    pub fill: RGBColor,
    /// Bar outline.
    pub shade: RGBColor,
    /// Value label above the bar.
    pub label: RGBColor,
}

/// Palette for the whole canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Background gradient at the top edge.
    pub background_top: RGBColor,
    /// Background gradient at the bottom edge.
    pub background_bottom: RGBColor,
    /// Plot region fill.
    pub plot_background: RGBColor,
    /// Plot region border.
    pub border: RGBColor,
    /// Gridlines.
    pub grid: RGBColor,
    /// Gridline labels.
    pub axis_text: RGBColor,
    /// Title.
    pub title: RGBColor,
    /// Subtitle.
    pub subtitle: RGBColor,
    /// Category labels and legend names.
    pub category_text: RGBColor,
    /// Series A.
    pub series_a: SeriesColors,
    /// Series B.
    pub series_b: SeriesColors,
}

impl Theme {
    /// Dark navy palette with red for series A and blue for series B.
    pub const fn midnight() -> Self {
        Self {
            background_top: RGBColor(20, 20, 40),
            background_bottom: RGBColor(40, 40, 70),
            plot_background: RGBColor(30, 30, 55),
            border: RGBColor(80, 80, 120),
            grid: RGBColor(60, 60, 90),
            axis_text: RGBColor(150, 150, 170),
            title: RGBColor(255, 255, 255),
            subtitle: RGBColor(180, 180, 200),
            category_text: RGBColor(200, 200, 220),
            series_a: SeriesColors {
                fill: RGBColor(220, 40, 40),
                shade: RGBColor(180, 30, 30),
                label: RGBColor(255, 180, 180),
            },
            series_b: SeriesColors {
                fill: RGBColor(40, 100, 220),
                shade: RGBColor(30, 80, 180),
                label: RGBColor(180, 200, 255),
            },
        }
    }

    /// Colors for `side`.
    pub fn series(&self, side: Side) -> SeriesColors {
        match side {
            Side::A => self.series_a,
            Side::B => self.series_b,
        }
    }

    /// Background color for row `y` of a canvas `height` pixels tall.
    pub fn background_at(&self, y: u32, height: u32) -> RGBColor {
        let t = if height > 1 {
            f64::from(y.min(height - 1)) / f64::from(height - 1)
        } else {
            0.0
        };
        let lerp = |from: u8, to: u8| {
            (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
        };
        let (top, bottom) = (self.background_top, self.background_bottom);
        RGBColor(
            lerp(top.0, bottom.0),
            lerp(top.1, bottom.1),
            lerp(top.2, bottom.2),
        )
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::midnight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let theme = Theme::default();
        assert_eq!(theme.background_at(0, 750), RGBColor(20, 20, 40));
        assert_eq!(theme.background_at(749, 750), RGBColor(40, 40, 70));
        assert_eq!(theme.background_at(10_000, 750), RGBColor(40, 40, 70));
    }

    #[test]
    fn test_gradient_is_monotonic() {
        let theme = Theme::default();
        let mut previous = theme.background_at(0, 300);
        for y in 1..300 {
            let current = theme.background_at(y, 300);
            assert!(current.0 >= previous.0 && current.2 >= previous.2);
            previous = current;
        }
    }

    #[test]
    fn test_series_lookup() {
        let theme = Theme::default();
        assert_eq!(theme.series(Side::A).fill, RGBColor(220, 40, 40));
        assert_eq!(theme.series(Side::B).fill, RGBColor(40, 100, 220));
    }
}
