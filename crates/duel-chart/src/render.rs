//! PNG rendering.
//!
//! The chart is painted into an in-memory RGB buffer with plotters, then
//! re-encoded as an RGBA PNG with `image`. Fonts are embedded so output does
//! not depend on what the host has installed.

use std::io::Cursor;
use std::path::Path;

use duel_core::{DuelError, DuelResult, Side};
use image::{DynamicImage, ImageFormat, RgbImage};
use once_cell::sync::OnceCell;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontDesc, FontFamily, FontStyle};
use tracing::{debug, info};

use crate::layout::{
    ChartLayout, AXIS_LABEL_GAP, CATEGORY_LABEL_OFFSET, DEFAULT_HEIGHT, DEFAULT_WIDTH,
    SWATCH_SIZE, VALUE_LABEL_OFFSET,
};
use crate::spec::ChartSpec;
use crate::theme::Theme;

const REGULAR_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const BOLD_FONT: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

const TITLE_Y: i32 = 45;
const SUBTITLE_Y: i32 = 70;

static FONTS: OnceCell<Result<(), String>> = OnceCell::new();

fn ensure_fonts() -> DuelResult<()> {
    FONTS
        .get_or_init(|| {
            let family = FontFamily::SansSerif.as_str();
            register_font(family, FontStyle::Normal, REGULAR_FONT)
                .map_err(|_| "embedded regular font is invalid".to_string())?;
            register_font(family, FontStyle::Bold, BOLD_FONT)
                .map_err(|_| "embedded bold font is invalid".to_string())?;
            Ok(())
        })
        .clone()
        .map_err(DuelError::render)
}

fn font(size: f64, style: FontStyle) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size, style)
}

fn plot_err<E: std::fmt::Display>(err: E) -> DuelError {
    DuelError::render(err.to_string())
}

/// Draws [`ChartSpec`]s as PNG images.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    width: u32,
    height: u32,
    theme: Theme,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl ChartRenderer {
    /// Creates a renderer for a canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            theme: Theme::default(),
        }
    }

    /// Replaces the palette.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Canvas size as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Geometry this renderer would paint for `spec`.
    pub fn layout(&self, spec: &ChartSpec) -> ChartLayout {
        ChartLayout::compute(spec, self.width, self.height)
    }

    /// Paints `spec` and returns the raw RGB image.
    pub fn render_rgb(&self, spec: &ChartSpec) -> DuelResult<RgbImage> {
        if self.width == 0 || self.height == 0 {
            return Err(DuelError::render(format!(
                "canvas size {}x{} is empty",
                self.width, self.height
            )));
        }
        ensure_fonts()?;

        let layout = self.layout(spec);
        debug!(
            groups = layout.groups.len(),
            max_value = layout.max_value,
            "Rendering chart"
        );

        let mut buffer = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (self.width, self.height))
                .into_drawing_area();
            self.paint(&root, spec, &layout)?;
            root.present().map_err(plot_err)?;
        }

        RgbImage::from_raw(self.width, self.height, buffer)
            .ok_or_else(|| DuelError::render("pixel buffer does not match canvas size"))
    }

    /// Paints `spec` and encodes it as an RGBA PNG.
    pub fn render_png(&self, spec: &ChartSpec) -> DuelResult<Vec<u8>> {
        let rgba = DynamicImage::ImageRgb8(self.render_rgb(spec)?).into_rgba8();
        let mut bytes = Vec::new();
        rgba.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(plot_err)?;
        Ok(bytes)
    }

    /// Paints `spec` and writes the PNG to `path`, replacing any existing file.
    pub fn render_to_file(&self, spec: &ChartSpec, path: impl AsRef<Path>) -> DuelResult<()> {
        let path = path.as_ref();
        let bytes = self.render_png(spec)?;
        std::fs::write(path, &bytes).map_err(|e| DuelError::write_failure(path, e))?;
        info!(path = %path.display(), bytes = bytes.len(), "Wrote chart");
        Ok(())
    }

    fn paint<DB>(
        &self,
        root: &DrawingArea<DB, Shift>,
        spec: &ChartSpec,
        layout: &ChartLayout,
    ) -> DuelResult<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let theme = &self.theme;
        let w = layout.width as i32;
        let plot = layout.plot;

        // Background, one row at a time.
        for y in 0..layout.height {
            let row = y as i32;
            root.draw(&Rectangle::new(
                [(0, row), (w, row + 1)],
                theme.background_at(y, layout.height).filled(),
            ))
            .map_err(plot_err)?;
        }

        root.draw(&Rectangle::new(
            [(plot.left, plot.top), (plot.right, plot.bottom)],
            theme.plot_background.filled(),
        ))
        .map_err(plot_err)?;

        let axis_style = font(12.0, FontStyle::Normal)
            .color(&theme.axis_text)
            .pos(Pos::new(HPos::Right, VPos::Center));
        for line in &layout.gridlines {
            root.draw(&PathElement::new(
                vec![(plot.left, line.y), (plot.right, line.y)],
                theme.grid,
            ))
            .map_err(plot_err)?;
            root.draw(&Text::new(
                line.label.as_str(),
                (plot.left - AXIS_LABEL_GAP, line.y),
                axis_style.clone(),
            ))
            .map_err(plot_err)?;
        }

        let value_font = font(12.0, FontStyle::Bold);
        let category_style = font(13.0, FontStyle::Normal)
            .color(&theme.category_text)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        for group in &layout.groups {
            for bar in &group.bars {
                let colors = theme.series(bar.side);
                if bar.height > 0 {
                    let corners = [(bar.x, bar.y), (bar.x + bar.width, bar.bottom())];
                    root.draw(&Rectangle::new(corners, colors.fill.filled()))
                        .map_err(plot_err)?;
                    root.draw(&Rectangle::new(corners, colors.shade.stroke_width(1)))
                        .map_err(plot_err)?;
                }
                root.draw(&Text::new(
                    bar.label.as_str(),
                    (bar.center_x(), bar.y - VALUE_LABEL_OFFSET),
                    value_font
                        .clone()
                        .color(&colors.label)
                        .pos(Pos::new(HPos::Center, VPos::Bottom)),
                ))
                .map_err(plot_err)?;
            }
            root.draw(&Text::new(
                group.label.as_str(),
                (group.label_x, plot.bottom + CATEGORY_LABEL_OFFSET),
                category_style.clone(),
            ))
            .map_err(plot_err)?;
        }

        root.draw(&Rectangle::new(
            [(plot.left, plot.top), (plot.right, plot.bottom)],
            theme.border.stroke_width(2),
        ))
        .map_err(plot_err)?;

        let centered = Pos::new(HPos::Center, VPos::Bottom);
        root.draw(&Text::new(
            spec.title.as_str(),
            (w / 2, TITLE_Y),
            font(28.0, FontStyle::Bold).color(&theme.title).pos(centered),
        ))
        .map_err(plot_err)?;
        if let Some(subtitle) = &spec.subtitle {
            root.draw(&Text::new(
                subtitle.as_str(),
                (w / 2, SUBTITLE_Y),
                font(14.0, FontStyle::Normal)
                    .color(&theme.subtitle)
                    .pos(centered),
            ))
            .map_err(plot_err)?;
        }

        let legend_style = font(14.0, FontStyle::Normal)
            .color(&theme.category_text)
            .pos(Pos::new(HPos::Left, VPos::Center));
        for (side, name) in [(Side::A, &spec.name_a), (Side::B, &spec.name_b)] {
            let (x, y) = layout.legend.swatch(side);
            root.draw(&Rectangle::new(
                [(x, y), (x + SWATCH_SIZE.0, y + SWATCH_SIZE.1)],
                theme.series(side).fill.filled(),
            ))
            .map_err(plot_err)?;
            root.draw(&Text::new(
                name.as_str(),
                (x + SWATCH_SIZE.0 + 6, y + SWATCH_SIZE.1 / 2),
                legend_style.clone(),
            ))
            .map_err(plot_err)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChartSpec {
        ChartSpec::new("KO vs PEP", "Coca-Cola (KO)", "PepsiCo (PEP)")
            .with_subtitle("Period d1 to d3")
            .with_group("Avg Close ($)", 55.0, 95.0)
            .with_group("Return (%)", 20.0, -5.0)
    }

    #[test]
    fn test_fonts_register_once() {
        ensure_fonts().unwrap();
        ensure_fonts().unwrap();
    }

    #[test]
    fn test_render_rgb_dimensions() {
        let image = ChartRenderer::new(640, 400).render_rgb(&sample()).unwrap();
        assert_eq!(image.dimensions(), (640, 400));
    }

    #[test]
    fn test_background_gradient_corners() {
        let image = ChartRenderer::default().render_rgb(&sample()).unwrap();
        assert_eq!(image.get_pixel(2, 0).0, [20, 20, 40]);
        assert_eq!(image.get_pixel(2, 749).0, [40, 40, 70]);
    }

    #[test]
    fn test_bar_fill_colors() {
        let renderer = ChartRenderer::default();
        let spec = sample();
        let layout = renderer.layout(&spec);
        let image = renderer.render_rgb(&spec).unwrap();

        let [a, b] = &layout.groups[0].bars;
        let inside = |bar: &crate::layout::Bar| {
            image
                .get_pixel(bar.center_x() as u32, (bar.bottom() - 5) as u32)
                .0
        };
        assert_eq!(inside(a), [220, 40, 40]);
        assert_eq!(inside(b), [40, 100, 220]);
    }

    #[test]
    fn test_empty_canvas_is_render_failure() {
        let err = ChartRenderer::new(0, 300).render_png(&sample()).unwrap_err();
        assert!(matches!(err, DuelError::RenderFailure { .. }));
    }
}
