//! PNG output checks.

use duel_chart::prelude::*;
use duel_core::DuelError;
use proptest::prelude::*;
use tempfile::TempDir;

fn five_groups() -> ChartSpec {
    ChartSpec::new("Coca-Cola vs PepsiCo", "Coca-Cola (KO)", "PepsiCo (PEP)")
        .with_subtitle("Period 2024-01-02 to 2024-12-31")
        .with_group("Avg Close ($)", 61.2, 162.9)
        .with_group("Return (%)", 8.4, -3.1)
        .with_group("Volume (K)", 14_250.0, 5_730.0)
        .with_group("Volatility ($)", 2.31, 6.07)
        .with_group("Dividends ($)", 1.94, 5.42)
}

#[test]
fn png_is_rgba_with_default_size() {
    let bytes = ChartRenderer::default().render_png(&five_groups()).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgba8);
    assert_eq!((decoded.width(), decoded.height()), (1200, 750));
}

#[test]
fn all_zero_values_still_render() {
    let spec = ChartSpec::new("Flat", "A", "B")
        .with_group("x", 0.0, 0.0)
        .with_group("y", 0.0, 0.0);
    let bytes = ChartRenderer::default().render_png(&spec).unwrap();
    assert!(image::load_from_memory(&bytes).is_ok());
}

#[test]
fn render_to_file_overwrites() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("comparison_chart.png");
    std::fs::write(&path, b"stale").unwrap();

    ChartRenderer::new(800, 500)
        .render_to_file(&five_groups(), &path)
        .unwrap();

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (800, 500));
}

#[test]
fn unwritable_destination_is_write_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("chart.png");

    let err = ChartRenderer::default()
        .render_to_file(&five_groups(), &path)
        .unwrap_err();
    match err {
        DuelError::OutputWriteFailure { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("Expected OutputWriteFailure, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn bars_stay_inside_plot(values in prop::collection::vec((-1e6f64..1e7, -1e6f64..1e7), 1..8)) {
        let mut spec = ChartSpec::new("p", "A", "B");
        for (i, (a, b)) in values.iter().enumerate() {
            spec = spec.with_group(format!("g{i}"), *a, *b);
        }
        let layout = ChartLayout::compute(&spec, 1200, 750);
        for group in &layout.groups {
            for bar in &group.bars {
                prop_assert!(bar.height >= 0);
                prop_assert!(bar.y >= layout.plot.top);
                prop_assert_eq!(bar.bottom(), layout.plot.bottom);
                prop_assert!(bar.x >= layout.plot.left);
                prop_assert!(bar.x + bar.width <= layout.plot.right);
            }
        }
    }
}
