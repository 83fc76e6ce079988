//! Side-by-side scatter rendering.
//!
//! Presentation only: two panels under one title, colored by the two
//! labelings, with cluster centers and the example points called out.

use crate::error::{MezclaError, Result};
use crate::primitives::Matrix;
use crate::select::ExampleSet;
use plotters::prelude::*;
use std::path::Path;

/// Output raster size: 14×7 inches at 600 ppi.
pub const IMAGE_SIZE: (u32, u32) = (8400, 4200);

/// Shared cluster palette; palette order is cluster id order in both
/// panels.
pub const PALETTE: [RGBColor; 5] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
];

/// One panel's inputs: a caption, a labeling, and that model's centers.
pub struct Panel<'a> {
    /// Caption drawn above the panel.
    pub caption: &'a str,
    /// Per-point cluster labels.
    pub labels: &'a [usize],
    /// Cluster centers (k × 2).
    pub centers: &'a Matrix<f32>,
}

/// Renders the two-panel comparison at the fixed output size.
///
/// # Errors
///
/// Returns [`MezclaError::Render`] if the plotting backend fails, which
/// includes I/O failures on the output path.
pub fn render_comparison(
    path: &Path,
    data: &Matrix<f32>,
    left: &Panel<'_>,
    right: &Panel<'_>,
    examples: &ExampleSet,
    title: &str,
) -> Result<()> {
    render_sized(path, IMAGE_SIZE, data, left, right, examples, title)
}

/// Renders the comparison onto a canvas of the given size.
///
/// Fonts and markers scale with the width, so smaller canvases (handy in
/// tests) stay legible.
///
/// # Errors
///
/// Returns [`MezclaError::Render`] if the plotting backend fails.
pub fn render_sized(
    path: &Path,
    size: (u32, u32),
    data: &Matrix<f32>,
    left: &Panel<'_>,
    right: &Panel<'_>,
    examples: &ExampleSet,
    title: &str,
) -> Result<()> {
    let scale = f64::from(size.0) / f64::from(IMAGE_SIZE.0);
    let px = |base: f64| -> i32 { ((base * scale).round() as i32).max(1) };

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let root = root
        .titled(title, ("sans-serif", px(140.0)))
        .map_err(render_err)?;

    let panels = root.split_evenly((1, 2));
    let bounds = data_bounds(data);
    draw_panel(&panels[0], data, left, examples, bounds, scale)?;
    draw_panel(&panels[1], data, right, examples, bounds, scale)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn render_err<E: std::fmt::Display>(err: E) -> MezclaError {
    MezclaError::Render(err.to_string())
}

/// Data extent with an 8% pad on each side.
fn data_bounds(data: &Matrix<f32>) -> (f32, f32, f32, f32) {
    let mut x_min = f32::INFINITY;
    let mut x_max = f32::NEG_INFINITY;
    let mut y_min = f32::INFINITY;
    let mut y_max = f32::NEG_INFINITY;

    for i in 0..data.n_rows() {
        x_min = x_min.min(data.get(i, 0));
        x_max = x_max.max(data.get(i, 0));
        y_min = y_min.min(data.get(i, 1));
        y_max = y_max.max(data.get(i, 1));
    }

    let x_pad = (x_max - x_min) * 0.08;
    let y_pad = (y_max - y_min) * 0.08;
    (x_min - x_pad, x_max + x_pad, y_min - y_pad, y_max + y_pad)
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    data: &Matrix<f32>,
    panel: &Panel<'_>,
    examples: &ExampleSet,
    bounds: (f32, f32, f32, f32),
    scale: f64,
) -> Result<()> {
    let px = |base: f64| -> i32 { ((base * scale).round() as i32).max(1) };
    let pxu = |base: f64| -> u32 { ((base * scale).round() as u32).max(1) };
    let (x_min, x_max, y_min, y_max) = bounds;
    let n_clusters = panel.centers.n_rows();

    let mut chart = ChartBuilder::on(area)
        .margin(px(40.0))
        .set_all_label_area_size(px(140.0))
        .caption(panel.caption, ("sans-serif", px(90.0)))
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(10)
        .y_labels(10)
        .x_desc("x1")
        .y_desc("x2")
        .label_style(("sans-serif", px(55.0)))
        .axis_desc_style(("sans-serif", px(65.0)))
        .x_label_formatter(&|v| format!("{v:.1}"))
        .y_label_formatter(&|v| format!("{v:.1}"))
        .draw()
        .map_err(render_err)?;

    // One series per cluster so colors and legend entries line up.
    for k in 0..n_clusters {
        let color = PALETTE[k % PALETTE.len()];
        let members: Vec<(f32, f32)> = panel
            .labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == k)
            .map(|(i, _)| (data.get(i, 0), data.get(i, 1)))
            .collect();

        let radius = px(18.0);
        chart
            .draw_series(
                members
                    .into_iter()
                    .map(|coord| Circle::new(coord, radius, color.mix(0.75).filled())),
            )
            .map_err(render_err)?
            .label(format!("cluster {}", k + 1))
            .legend(move |(x, y)| Circle::new((x, y), radius, color.filled()));
    }

    // Example points: heavy open rings on top of their markers.
    let ring = px(42.0);
    chart
        .draw_series(examples.points.iter().map(|p| {
            Circle::new(
                (data.get(p.index, 0), data.get(p.index, 1)),
                ring,
                ShapeStyle::from(&BLACK).stroke_width(pxu(10.0)),
            )
        }))
        .map_err(render_err)?;

    // Cluster centers as crosses.
    let cross = px(36.0);
    chart
        .draw_series((0..n_clusters).map(|k| {
            Cross::new(
                (panel.centers.get(k, 0), panel.centers.get(k, 1)),
                cross,
                ShapeStyle::from(&BLACK).stroke_width(pxu(12.0)),
            )
        }))
        .map_err(render_err)?;

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.85))
        .label_font(("sans-serif", px(60.0)))
        .draw()
        .map_err(render_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::{ExamplePoint, ExampleSet};

    fn fixture() -> (Matrix<f32>, Vec<usize>, Matrix<f32>, ExampleSet) {
        let data = Matrix::from_vec(
            6,
            2,
            vec![0.0, 0.0, 1.0, 0.5, 0.2, 1.1, 4.0, 4.0, 4.2, 3.9, 4.1, 4.4],
        )
        .unwrap();
        let labels = vec![0, 1, 0, 1, 1, 0];
        let centers = Matrix::from_vec(2, 2, vec![0.4, 0.5, 4.1, 4.1]).unwrap();
        let examples = ExampleSet {
            mixture_cluster: 0,
            points: [
                ExamplePoint {
                    index: 0,
                    hard_label: 0,
                },
                ExamplePoint {
                    index: 1,
                    hard_label: 1,
                },
                ExamplePoint {
                    index: 3,
                    hard_label: 1,
                },
            ],
        };
        (data, labels, centers, examples)
    }

    #[test]
    fn test_render_writes_png() {
        let (data, labels, centers, examples) = fixture();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panels.png");

        let left = Panel {
            caption: "left",
            labels: &labels,
            centers: &centers,
        };
        let right = Panel {
            caption: "right",
            labels: &labels,
            centers: &centers,
        };

        render_sized(&path, (840, 420), &data, &left, &right, &examples, "test")
            .unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_data_bounds_pad() {
        let data = Matrix::from_vec(2, 2, vec![0.0, 0.0, 10.0, 20.0]).unwrap();
        let (x_min, x_max, y_min, y_max) = data_bounds(&data);
        assert!(x_min < 0.0 && x_max > 10.0);
        assert!(y_min < 0.0 && y_max > 20.0);
    }

    #[test]
    fn test_palette_is_distinct() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in PALETTE.iter().skip(i + 1) {
                assert_ne!((a.0, a.1, a.2), (b.0, b.1, b.2));
            }
        }
    }
}
