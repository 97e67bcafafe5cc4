use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::model::identity::IdentityMatrix;
use crate::render::palette::coolwarm;
use crate::render::{CHART_FORMATS, FONT, ImageFormat, RenderError, draw_err, ensure_parent};

const COLORBAR_WIDTH: u32 = 260;
const LABEL_AREA: u32 = 260;
const CELL_PX: u32 = 90;
const COLORBAR_STEPS: usize = 100;

#[derive(Debug, Clone, Copy)]
pub struct HeatmapStyle {
    pub vmin: f64,
    pub vmax: f64,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            vmin: 60.0,
            vmax: 100.0,
        }
    }
}

fn canvas_size(n: usize) -> (u32, u32) {
    let grid = (n.max(1) as u32 * CELL_PX).max(600);
    (grid + LABEL_AREA + COLORBAR_WIDTH + 60, grid + LABEL_AREA + 60)
}

/// Writes `<stem>.svg` and `<stem>.png` under `out_dir`.
pub fn render_heatmap(
    matrix: &IdentityMatrix,
    style: HeatmapStyle,
    out_dir: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>, RenderError> {
    let size = canvas_size(matrix.len());
    let mut written = Vec::with_capacity(CHART_FORMATS.len());
    for format in CHART_FORMATS {
        let path = out_dir.join(format!("{stem}.{}", format.extension()));
        ensure_parent(&path)?;
        match format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(&path, size).into_drawing_area();
                draw_heatmap(&root, matrix, style, size).map_err(draw_err)?;
                root.present().map_err(draw_err)?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(&path, size).into_drawing_area();
                draw_heatmap(&root, matrix, style, size).map_err(draw_err)?;
                root.present().map_err(draw_err)?;
            }
        }
        written.push(path);
    }
    Ok(written)
}

fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    matrix: &IdentityMatrix,
    style: HeatmapStyle,
    size: (u32, u32),
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let (grid_area, bar_area) = root.split_horizontally(size.0 - COLORBAR_WIDTH);

    let n = matrix.len();
    let extent = n.max(1) as f64;
    let mut chart = ChartBuilder::on(&grid_area)
        .margin(30)
        .x_label_area_size(LABEL_AREA)
        .y_label_area_size(LABEL_AREA)
        .build_cartesian_2d(0f64..extent, 0f64..extent)?;

    // Row 0 is drawn at the top.
    let top = |i: usize| (n - i) as f64;

    chart.draw_series((0..n).flat_map(|i| {
        (0..n).map(move |j| {
            let value = matrix.display_value(i, j);
            Rectangle::new(
                [(j as f64, top(i) - 1.0), (j as f64 + 1.0, top(i))],
                coolwarm(value, style.vmin, style.vmax).filled(),
            )
        })
    }))?;

    let annotation = (FONT, 20)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series((0..n).flat_map(|i| {
        let annotation = annotation.clone();
        (0..n).map(move |j| {
            Text::new(
                format!("{:.1}", matrix.display_value(i, j)),
                (j as f64 + 0.5, top(i) - 0.5),
                annotation.clone(),
            )
        })
    }))?;

    let row_label = (FONT, 20)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    let col_label = (FONT, 20)
        .into_font()
        .transform(FontTransform::Rotate90)
        .color(&BLACK);
    for (idx, id) in matrix.ids.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(0.0, top(idx) - 0.5));
        root.draw(&Text::new(id.clone(), (px - 10, py), row_label.clone()))?;
        let (px, py) = chart.backend_coord(&(idx as f64 + 0.5, 0.0));
        root.draw(&Text::new(id.clone(), (px + 10, py + 10), col_label.clone()))?;
    }

    draw_colorbar(&bar_area, style)
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    style: HeatmapStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let mut bar = ChartBuilder::on(area)
        .margin_top(60)
        .margin_bottom(LABEL_AREA as i32)
        .margin_right(20)
        .y_label_area_size(150)
        .build_cartesian_2d(0f64..1f64, style.vmin..style.vmax)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("Identity Percentage")
        .axis_desc_style((FONT, 22))
        .label_style((FONT, 20))
        .draw()?;

    let step = (style.vmax - style.vmin) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let lo = style.vmin + step * k as f64;
        Rectangle::new(
            [(0.0, lo), (1.0, lo + step)],
            coolwarm(lo + step / 2.0, style.vmin, style.vmax).filled(),
        )
    }))?;
    Ok(())
}
