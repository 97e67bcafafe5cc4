use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::pipeline::motif_map::{MotifLayout, TrackLayout};
use crate::render::palette::{LIGHT_GREY, tab20_spread};
use crate::render::{CHART_FORMATS, FONT, ImageFormat, RenderError, draw_err, ensure_parent};

const WIDTH: u32 = 2000;
const ROW_PX: u32 = 110;
const LEGEND_ROW_PX: u32 = 36;
const BOX_HALF_HEIGHT: f64 = 0.3;
const CLAMP_MARK_PX: i32 = 9;

pub const TITLE: &str = "Motif Distribution Across Promoter Regions";

#[derive(Debug, Clone, Copy)]
pub struct MotifStyle {
    /// Extra bp of promoter box drawn past the furthest hit.
    pub left_margin: u32,
}

/// Where a hit is drawn on its promoter box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitMark {
    pub x: f64,
    pub color_index: usize,
    /// The hit lies past the declared length and is pinned to the box end.
    pub clamped: bool,
}

/// Boxes span `[-length - margin, 0]`; hits sit at `normalized * length`
/// from the distal end.
pub fn hit_marks(track: &TrackLayout, left_margin: u32) -> Vec<HitMark> {
    let length = f64::from(track.length);
    let start = -length - f64::from(left_margin);
    track
        .hits
        .iter()
        .map(|laid| HitMark {
            x: start + laid.mapped.normalized * length,
            color_index: laid.color_index,
            clamped: laid.mapped.out_of_range,
        })
        .collect()
}

fn canvas_size(layout: &MotifLayout) -> (u32, u32, u32) {
    let chart_h = (layout.tracks.len() as u32 * ROW_PX + 260).max(720);
    let legend_rows = layout.legend.len().div_ceil(2) as u32;
    let legend_h = legend_rows * LEGEND_ROW_PX + 60;
    (WIDTH, chart_h + legend_h, chart_h)
}

/// Writes `<stem>.svg` and `<stem>.png` under `out_dir`.
pub fn render_motif_plot(
    layout: &MotifLayout,
    style: MotifStyle,
    out_dir: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>, RenderError> {
    let (w, h, chart_h) = canvas_size(layout);
    let mut written = Vec::with_capacity(CHART_FORMATS.len());
    for format in CHART_FORMATS {
        let path = out_dir.join(format!("{stem}.{}", format.extension()));
        ensure_parent(&path)?;
        match format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(&path, (w, h)).into_drawing_area();
                draw_motifs(&root, layout, style, chart_h).map_err(draw_err)?;
                root.present().map_err(draw_err)?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(&path, (w, h)).into_drawing_area();
                draw_motifs(&root, layout, style, chart_h).map_err(draw_err)?;
                root.present().map_err(draw_err)?;
            }
        }
        written.push(path);
    }
    Ok(written)
}

fn draw_motifs<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &MotifLayout,
    style: MotifStyle,
    chart_h: u32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let (chart_area, legend_area) = root.split_vertically(chart_h);

    let margin = f64::from(style.left_margin);
    let scale = f64::from(layout.scale);
    let n = layout.tracks.len().max(1);

    let mut chart = ChartBuilder::on(&chart_area)
        .caption(TITLE, (FONT, 36))
        .margin(30)
        .x_label_area_size(80)
        .y_label_area_size(260)
        .build_cartesian_2d(-(scale + margin)..margin, 0.5f64..(n as f64 + 0.5))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_label_formatter(&|_| String::new())
        .x_desc("Position (bp)")
        .y_desc("Genes")
        .axis_desc_style((FONT, 28))
        .label_style((FONT, 22))
        .draw()?;

    let n_colors = layout.legend.len();
    for (row, track) in layout.tracks.iter().enumerate() {
        let y = (row + 1) as f64;
        let length = f64::from(track.length);
        let start = -length - margin;

        chart.draw_series(std::iter::once(Rectangle::new(
            [(start, y - BOX_HALF_HEIGHT), (0.0, y + BOX_HALF_HEIGHT)],
            LIGHT_GREY.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(start, y - BOX_HALF_HEIGHT), (0.0, y + BOX_HALF_HEIGHT)],
            BLACK.stroke_width(1),
        )))?;

        let marks = hit_marks(track, style.left_margin);
        chart.draw_series(marks.iter().map(|mark| {
            let color = tab20_spread(mark.color_index, n_colors);
            PathElement::new(
                vec![(mark.x, y - BOX_HALF_HEIGHT), (mark.x, y + BOX_HALF_HEIGHT)],
                color.stroke_width(4),
            )
        }))?;
        chart.draw_series(marks.iter().filter(|mark| mark.clamped).map(|mark| {
            Cross::new(
                (mark.x, y + BOX_HALF_HEIGHT + 0.1),
                CLAMP_MARK_PX,
                BLACK.stroke_width(2),
            )
        }))?;
    }

    let gene_label = (FONT, 22)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (row, track) in layout.tracks.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(-(scale + margin), (row + 1) as f64));
        root.draw(&Text::new(track.gene_id.clone(), (px - 12, py), gene_label.clone()))?;
    }

    let entry_font = (FONT, 20).into_font().color(&BLACK);
    let column_width = (WIDTH / 2) as i32;
    for (idx, entry) in layout.legend.iter().enumerate() {
        let color = tab20_spread(idx, n_colors);
        let col = (idx % 2) as i32;
        let row = (idx / 2) as i32;
        let x = 80 + col * column_width;
        let y = 30 + row * LEGEND_ROW_PX as i32;
        legend_area.draw(&Rectangle::new([(x, y + 6), (x + 40, y + 14)], color.filled()))?;
        legend_area.draw(&Text::new(entry.label(), (x + 52, y), entry_font.clone()))?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/motif.rs"]
mod tests;
