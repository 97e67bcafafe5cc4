use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::pipeline::boxplot::{BoxplotData, dodge_offsets};
use crate::render::palette::set2;
use crate::render::{FONT, ImageFormat, RenderError, draw_err, ensure_parent};

const SIZE: (u32, u32) = (1600, 1200);

#[derive(Debug, Clone)]
pub struct BoxplotStyle {
    pub title: String,
    pub point_size: f64,
    pub outlier_size: f64,
    pub box_width: f64,
    /// Hides both outlier markers and the strip points.
    pub remove_outliers: bool,
}

pub fn render_boxplot(
    data: &BoxplotData,
    style: &BoxplotStyle,
    path: &Path,
) -> Result<(), RenderError> {
    let format = ImageFormat::from_path(path)?;
    ensure_parent(path)?;
    match format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, SIZE).into_drawing_area();
            draw_boxplot(&root, data, style).map_err(draw_err)?;
            root.present().map_err(draw_err)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, SIZE).into_drawing_area();
            draw_boxplot(&root, data, style).map_err(draw_err)?;
            root.present().map_err(draw_err)?;
        }
    }
    Ok(())
}

fn draw_boxplot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &BoxplotData,
    style: &BoxplotStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let n_genes = data.genes.len().max(1);
    let y_max = match data.max_value() {
        v if v > 0.0 => v * 1.05,
        _ => 1.0,
    };

    let mut chart = ChartBuilder::on(root)
        .caption(&style.title, (FONT, 40))
        .margin(30)
        .x_label_area_size(220)
        .y_label_area_size(100)
        .build_cartesian_2d(-0.5f64..(n_genes as f64 - 0.5), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc("TPM")
        .axis_desc_style((FONT, 28))
        .label_style((FONT, 22))
        .draw()?;

    let (offsets, width) = dodge_offsets(data.groups.len(), style.box_width);
    let half = width * 0.45;

    for (group_idx, group) in data.groups.iter().enumerate() {
        let color = set2(group_idx);
        let offset = offsets[group_idx];
        let boxed: Vec<_> = data
            .cells
            .iter()
            .filter(|c| c.group_idx == group_idx)
            .filter_map(|c| c.stats.as_ref().map(|s| (c.gene_idx as f64 + offset, s)))
            .collect();

        chart
            .draw_series(boxed.iter().map(|&(x, s)| {
                Rectangle::new([(x - half, s.q1), (x + half, s.q3)], color.filled())
            }))?
            .label(group.legend_label())
            .legend(move |(x, y)| Rectangle::new([(x, y - 8), (x + 16, y + 8)], color.filled()));

        chart.draw_series(boxed.iter().map(|&(x, s)| {
            Rectangle::new([(x - half, s.q1), (x + half, s.q3)], BLACK.stroke_width(2))
        }))?;
        chart.draw_series(boxed.iter().map(|&(x, s)| {
            PathElement::new(vec![(x - half, s.median), (x + half, s.median)], BLACK.stroke_width(3))
        }))?;
        chart.draw_series(boxed.iter().flat_map(|&(x, s)| {
            let cap = half * 0.5;
            [
                PathElement::new(vec![(x, s.q3), (x, s.whisker_high)], BLACK.stroke_width(2)),
                PathElement::new(vec![(x, s.q1), (x, s.whisker_low)], BLACK.stroke_width(2)),
                PathElement::new(
                    vec![(x - cap, s.whisker_high), (x + cap, s.whisker_high)],
                    BLACK.stroke_width(2),
                ),
                PathElement::new(
                    vec![(x - cap, s.whisker_low), (x + cap, s.whisker_low)],
                    BLACK.stroke_width(2),
                ),
            ]
        }))?;

        if style.remove_outliers {
            continue;
        }

        let outlier_radius = style.outlier_size.round().max(1.0) as i32;
        chart.draw_series(boxed.iter().flat_map(|&(x, s)| {
            s.outliers
                .iter()
                .map(move |&v| Circle::new((x, v), outlier_radius, BLACK.stroke_width(1)))
        }))?;

        let point_radius = style.point_size.round().max(1.0) as i32;
        let points: Vec<(f64, f64)> = data
            .cells
            .iter()
            .filter(|c| c.group_idx == group_idx)
            .flat_map(|c| {
                let x = c.gene_idx as f64 + offset;
                let n = c.values.len() as f64;
                c.values.iter().enumerate().map(move |(i, &v)| {
                    let spread = ((i as f64 + 0.5) / n - 0.5) * half * 1.2;
                    (x + spread, v)
                })
            })
            .collect();
        chart.draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, point_radius, color.mix(0.5).filled())),
        )?;
        chart.draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, point_radius, RGBColor(128, 128, 128).stroke_width(1))),
        )?;
    }

    if !data.groups.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.85))
            .border_style(&BLACK)
            .label_font((FONT, 22).into_font())
            .draw()?;
    }

    let label_style = (FONT, 22)
        .into_font()
        .transform(FontTransform::Rotate90)
        .color(&BLACK);
    for (idx, gene) in data.genes.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(idx as f64, 0.0));
        root.draw(&Text::new(gene.clone(), (px + 11, py + 12), label_style.clone()))?;
    }

    Ok(())
}
