use std::fs;

use crate::config::{
    BoxplotConfig, COORDINATES_FILE, HEATMAP_STEM, IDENTITY_SUMMARY_FILE, IdentityConfig,
    MOTIF_PLOT_STEM, MotifPlotConfig, RUN_SUMMARY_FILE,
};
use crate::error::AppError;
use crate::input::expression::{filter_genes, load_expression_table};
use crate::input::fasta::load_fasta;
use crate::input::gene_list::load_gene_list;
use crate::input::motifs::{filter_by_tfbs, load_motif_table};
use crate::input::tissues::{
    assign_tissues, drop_unassigned, load_tissue_map, order_groups, single_group,
};
use crate::input::{decompress_to, is_gz};
use crate::model::identity::IdentityMatrix;
use crate::pipeline::align::{Aligner, CommandAligner};
use crate::pipeline::boxplot::{build_boxplot_data, default_title};
use crate::pipeline::identity::identity_matrix_in_order;
use crate::pipeline::motif_map::{group_tracks, layout_tracks};
use crate::render::boxplot::{BoxplotStyle, render_boxplot};
use crate::render::heatmap::{HeatmapStyle, render_heatmap};
use crate::render::motif::{MotifStyle, render_motif_plot};
use crate::report::coordinates::render_coordinates_tsv;
use crate::report::json::{RunSummary, write_summary_json};
use crate::report::matrix::{load_identity_summary, render_identity_summary};
use crate::report::write_text;

pub fn run_boxplot(config: &BoxplotConfig) -> Result<(), AppError> {
    let mut summary = RunSummary::new("boxplot");
    summary.input("table", &config.input);

    let table = load_expression_table(&config.input)?;
    summary.count("genes_in_table", table.n_genes());
    summary.count("samples_in_table", table.n_samples());

    let table = match &config.query {
        Some(path) => {
            summary.input("query", path);
            let query = load_gene_list(path)?;
            summary.count("query_genes", query.len());
            filter_genes(&table, &query)
        }
        None => table,
    };

    let assignment = match &config.tissue {
        Some(path) => {
            summary.input("tissue", path);
            let map = load_tissue_map(path)?;
            let assignment = assign_tissues(&table, &map);
            if config.drop_unassigned {
                let (assignment, dropped) = drop_unassigned(assignment);
                if dropped > 0 {
                    tracing::info!("Dropped {dropped} unmapped samples from plot.");
                }
                summary.count("dropped_samples", dropped);
                assignment
            } else {
                assignment
            }
        }
        None => single_group(&table),
    };
    let assignment = order_groups(assignment, &config.tissue_order);
    tracing::info!("tissue groups: {}", assignment.labels().join(", "));
    summary.count("grouped_samples", assignment.n_samples());

    let data = build_boxplot_data(&table, &assignment);
    summary.count("plotted_genes", data.genes.len());
    summary.count("plotted_values", data.n_values());
    if data.is_empty() {
        summary.warn("After filtering/unmapped removal, no data remains for plotting.");
    }

    let style = BoxplotStyle {
        title: config
            .title
            .clone()
            .unwrap_or_else(|| default_title(config.query.is_some()).to_string()),
        point_size: config.point_size,
        outlier_size: config.outlier_size,
        box_width: config.box_width,
        remove_outliers: config.remove_outliers,
    };
    render_boxplot(&data, &style, &config.output)?;
    tracing::info!("Box plot saved to {}", config.output.display());
    summary.output(&config.output);
    summary.groups = Some(data.groups);

    write_summary_json(&summary, &config.summary_path())?;
    Ok(())
}

pub fn run_motifs(config: &MotifPlotConfig) -> Result<(), AppError> {
    let mut summary = RunSummary::new("motifs");
    summary.input("table", &config.input);
    fs::create_dir_all(&config.output_dir)?;

    let hits = load_motif_table(&config.input)?;
    summary.count("hits_in_table", hits.len());
    let hits = filter_by_tfbs(hits, &config.tfbs);
    summary.count("hits_after_filter", hits.len());

    let tracks = group_tracks(hits, config.promoter_length);
    let layout = layout_tracks(&tracks);
    summary.count("genes", layout.tracks.len());
    summary.count("out_of_range_hits", layout.out_of_range_count());
    summary.count("promoter_scale_bp", layout.scale as usize);

    let coordinates_path = config.output_dir.join(COORDINATES_FILE);
    write_text(&coordinates_path, &render_coordinates_tsv(&layout))?;
    summary.output(&coordinates_path);

    if layout.hit_count() == 0 {
        summary.warn("No motifs found in input file.");
    } else {
        let written = render_motif_plot(
            &layout,
            MotifStyle {
                left_margin: config.left_margin,
            },
            &config.output_dir,
            MOTIF_PLOT_STEM,
        )?;
        for path in &written {
            tracing::info!("Plot saved to {}", path.display());
            summary.output(path);
        }
    }
    summary.motifs = Some(layout.legend);

    write_summary_json(&summary, &config.output_dir.join(RUN_SUMMARY_FILE))?;
    Ok(())
}

pub fn run_identity(config: &IdentityConfig) -> Result<(), AppError> {
    let aligner = CommandAligner::new(&config.aligner);
    run_identity_with(config, &aligner)
}

pub fn run_identity_with(config: &IdentityConfig, aligner: &dyn Aligner) -> Result<(), AppError> {
    let mut summary = RunSummary::new("identity");
    fs::create_dir_all(&config.out_dir)?;

    let matrix = if config.from_summary {
        summary.input("summary", &config.input);
        let matrix = load_identity_summary(&config.input)?;
        tracing::info!("redrawing heatmap from {}", config.input.display());
        matrix
    } else {
        let matrix = align_and_score(config, aligner, &mut summary)?;
        let summary_path = config.out_dir.join(IDENTITY_SUMMARY_FILE);
        write_text(&summary_path, &render_identity_summary(&matrix))?;
        summary.output(&summary_path);
        matrix
    };

    summary.count("sequences", matrix.len());
    summary.count("pairs", matrix.pairs().len());
    if matrix.is_empty() {
        summary.warn("No sequences found in input file.");
    } else {
        if matrix.pairs().is_empty() {
            summary.warn("Fewer than two sequences; the identity matrix has no pairs.");
        }
        let style = HeatmapStyle {
            vmin: config.vmin,
            vmax: config.vmax,
        };
        for path in render_heatmap(&matrix, style, &config.out_dir, HEATMAP_STEM)? {
            tracing::info!("Heatmap saved to {}", path.display());
            summary.output(&path);
        }
    }

    write_summary_json(&summary, &config.out_dir.join(RUN_SUMMARY_FILE))?;
    Ok(())
}

/// Empty input yields an empty matrix without running the aligner.
fn align_and_score(
    config: &IdentityConfig,
    aligner: &dyn Aligner,
    summary: &mut RunSummary,
) -> Result<IdentityMatrix, AppError> {
    summary.input("fasta", &config.input);
    let records = load_fasta(&config.input)?;
    if records.is_empty() {
        return Ok(IdentityMatrix::default());
    }
    let order: Vec<String> = records.into_iter().map(|r| r.id).collect();

    let aligned_path = match &config.aligned {
        Some(path) => {
            tracing::info!("using existing alignment {}", path.display());
            summary.input("alignment", path);
            path.clone()
        }
        None => {
            // The aligner reads plain FASTA only.
            let align_input = if is_gz(&config.input) {
                let plain = config.unpacked_input_path();
                decompress_to(&config.input, &plain)?;
                summary.output(&plain);
                plain
            } else {
                config.input.clone()
            };
            let path = config.alignment_path();
            aligner.align(&align_input, &path)?;
            summary.output(&path);
            path
        }
    };

    let aligned = load_fasta(&aligned_path)?;
    Ok(identity_matrix_in_order(&order, &aligned)?)
}

#[cfg(test)]
#[path = "../tests/src_inline/commands.rs"]
mod tests;
