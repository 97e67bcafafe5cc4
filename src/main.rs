mod commands;
mod config;
mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod render;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{BoxplotConfig, IdentityConfig, MotifPlotConfig, parse_order_list};
use crate::error::AppError;
use crate::pipeline::align::DEFAULT_ALIGNER;

#[derive(Debug, Parser)]
#[command(
    name = "phytoplot",
    version,
    about = "Expression boxplots, promoter motif maps and pairwise identity heatmaps"
)]
struct Cli {
    /// Only log warnings and errors (RUST_LOG overrides)
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Box plot of TPM values per gene, optionally grouped by tissue
    Boxplot(BoxplotArgs),
    /// Plot PlantPAN motif hits along promoter regions
    Motifs(MotifArgs),
    /// Align sequences and build a pairwise percent-identity heatmap
    Identity(IdentityArgs),
}

#[derive(Debug, Args)]
struct BoxplotArgs {
    /// TPM table (TSV): first column gene, remaining columns samples
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Genes of interest, one per line; sets the plotting order
    #[arg(short = 'q', long)]
    query: Option<PathBuf>,

    /// Tissue map: tissue<TAB>sample1,sample2,...
    #[arg(short = 't', long)]
    tissue: Option<PathBuf>,

    /// Comma-separated tissue order, e.g. 'Leaf,Stem,Root'
    #[arg(long, alias = "tissue_order")]
    tissue_order: Option<String>,

    /// Custom plot title
    #[arg(long)]
    title: Option<String>,

    /// Size of the strip-plot points
    #[arg(long, alias = "point_size", default_value_t = 5.0)]
    point_size: f64,

    /// Size of the outlier markers
    #[arg(long, alias = "outlier_size", default_value_t = 5.0)]
    outlier_size: f64,

    /// Hide outliers and the individual data points
    #[arg(long, alias = "remove_outliers")]
    remove_outliers: bool,

    /// Width of each gene's box group; smaller means more spacing
    #[arg(long, alias = "box_width", default_value_t = 0.6)]
    box_width: f64,

    /// Exclude samples missing from the tissue map instead of plotting them as Unassigned
    #[arg(long)]
    drop_unassigned: bool,

    /// Output image (.png or .svg)
    #[arg(short = 'o', long, default_value = "boxplot.png")]
    output: PathBuf,
}

impl BoxplotArgs {
    fn into_config(self) -> Result<BoxplotConfig, AppError> {
        let config = BoxplotConfig {
            input: self.input,
            query: self.query,
            tissue: self.tissue,
            tissue_order: self
                .tissue_order
                .as_deref()
                .map(parse_order_list)
                .unwrap_or_default(),
            title: self.title,
            point_size: self.point_size,
            outlier_size: self.outlier_size,
            remove_outliers: self.remove_outliers,
            box_width: self.box_width,
            drop_unassigned: self.drop_unassigned,
            output: self.output,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Args)]
struct MotifArgs {
    /// PlantPAN result file (TSV)
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output folder for plots and tables
    #[arg(short = 'o', long, alias = "output_dir", default_value = "motif_plots")]
    output_dir: PathBuf,

    /// One or more TFBS IDs to include (default: all)
    #[arg(short = 't', long, num_args = 1..)]
    tfbs: Vec<String>,

    /// Promoter length in bp applied to every gene (default: furthest hit per gene)
    #[arg(long)]
    promoter_length: Option<u32>,

    /// Extra bp drawn at the distal end of each promoter box
    #[arg(long, default_value_t = 20)]
    left_margin: u32,
}

impl MotifArgs {
    fn into_config(self) -> Result<MotifPlotConfig, AppError> {
        let config = MotifPlotConfig {
            input: self.input,
            output_dir: self.output_dir,
            tfbs: self.tfbs,
            promoter_length: self.promoter_length,
            left_margin: self.left_margin,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Args)]
struct IdentityArgs {
    /// Input FASTA (or summary.txt with --from-summary)
    #[arg(long = "in")]
    input: PathBuf,

    /// Output folder (created if missing)
    #[arg(long = "out")]
    out_dir: PathBuf,

    /// Multiple-sequence aligner executable
    #[arg(long, default_value = DEFAULT_ALIGNER)]
    aligner: PathBuf,

    /// Use an existing aligned FASTA instead of running the aligner
    #[arg(long)]
    aligned: Option<PathBuf>,

    /// Treat --in as an existing summary.txt and only redraw the heatmap
    #[arg(long, conflicts_with = "aligned")]
    from_summary: bool,

    /// Lower end of the heatmap colour range
    #[arg(long, default_value_t = 60.0)]
    vmin: f64,

    /// Upper end of the heatmap colour range
    #[arg(long, default_value_t = 100.0)]
    vmax: f64,
}

impl IdentityArgs {
    fn into_config(self) -> Result<IdentityConfig, AppError> {
        let config = IdentityConfig {
            input: self.input,
            out_dir: self.out_dir,
            aligner: self.aligner,
            aligned: self.aligned,
            from_summary: self.from_summary,
            vmin: self.vmin,
            vmax: self.vmax,
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.quiet);
    if let Err(err) = run(cli.command) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Boxplot(args) => commands::run_boxplot(&args.into_config()?),
        Command::Motifs(args) => commands::run_motifs(&args.into_config()?),
        Command::Identity(args) => commands::run_identity(&args.into_config()?),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
