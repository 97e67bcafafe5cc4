use std::path::PathBuf;

use crate::error::AppError;
use crate::render::ImageFormat;

pub const ALIGNMENT_FILE: &str = "all_sequences.aln.fasta";
pub const UNPACKED_INPUT_FILE: &str = "all_sequences.fasta";
pub const IDENTITY_SUMMARY_FILE: &str = "summary.txt";
pub const HEATMAP_STEM: &str = "heatmap";
pub const MOTIF_PLOT_STEM: &str = "motif_plot";
pub const COORDINATES_FILE: &str = "motif_coordinates.tsv";
pub const RUN_SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Clone)]
pub struct BoxplotConfig {
    pub input: PathBuf,
    pub query: Option<PathBuf>,
    pub tissue: Option<PathBuf>,
    pub tissue_order: Vec<String>,
    pub title: Option<String>,
    pub point_size: f64,
    pub outlier_size: f64,
    pub remove_outliers: bool,
    pub box_width: f64,
    pub drop_unassigned: bool,
    pub output: PathBuf,
}

impl BoxplotConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        require_positive("--point-size", self.point_size)?;
        require_positive("--outlier-size", self.outlier_size)?;
        require_positive("--box-width", self.box_width)?;
        if self.box_width > 1.0 {
            return Err(AppError::InvalidConfig(format!(
                "--box-width must be at most 1.0, got {}",
                self.box_width
            )));
        }
        ImageFormat::from_path(&self.output)
            .map_err(|e| AppError::InvalidConfig(format!("--output: {e}")))?;
        Ok(())
    }

    /// `boxplot.png` -> `boxplot.summary.json`
    pub fn summary_path(&self) -> PathBuf {
        self.output.with_extension(RUN_SUMMARY_FILE)
    }
}

#[derive(Debug, Clone)]
pub struct MotifPlotConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub tfbs: Vec<String>,
    pub promoter_length: Option<u32>,
    pub left_margin: u32,
}

impl MotifPlotConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.promoter_length == Some(0) {
            return Err(AppError::InvalidConfig(
                "--promoter-length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub aligner: PathBuf,
    pub aligned: Option<PathBuf>,
    /// `input` is a previously written `summary.txt`; only the heatmap is redrawn.
    pub from_summary: bool,
    pub vmin: f64,
    pub vmax: f64,
}

impl IdentityConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.vmin.is_finite() || !self.vmax.is_finite() || self.vmin >= self.vmax {
            return Err(AppError::InvalidConfig(format!(
                "--vmin ({}) must be below --vmax ({})",
                self.vmin, self.vmax
            )));
        }
        Ok(())
    }

    pub fn alignment_path(&self) -> PathBuf {
        self.out_dir.join(ALIGNMENT_FILE)
    }

    /// Plain copy of a gzipped `--in`, handed to the aligner.
    pub fn unpacked_input_path(&self) -> PathBuf {
        self.out_dir.join(UNPACKED_INPUT_FILE)
    }
}

fn require_positive(flag: &str, value: f64) -> Result<(), AppError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AppError::InvalidConfig(format!(
            "{flag} must be a positive number, got {value}"
        )))
    }
}

/// `Leaf, Stem,Root` -> `["Leaf", "Stem", "Root"]`
pub fn parse_order_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
