use std::fs;
use std::path::Path;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

pub mod boxplot;
pub mod heatmap;
pub mod motif;
pub mod palette;

pub const FONT: &str = "sans-serif";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported output format `{0}` (use png or svg)")]
    UnsupportedFormat(String),

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(RenderError::UnsupportedFormat(ext)),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Formats written for the fixed-name charts (motif map, heatmap).
pub const CHART_FORMATS: [ImageFormat; 2] = [ImageFormat::Svg, ImageFormat::Png];

pub(crate) fn draw_err<E>(err: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Draw(err.to_string())
}

pub(crate) fn ensure_parent(path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/mod.rs"]
mod tests;
