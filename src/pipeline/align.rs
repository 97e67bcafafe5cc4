use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

pub const DEFAULT_ALIGNER: &str = "mafft";
pub const DEFAULT_ALIGN_PARAMS: &[&str] = &["--maxiterate", "1000", "--genafpair"];

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("could not run aligner `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("aligner `{program}` failed ({status}): {stderr}")]
    ExternalToolFailure {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns an unaligned FASTA file into an aligned one.
pub trait Aligner {
    fn align(&self, input: &Path, output: &Path) -> Result<(), AlignError>;
}

/// External multiple-sequence aligner that prints the alignment on stdout.
#[derive(Debug, Clone)]
pub struct CommandAligner {
    pub program: PathBuf,
    pub params: Vec<String>,
}

impl CommandAligner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            params: DEFAULT_ALIGN_PARAMS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Default for CommandAligner {
    fn default() -> Self {
        Self::new(DEFAULT_ALIGNER)
    }
}

impl Aligner for CommandAligner {
    fn align(&self, input: &Path, output: &Path) -> Result<(), AlignError> {
        let program = self.program.display().to_string();
        tracing::info!(
            "running {} {} {}",
            program,
            self.params.join(" "),
            input.display()
        );

        let result = Command::new(&self.program)
            .args(&self.params)
            .arg(input)
            .output()
            .map_err(|source| AlignError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(AlignError::ExternalToolFailure {
                program,
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, &result.stdout)?;
        tracing::info!("alignment written to {}", output.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/align.rs"]
mod tests;
