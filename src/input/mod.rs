use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod expression;
pub mod fasta;
pub mod gene_list;
pub mod motifs;
pub mod tissues;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{origin}: missing required column `{column}`")]
    MissingColumn { origin: String, column: String },

    #[error("{origin} line {line}: {message}")]
    Parse {
        origin: String,
        line: usize,
        message: String,
    },
}

impl InputError {
    pub fn parse(origin: &str, line: usize, message: impl Into<String>) -> Self {
        InputError::Parse {
            origin: origin.to_string(),
            line,
            message: message.into(),
        }
    }
}

pub fn is_gz(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if is_gz(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Whole file as text. Bytes that are not UTF-8 are a parse error on the
/// line where they occur.
pub fn read_text(path: &Path) -> Result<String, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|err| {
        let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        InputError::parse(&origin_name(path), line, "invalid UTF-8")
    })
}

/// Writes the decompressed contents of `src` to `dest`.
pub fn decompress_to(src: &Path, dest: &Path) -> Result<(), InputError> {
    let mut reader = open_maybe_gz(src)?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(dest)?);
    io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Non-blank lines with their 1-based line numbers, line endings stripped.
pub fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
}

pub fn origin_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
