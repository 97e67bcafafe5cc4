use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub mod coordinates;
pub mod json;
pub mod matrix;

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}
