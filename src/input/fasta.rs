use std::collections::HashSet;
use std::path::Path;

use crate::input::{InputError, data_lines, origin_name, read_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub sequence: String,
}

pub fn load_fasta(path: &Path) -> Result<Vec<FastaRecord>, InputError> {
    let text = read_text(path)?;
    parse_fasta(&text, &origin_name(path))
}

/// Records in file order, possibly none. Sequences are ASCII and
/// upper-cased; identifiers are the full header text after `>`.
pub fn parse_fasta(text: &str, origin: &str) -> Result<Vec<FastaRecord>, InputError> {
    let mut records: Vec<FastaRecord> = Vec::new();
    let mut seen = HashSet::new();

    for (line_no, line) in data_lines(text) {
        let line = line.trim();
        if let Some(header) = line.strip_prefix('>') {
            let id = header.trim();
            if id.is_empty() {
                return Err(InputError::parse(origin, line_no, "empty FASTA header"));
            }
            if !seen.insert(id.to_string()) {
                return Err(InputError::parse(
                    origin,
                    line_no,
                    format!("duplicate sequence identifier `{id}`"),
                ));
            }
            records.push(FastaRecord {
                id: id.to_string(),
                sequence: String::new(),
            });
        } else {
            let Some(current) = records.last_mut() else {
                return Err(InputError::parse(
                    origin,
                    line_no,
                    "sequence data before the first header",
                ));
            };
            if let Some(bad) = line.chars().find(|c| !c.is_ascii()) {
                return Err(InputError::parse(
                    origin,
                    line_no,
                    format!("non-ASCII residue `{bad}` in sequence `{}`", current.id),
                ));
            }
            current.sequence.extend(
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| c.to_ascii_uppercase()),
            );
        }
    }

    Ok(records)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/fasta.rs"]
mod tests;
