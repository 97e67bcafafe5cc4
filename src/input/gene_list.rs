use std::collections::HashSet;
use std::path::Path;

use crate::input::{InputError, data_lines, read_text};

pub fn load_gene_list(path: &Path) -> Result<Vec<String>, InputError> {
    let text = read_text(path)?;
    Ok(parse_gene_list(&text))
}

/// One identifier per line; repeated identifiers keep their first position.
pub fn parse_gene_list(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    data_lines(text)
        .map(|(_, line)| line.trim())
        .filter(|gene| seen.insert(gene.to_string()))
        .map(str::to_string)
        .collect()
}
