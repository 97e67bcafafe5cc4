use std::collections::HashSet;
use std::path::Path;

use crate::input::{InputError, data_lines, origin_name, read_text};
use crate::model::expression::ExpressionTable;

const DEFAULT_GENE_COLUMN: &str = "Gene";

pub fn load_expression_table(path: &Path) -> Result<ExpressionTable, InputError> {
    let text = read_text(path)?;
    parse_expression_table(&text, &origin_name(path))
}

/// Parses a TPM table: header row of sample names, first column gene names.
/// Any malformed row fails the whole table.
pub fn parse_expression_table(text: &str, origin: &str) -> Result<ExpressionTable, InputError> {
    let mut lines = data_lines(text);
    let Some((header_no, header)) = lines.next() else {
        return Err(InputError::parse(origin, 1, "expression table is empty"));
    };

    let header_cols: Vec<&str> = header.split('\t').map(str::trim).collect();
    if header_cols.len() < 2 {
        return Err(InputError::parse(
            origin,
            header_no,
            "table must have at least 2 columns: gene + at least one sample",
        ));
    }

    let gene_column = if header_cols[0].is_empty() {
        DEFAULT_GENE_COLUMN.to_string()
    } else {
        header_cols[0].to_string()
    };

    let mut samples = Vec::with_capacity(header_cols.len() - 1);
    let mut seen_samples = HashSet::new();
    for name in &header_cols[1..] {
        if name.is_empty() {
            return Err(InputError::parse(origin, header_no, "empty sample name in header"));
        }
        if !seen_samples.insert(*name) {
            return Err(InputError::parse(
                origin,
                header_no,
                format!("duplicate sample `{name}` in header"),
            ));
        }
        samples.push(name.to_string());
    }

    let mut genes = Vec::new();
    let mut values = Vec::new();
    let mut seen_genes = HashSet::new();

    for (line_no, line) in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != header_cols.len() {
            return Err(InputError::parse(
                origin,
                line_no,
                format!(
                    "expected {} columns, found {}",
                    header_cols.len(),
                    fields.len()
                ),
            ));
        }
        let gene = fields[0].trim();
        if gene.is_empty() {
            return Err(InputError::parse(origin, line_no, "empty gene identifier"));
        }
        if !seen_genes.insert(gene.to_string()) {
            return Err(InputError::parse(
                origin,
                line_no,
                format!("duplicate gene `{gene}`"),
            ));
        }

        let mut row = Vec::with_capacity(samples.len());
        for (idx, raw) in fields[1..].iter().enumerate() {
            let value = parse_tpm(raw).ok_or_else(|| {
                InputError::parse(
                    origin,
                    line_no,
                    format!(
                        "invalid TPM value `{}` for sample `{}`",
                        raw.trim(),
                        samples[idx]
                    ),
                )
            })?;
            row.push(value);
        }
        genes.push(gene.to_string());
        values.push(row);
    }

    tracing::debug!(
        genes = genes.len(),
        samples = samples.len(),
        "loaded expression table {origin}"
    );

    Ok(ExpressionTable {
        gene_column,
        samples,
        genes,
        values,
    })
}

fn parse_tpm(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Keeps the rows named in `query`, in query order. Unknown genes are skipped.
pub fn filter_genes(table: &ExpressionTable, query: &[String]) -> ExpressionTable {
    let mut genes = Vec::new();
    let mut values = Vec::new();
    let mut missing = 0usize;

    for gene in query {
        if genes.contains(gene) {
            continue;
        }
        match table.gene_index(gene) {
            Some(idx) => {
                genes.push(gene.clone());
                values.push(table.values[idx].clone());
            }
            None => {
                missing += 1;
                tracing::debug!("query gene {gene} not present in expression table");
            }
        }
    }

    tracing::info!(
        "Filtered genes from {} to {} based on query file.",
        table.n_genes(),
        genes.len()
    );
    if missing > 0 {
        tracing::warn!("{missing} query gene(s) not found in the expression table");
    }

    ExpressionTable {
        gene_column: table.gene_column.clone(),
        samples: table.samples.clone(),
        genes,
        values,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/expression.rs"]
mod tests;
