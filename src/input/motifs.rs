use std::path::Path;

use crate::input::{InputError, data_lines, origin_name, read_text};
use crate::model::motif::{MotifHit, Strand};

pub const COL_SEQUENCE_ID: &str = "Sequence ID";
pub const COL_TFBS_ID: &str = "TFBS ID";
pub const COL_TFBS_NAME: &str = "TFBS Name";
pub const COL_POSITION: &str = "Position";
pub const COL_STRAND: &str = "Strand";
pub const COL_SCORE: &str = "Similar Score";
pub const COL_BINDING_SEQUENCE: &str = "Binding sequence";
pub const COL_TF_FAMILY: &str = "TF family";
pub const COL_TF_ID: &str = "TF ID";

/// PlantPAN writes the position header misspelled.
const POSITION_ALIAS: &str = "Posistion";

struct ColumnIndex {
    sequence_id: usize,
    tfbs_id: usize,
    tfbs_name: usize,
    position: usize,
    strand: usize,
    score: usize,
    binding_sequence: usize,
    tf_family: usize,
    tf_id: usize,
    width: usize,
}

impl ColumnIndex {
    fn from_header(header: &[&str], origin: &str) -> Result<Self, InputError> {
        let find = |names: &[&str]| -> Result<usize, InputError> {
            header
                .iter()
                .position(|h| names.contains(h))
                .ok_or_else(|| InputError::MissingColumn {
                    origin: origin.to_string(),
                    column: names[0].to_string(),
                })
        };
        Ok(ColumnIndex {
            sequence_id: find(&[COL_SEQUENCE_ID])?,
            tfbs_id: find(&[COL_TFBS_ID])?,
            tfbs_name: find(&[COL_TFBS_NAME])?,
            position: find(&[COL_POSITION, POSITION_ALIAS])?,
            strand: find(&[COL_STRAND])?,
            score: find(&[COL_SCORE])?,
            binding_sequence: find(&[COL_BINDING_SEQUENCE])?,
            tf_family: find(&[COL_TF_FAMILY])?,
            tf_id: find(&[COL_TF_ID])?,
            width: header.len(),
        })
    }
}

pub fn load_motif_table(path: &Path) -> Result<Vec<MotifHit>, InputError> {
    let text = read_text(path)?;
    parse_motif_table(&text, &origin_name(path))
}

/// Parses every row of a PlantPAN result table, in input order.
pub fn parse_motif_table(text: &str, origin: &str) -> Result<Vec<MotifHit>, InputError> {
    let mut lines = data_lines(text);
    let Some((_, header)) = lines.next() else {
        return Err(InputError::parse(origin, 1, "motif table is empty"));
    };
    let header_cols: Vec<&str> = header.split('\t').map(str::trim).collect();
    let cols = ColumnIndex::from_header(&header_cols, origin)?;

    let mut hits = Vec::new();
    for (line_no, line) in lines {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        if fields.len() != cols.width {
            return Err(InputError::parse(
                origin,
                line_no,
                format!("expected {} columns, found {}", cols.width, fields.len()),
            ));
        }

        let gene_id = fields[cols.sequence_id];
        if gene_id.is_empty() {
            return Err(InputError::parse(origin, line_no, "empty Sequence ID"));
        }
        let motif_id = fields[cols.tfbs_id];
        if motif_id.is_empty() {
            return Err(InputError::parse(origin, line_no, "empty TFBS ID"));
        }

        let raw_position = fields[cols.position];
        let position: u32 = raw_position.parse().map_err(|_| {
            InputError::parse(
                origin,
                line_no,
                format!("invalid position `{raw_position}`"),
            )
        })?;

        let raw_strand = fields[cols.strand];
        let strand = Strand::parse(raw_strand).ok_or_else(|| {
            InputError::parse(origin, line_no, format!("invalid strand `{raw_strand}`"))
        })?;

        let raw_score = fields[cols.score];
        let score: f64 = raw_score.parse().map_err(|_| {
            InputError::parse(origin, line_no, format!("invalid score `{raw_score}`"))
        })?;

        let tf_family = clean_optional(fields[cols.tf_family]);
        let display_name = display_name(fields[cols.tfbs_name], motif_id, tf_family);

        hits.push(MotifHit {
            gene_id: gene_id.to_string(),
            motif_id: motif_id.to_string(),
            display_name,
            position,
            strand,
            matched_sequence: fields[cols.binding_sequence].to_string(),
            score,
            tf_family: tf_family.unwrap_or_default().to_string(),
            tf_id: clean_optional(fields[cols.tf_id])
                .unwrap_or_default()
                .to_string(),
        });
    }

    tracing::debug!(hits = hits.len(), "parsed motif table {origin}");
    Ok(hits)
}

fn clean_optional(raw: &str) -> Option<&str> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(value)
    }
}

fn display_name(raw_name: &str, motif_id: &str, tf_family: Option<&str>) -> String {
    match (clean_optional(raw_name), tf_family) {
        (Some(name), _) => name.to_string(),
        (None, Some(family)) => format!("{motif_id} ({family})"),
        (None, None) => motif_id.to_string(),
    }
}

/// Keeps hits whose TFBS ID is listed; an empty list keeps everything.
pub fn filter_by_tfbs(hits: Vec<MotifHit>, tfbs_ids: &[String]) -> Vec<MotifHit> {
    if tfbs_ids.is_empty() {
        return hits;
    }
    hits.into_iter()
        .filter(|hit| tfbs_ids.iter().any(|id| id == &hit.motif_id))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/motifs.rs"]
mod tests;
