use std::path::Path;

use crate::input::{InputError, data_lines, origin_name, read_text};
use crate::model::expression::ExpressionTable;
use crate::model::tissue::{
    TissueAssignment, TissueGroup, TissueMap, UNASSIGNED_LABEL, UNGROUPED_LABEL,
};

pub fn load_tissue_map(path: &Path) -> Result<TissueMap, InputError> {
    let text = read_text(path)?;
    parse_tissue_map(&text, &origin_name(path))
}

/// `tissue<TAB>sample1,sample2,...`, one tissue per line.
pub fn parse_tissue_map(text: &str, origin: &str) -> Result<TissueMap, InputError> {
    let mut entries: Vec<(String, Vec<String>)> = Vec::new();

    for (line_no, line) in data_lines(text) {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 2 {
            return Err(InputError::parse(
                origin,
                line_no,
                format!("expected 2 tab-separated columns, found {}", fields.len()),
            ));
        }
        let tissue = fields[0].trim();
        if tissue.is_empty() {
            return Err(InputError::parse(origin, line_no, "empty tissue label"));
        }

        let mut samples = Vec::new();
        for sample in fields[1].split(',').map(str::trim) {
            if sample.is_empty() {
                continue;
            }
            if let Some((other, _)) = entries
                .iter()
                .find(|(t, listed)| t != tissue && listed.iter().any(|s| s == sample))
            {
                return Err(InputError::parse(
                    origin,
                    line_no,
                    format!("sample `{sample}` already assigned to tissue `{other}`"),
                ));
            }
            let repeated = samples.iter().any(|s| s == sample)
                || entries
                    .iter()
                    .any(|(t, listed)| t == tissue && listed.iter().any(|s| s == sample));
            if !repeated {
                samples.push(sample.to_string());
            }
        }

        match entries.iter_mut().find(|(t, _)| t == tissue) {
            Some((_, listed)) => listed.extend(samples),
            None => entries.push((tissue.to_string(), samples)),
        }
    }

    Ok(TissueMap { entries })
}

/// Groups the table's samples by tissue. Samples absent from the map fall
/// into `Unassigned`. Groups appear in first-seen order over the sample
/// columns.
pub fn assign_tissues(table: &ExpressionTable, map: &TissueMap) -> TissueAssignment {
    let mut groups: Vec<TissueGroup> = Vec::new();
    for sample in &table.samples {
        let label = map.tissue_of(sample).unwrap_or(UNASSIGNED_LABEL);
        push_sample(&mut groups, label, sample);
    }

    let mapped_absent = map
        .entries
        .iter()
        .flat_map(|(_, samples)| samples.iter())
        .filter(|s| !table.samples.contains(s))
        .count();
    if mapped_absent > 0 {
        tracing::debug!("{mapped_absent} mapped sample(s) not present in the expression table");
    }

    TissueAssignment { groups }
}

/// Every sample in one `NA` group, used when no tissue map is given.
pub fn single_group(table: &ExpressionTable) -> TissueAssignment {
    let mut groups = Vec::new();
    for sample in &table.samples {
        push_sample(&mut groups, UNGROUPED_LABEL, sample);
    }
    TissueAssignment { groups }
}

fn push_sample(groups: &mut Vec<TissueGroup>, label: &str, sample: &str) {
    match groups.iter_mut().find(|g| g.label == label) {
        Some(group) => group.samples.push(sample.to_string()),
        None => groups.push(TissueGroup {
            label: label.to_string(),
            samples: vec![sample.to_string()],
        }),
    }
}

/// Puts the listed groups first, in list order; the rest keep their order.
pub fn order_groups(assignment: TissueAssignment, order: &[String]) -> TissueAssignment {
    let mut remaining = assignment.groups;
    let mut groups = Vec::with_capacity(remaining.len());

    for label in order {
        if let Some(pos) = remaining.iter().position(|g| &g.label == label) {
            groups.push(remaining.remove(pos));
        } else if !groups.iter().any(|g: &TissueGroup| &g.label == label) {
            tracing::warn!("tissue `{label}` from --tissue-order has no samples");
        }
    }
    groups.extend(remaining);

    TissueAssignment { groups }
}

/// Removes the `Unassigned` group, returning how many samples it held.
pub fn drop_unassigned(assignment: TissueAssignment) -> (TissueAssignment, usize) {
    let mut dropped = 0usize;
    let groups = assignment
        .groups
        .into_iter()
        .filter(|g| {
            if g.label == UNASSIGNED_LABEL {
                dropped += g.samples.len();
                false
            } else {
                true
            }
        })
        .collect();
    (TissueAssignment { groups }, dropped)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tissues.rs"]
mod tests;
