use serde::Serialize;

use crate::model::expression::ExpressionTable;
use crate::model::tissue::TissueAssignment;

const WHISKER_IQR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Quartiles with linear interpolation; whiskers reach the furthest point
/// within 1.5 IQR of the box.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile_sorted(&sorted, 0.25);
    let median = quantile_sorted(&sorted, 0.5);
    let q3 = quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - WHISKER_IQR * iqr;
    let high_fence = q3 + WHISKER_IQR * iqr;

    let mut whisker_low = q1;
    let mut whisker_high = q3;
    let mut outliers = Vec::new();
    for &v in &sorted {
        if v < low_fence || v > high_fence {
            outliers.push(v);
            continue;
        }
        whisker_low = whisker_low.min(v);
        whisker_high = whisker_high.max(v);
    }

    Some(BoxStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    })
}

pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupLegend {
    pub label: String,
    pub n_samples: usize,
}

impl GroupLegend {
    pub fn legend_label(&self) -> String {
        format!("{} (n={})", self.label, self.n_samples)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxCell {
    pub gene_idx: usize,
    pub group_idx: usize,
    pub values: Vec<f64>,
    pub stats: Option<BoxStats>,
}

/// Long-form TPM values split by gene (category) and tissue group (hue).
#[derive(Debug, Clone, PartialEq)]
pub struct BoxplotData {
    pub genes: Vec<String>,
    pub groups: Vec<GroupLegend>,
    pub cells: Vec<BoxCell>,
}

impl BoxplotData {
    pub fn n_values(&self) -> usize {
        self.cells.iter().map(|c| c.values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.n_values() == 0
    }

    pub fn max_value(&self) -> f64 {
        self.cells
            .iter()
            .flat_map(|c| c.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

pub fn build_boxplot_data(table: &ExpressionTable, assignment: &TissueAssignment) -> BoxplotData {
    let group_columns: Vec<Vec<usize>> = assignment
        .groups
        .iter()
        .map(|group| {
            group
                .samples
                .iter()
                .filter_map(|s| table.samples.iter().position(|t| t == s))
                .collect()
        })
        .collect();

    let mut cells = Vec::with_capacity(table.n_genes() * group_columns.len());
    for gene_idx in 0..table.n_genes() {
        for (group_idx, columns) in group_columns.iter().enumerate() {
            let values: Vec<f64> = columns
                .iter()
                .map(|&col| table.value(gene_idx, col))
                .collect();
            let stats = box_stats(&values);
            cells.push(BoxCell {
                gene_idx,
                group_idx,
                values,
                stats,
            });
        }
    }

    let groups = assignment
        .groups
        .iter()
        .zip(&group_columns)
        .map(|(group, columns)| GroupLegend {
            label: group.label.clone(),
            n_samples: if table.is_empty() { 0 } else { columns.len() },
        })
        .collect();

    BoxplotData {
        genes: table.genes.clone(),
        groups,
        cells,
    }
}

/// Centre offset of each dodged group inside a gene slot, and the width of
/// one box.
pub fn dodge_offsets(n_groups: usize, box_width: f64) -> (Vec<f64>, f64) {
    if n_groups == 0 {
        return (Vec::new(), box_width);
    }
    let width = box_width / n_groups as f64;
    let offsets = (0..n_groups)
        .map(|i| -box_width / 2.0 + width * (i as f64 + 0.5))
        .collect();
    (offsets, width)
}

pub fn default_title(queried: bool) -> &'static str {
    if queried {
        "TPM Box Plot of Queried Genes"
    } else {
        "TPM Box Plot of Genes"
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/boxplot.rs"]
mod tests;
