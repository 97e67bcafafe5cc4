use thiserror::Error;

use crate::input::fasta::FastaRecord;
use crate::model::identity::IdentityMatrix;

pub const GAP: u8 = b'-';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("sequence lengths differ: {left_len} vs {right_len}")]
    LengthMismatch { left_len: usize, right_len: usize },

    #[error("aligned sequences `{left}` ({left_len}) and `{right}` ({right_len}) differ in length")]
    AlignmentLengthMismatch {
        left: String,
        right: String,
        left_len: usize,
        right_len: usize,
    },

    #[error("sequence `{0}` is missing from the alignment")]
    MissingAlignedSequence(String),
}

/// Percent identity over positions where neither sequence has a gap.
///
/// Comparison is case-insensitive. A pair with no gap-free column scores 0.
pub fn percent_identity(seq_a: &str, seq_b: &str) -> Result<f64, IdentityError> {
    let (a, b) = (seq_a.as_bytes(), seq_b.as_bytes());
    if a.len() != b.len() {
        return Err(IdentityError::LengthMismatch {
            left_len: a.len(),
            right_len: b.len(),
        });
    }

    let mut aligned = 0usize;
    let mut matches = 0usize;
    for (&x, &y) in a.iter().zip(b) {
        if x == GAP || y == GAP {
            continue;
        }
        aligned += 1;
        if x.eq_ignore_ascii_case(&y) {
            matches += 1;
        }
    }

    if aligned == 0 {
        return Ok(0.0);
    }
    Ok(100.0 * matches as f64 / aligned as f64)
}

/// Identity for every unordered pair, computed once per pair.
///
/// All sequences must share one alignment length; a single mismatch aborts
/// the whole matrix.
pub fn identity_matrix(records: &[FastaRecord]) -> Result<IdentityMatrix, IdentityError> {
    if let Some(first) = records.first() {
        for other in &records[1..] {
            if other.sequence.len() != first.sequence.len() {
                return Err(IdentityError::AlignmentLengthMismatch {
                    left: first.id.clone(),
                    right: other.id.clone(),
                    left_len: first.sequence.len(),
                    right_len: other.sequence.len(),
                });
            }
        }
    }

    let ids = records.iter().map(|r| r.id.clone()).collect();
    IdentityMatrix::try_from_pairs(ids, |i, j| {
        percent_identity(&records[i].sequence, &records[j].sequence)
    })
}

/// Reorders aligned records to `order` (the unaligned input order) and
/// computes the matrix.
pub fn identity_matrix_in_order(
    order: &[String],
    aligned: &[FastaRecord],
) -> Result<IdentityMatrix, IdentityError> {
    let mut ordered = Vec::with_capacity(order.len());
    for id in order {
        let record = aligned
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| IdentityError::MissingAlignedSequence(id.clone()))?;
        ordered.push(record.clone());
    }
    identity_matrix(&ordered)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/identity.rs"]
mod tests;
