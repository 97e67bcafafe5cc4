use super::*;

fn record(id: &str, sequence: &str) -> FastaRecord {
    FastaRecord {
        id: id.to_string(),
        sequence: sequence.to_string(),
    }
}

#[test]
fn test_gap_columns_are_excluded() {
    // 4 gap-free columns, 3 matches.
    let value = percent_identity("AC-GT", "ACTGA").unwrap();
    assert!((value - 75.0).abs() < 1e-12);
}

#[test]
fn test_trailing_shared_gap() {
    assert_eq!(percent_identity("ACGT-", "ACGA-").unwrap(), 75.0);
}

#[test]
fn test_identity_is_symmetric_and_self_is_100() {
    let (a, b) = ("ATG-CCA", "ATGACGA");
    assert_eq!(percent_identity(a, b).unwrap(), percent_identity(b, a).unwrap());
    assert_eq!(percent_identity(a, a).unwrap(), 100.0);
}

#[test]
fn test_case_insensitive() {
    assert_eq!(percent_identity("acgt", "ACGT").unwrap(), 100.0);
}

#[test]
fn test_no_shared_columns_scores_zero() {
    assert_eq!(percent_identity("--AC", "GT--").unwrap(), 0.0);
    assert_eq!(percent_identity("", "").unwrap(), 0.0);
}

#[test]
fn test_length_mismatch_fails() {
    assert_eq!(
        percent_identity("ACG", "AC"),
        Err(IdentityError::LengthMismatch {
            left_len: 3,
            right_len: 2
        })
    );
}

#[test]
fn test_identity_matrix_values() {
    let records = vec![
        record("a", "ACGT"),
        record("b", "ACGA"),
        record("c", "TTTT"),
    ];
    let matrix = identity_matrix(&records).unwrap();
    assert_eq!(matrix.ids, vec!["a", "b", "c"]);
    assert_eq!(matrix.get(0, 1), Some(75.0));
    assert_eq!(matrix.get(2, 0), Some(25.0));
    assert_eq!(matrix.display_value(2, 2), 100.0);
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(matrix.get(i, j), matrix.get(j, i));
        }
    }
}

#[test]
fn test_single_sequence_matrix() {
    let matrix = identity_matrix(&[record("only", "ACGT")]).unwrap();
    assert_eq!(matrix.len(), 1);
    assert!(matrix.pairs().is_empty());
}

#[test]
fn test_unequal_alignment_aborts_matrix() {
    let records = vec![record("a", "ACGT"), record("b", "ACG")];
    assert!(matches!(
        identity_matrix(&records),
        Err(IdentityError::AlignmentLengthMismatch { .. })
    ));
}

#[test]
fn test_matrix_follows_requested_order() {
    let aligned = vec![record("b", "ACGA"), record("a", "ACGT")];
    let order = vec!["a".to_string(), "b".to_string()];
    let matrix = identity_matrix_in_order(&order, &aligned).unwrap();
    assert_eq!(matrix.ids, vec!["a", "b"]);
    assert_eq!(matrix.get(0, 1), Some(75.0));
}

#[test]
fn test_missing_aligned_sequence_fails() {
    let aligned = vec![record("a", "ACGT")];
    let order = vec!["a".to_string(), "ghost".to_string()];
    assert_eq!(
        identity_matrix_in_order(&order, &aligned),
        Err(IdentityError::MissingAlignedSequence("ghost".to_string()))
    );
}
