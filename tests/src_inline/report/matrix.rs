use super::*;

fn matrix() -> IdentityMatrix {
    let upper = [75.0, 100.0 / 3.0, 62.5];
    let mut next = upper.iter().copied();
    IdentityMatrix::try_from_pairs(vec!["a".into(), "b".into(), "c".into()], |_, _| {
        next.next().ok_or(())
    })
    .unwrap()
}

#[test]
fn test_render_identity_summary_layout() {
    let text = render_identity_summary(&matrix());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "\ta\tb\tc");
    assert_eq!(lines[1], "a\t100.000000%\t75.000000%\t33.333333%");
    assert_eq!(lines[3], "c\t33.333333%\t62.500000%\t100.000000%");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_summary_round_trip_within_precision() {
    let original = matrix();
    let parsed = parse_identity_summary(&render_identity_summary(&original), "summary.txt").unwrap();
    assert_eq!(parsed.ids, original.ids);
    for (a, b) in parsed.pairs().iter().zip(original.pairs()) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn test_percent_sign_optional() {
    let text = "\tx\ty\nx\t100\t80.5\ny\t80.5\t100\n";
    let parsed = parse_identity_summary(text, "t").unwrap();
    assert_eq!(parsed.get(0, 1), Some(80.5));
}

#[test]
fn test_asymmetric_summary_rejected() {
    let text = "\tx\ty\nx\t100%\t80%\ny\t81%\t100%\n";
    let err = parse_identity_summary(text, "t").unwrap_err();
    assert!(err.to_string().contains("asymmetric"));
}

#[test]
fn test_row_name_and_count_checked() {
    assert!(parse_identity_summary("\tx\ty\ny\t100\t1\nx\t1\t100\n", "t").is_err());
    assert!(parse_identity_summary("\tx\ty\nx\t100\t1\n", "t").is_err());
    assert!(parse_identity_summary("\tx\ty\nx\t100\tabc\ny\t1\t100\n", "t").is_err());
}

#[test]
fn test_empty_matrix_round_trip() {
    let text = render_identity_summary(&IdentityMatrix::default());
    assert!(text.is_empty());
    assert!(parse_identity_summary(&text, "t").unwrap().is_empty());
}
