use super::*;
use std::path::PathBuf;

#[test]
fn test_summary_json_fields() {
    let mut summary = RunSummary::new("boxplot");
    summary.input("input", &PathBuf::from("tpm.tsv"));
    summary.count("genes", 3);
    summary.warn("2 query gene(s) not found");
    summary.output(&PathBuf::from("out/boxplot.png"));
    summary.groups = Some(vec![GroupLegend {
        label: "Leaf".to_string(),
        n_samples: 2,
    }]);

    let value: serde_json::Value =
        serde_json::from_str(&render_summary_json(&summary).unwrap()).unwrap();
    assert_eq!(value["tool"], TOOL_NAME);
    assert_eq!(value["command"], "boxplot");
    assert_eq!(value["inputs"]["input"], "tpm.tsv");
    assert_eq!(value["counts"]["genes"], 3);
    assert_eq!(value["warnings"][0], "2 query gene(s) not found");
    assert_eq!(value["outputs"][0], "out/boxplot.png");
    assert_eq!(value["groups"][0]["label"], "Leaf");
    assert_eq!(value["groups"][0]["n_samples"], 2);
    assert!(value.get("motifs").is_none());
}

#[test]
fn test_write_summary_json_creates_parent() {
    let dir = std::env::temp_dir().join(format!("phytoplot_json_test_{}", std::process::id()));
    let path = dir.join("nested").join("summary.json");
    let mut summary = RunSummary::new("motifs");
    summary.motifs = Some(vec![LegendEntry {
        display_name: "ABRE".to_string(),
        sequence: "ACGTG".to_string(),
    }]);
    write_summary_json(&summary, &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["motifs"][0]["display_name"], "ABRE");
    assert!(value.get("groups").is_none());
}
