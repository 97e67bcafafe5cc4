use super::*;

fn boxplot_config() -> BoxplotConfig {
    BoxplotConfig {
        input: PathBuf::from("tpm.tsv"),
        query: None,
        tissue: None,
        tissue_order: Vec::new(),
        title: None,
        point_size: 5.0,
        outlier_size: 5.0,
        remove_outliers: false,
        box_width: 0.6,
        drop_unassigned: false,
        output: PathBuf::from("out/boxplot.png"),
    }
}

#[test]
fn test_boxplot_config_validation() {
    assert!(boxplot_config().validate().is_ok());

    let mut bad = boxplot_config();
    bad.box_width = 1.5;
    assert!(bad.validate().is_err());

    let mut bad = boxplot_config();
    bad.point_size = 0.0;
    assert!(bad.validate().is_err());

    let mut bad = boxplot_config();
    bad.output = PathBuf::from("boxplot.pdf");
    assert!(matches!(bad.validate(), Err(AppError::InvalidConfig(_))));
}

#[test]
fn test_boxplot_summary_path() {
    assert_eq!(
        boxplot_config().summary_path(),
        PathBuf::from("out/boxplot.summary.json")
    );
}

#[test]
fn test_identity_config_range() {
    let mut config = IdentityConfig {
        input: PathBuf::from("in.fa"),
        out_dir: PathBuf::from("out"),
        aligner: PathBuf::from("mafft"),
        aligned: None,
        from_summary: false,
        vmin: 60.0,
        vmax: 100.0,
    };
    assert!(config.validate().is_ok());
    assert_eq!(config.alignment_path(), PathBuf::from("out").join(ALIGNMENT_FILE));
    config.vmin = 100.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_motif_config_rejects_zero_length() {
    let config = MotifPlotConfig {
        input: PathBuf::from("plantpan.tsv"),
        output_dir: PathBuf::from("motif_plots"),
        tfbs: Vec::new(),
        promoter_length: Some(0),
        left_margin: 20,
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_parse_order_list() {
    assert_eq!(parse_order_list(" Leaf, Stem,,Root "), vec!["Leaf", "Stem", "Root"]);
    assert!(parse_order_list("").is_empty());
}
