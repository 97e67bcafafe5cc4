use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("phytoplot").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_boxplot_defaults() {
    let cli = parse(&["boxplot", "-i", "tpm.tsv"]);
    assert!(!cli.quiet);
    let Command::Boxplot(args) = cli.command else {
        panic!("expected boxplot subcommand");
    };
    let config = args.into_config().unwrap();
    assert_eq!(config.output, PathBuf::from("boxplot.png"));
    assert_eq!(config.point_size, 5.0);
    assert_eq!(config.box_width, 0.6);
    assert!(config.tissue_order.is_empty());
}

#[test]
fn test_boxplot_underscore_aliases() {
    let cli = parse(&[
        "boxplot",
        "-i",
        "tpm.tsv",
        "--tissue_order",
        "Leaf,Root",
        "--box_width",
        "0.4",
        "--remove_outliers",
        "--quiet",
    ]);
    assert!(cli.quiet);
    let Command::Boxplot(args) = cli.command else {
        panic!("expected boxplot subcommand");
    };
    let config = args.into_config().unwrap();
    assert_eq!(config.tissue_order, vec!["Leaf", "Root"]);
    assert_eq!(config.box_width, 0.4);
    assert!(config.remove_outliers);
}

#[test]
fn test_boxplot_invalid_width_rejected() {
    let cli = parse(&["boxplot", "-i", "tpm.tsv", "--box-width", "2"]);
    let Command::Boxplot(args) = cli.command else {
        panic!("expected boxplot subcommand");
    };
    assert!(matches!(args.into_config(), Err(AppError::InvalidConfig(_))));
}

#[test]
fn test_motifs_multiple_tfbs() {
    let cli = parse(&["motifs", "-i", "p.tsv", "-t", "TF1", "TF2", "--promoter-length", "1500"]);
    let Command::Motifs(args) = cli.command else {
        panic!("expected motifs subcommand");
    };
    let config = args.into_config().unwrap();
    assert_eq!(config.tfbs, vec!["TF1", "TF2"]);
    assert_eq!(config.promoter_length, Some(1500));
    assert_eq!(config.output_dir, PathBuf::from("motif_plots"));
    assert_eq!(config.left_margin, 20);
}

#[test]
fn test_identity_flags() {
    let cli = parse(&["identity", "--in", "seqs.fa", "--out", "res"]);
    let Command::Identity(args) = cli.command else {
        panic!("expected identity subcommand");
    };
    let config = args.into_config().unwrap();
    assert_eq!(config.input, PathBuf::from("seqs.fa"));
    assert_eq!(config.out_dir, PathBuf::from("res"));
    assert_eq!(config.aligner, PathBuf::from(DEFAULT_ALIGNER));
    assert_eq!((config.vmin, config.vmax), (60.0, 100.0));
    assert!(!config.from_summary);
}

#[test]
fn test_from_summary_conflicts_with_aligned() {
    let result = Cli::try_parse_from([
        "phytoplot",
        "identity",
        "--in",
        "summary.txt",
        "--out",
        "res",
        "--from-summary",
        "--aligned",
        "aln.fasta",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_identity_requires_out() {
    let result = Cli::try_parse_from(["phytoplot", "identity", "--in", "seqs.fa"]);
    assert!(result.is_err());
}
