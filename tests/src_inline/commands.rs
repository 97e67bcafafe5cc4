use super::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::pipeline::align::AlignError;
use crate::pipeline::identity::IdentityError;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("phytoplot_commands_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes a fixed alignment instead of running an external tool.
struct FixedAligner(&'static str);

impl Aligner for FixedAligner {
    fn align(&self, _input: &Path, output: &Path) -> Result<(), AlignError> {
        fs::write(output, self.0)?;
        Ok(())
    }
}

struct FailingAligner;

impl Aligner for FailingAligner {
    fn align(&self, _input: &Path, _output: &Path) -> Result<(), AlignError> {
        Err(AlignError::ExternalToolFailure {
            program: "mafft".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "boom".to_string(),
        })
    }
}

fn identity_config(dir: &Path) -> IdentityConfig {
    let input = dir.join("in.fasta");
    fs::write(&input, ">a\nACGT\n>b\nACGA\n").unwrap();
    IdentityConfig {
        input,
        out_dir: dir.join("out"),
        aligner: PathBuf::from("mafft"),
        aligned: None,
        from_summary: false,
        vmin: 60.0,
        vmax: 100.0,
    }
}

#[test]
fn test_aligner_failure_aborts_before_outputs() {
    let dir = make_temp_dir();
    let config = identity_config(&dir);
    let err = run_identity_with(&config, &FailingAligner).unwrap_err();
    assert!(matches!(err, AppError::Align(AlignError::ExternalToolFailure { .. })));
    assert!(!config.out_dir.join(IDENTITY_SUMMARY_FILE).exists());
}

#[test]
fn test_alignment_missing_sequence_fails() {
    let dir = make_temp_dir();
    let config = identity_config(&dir);
    let err = run_identity_with(&config, &FixedAligner(">a\nACGT\n")).unwrap_err();
    assert!(matches!(
        err,
        AppError::Identity(IdentityError::MissingAlignedSequence(ref id)) if id == "b"
    ));
    assert!(config.alignment_path().exists());
    assert!(!config.out_dir.join(IDENTITY_SUMMARY_FILE).exists());
}

#[test]
fn test_unequal_alignment_fails() {
    let dir = make_temp_dir();
    let config = identity_config(&dir);
    let err = run_identity_with(&config, &FixedAligner(">a\nACGT\n>b\nACG\n")).unwrap_err();
    assert!(matches!(
        err,
        AppError::Identity(IdentityError::AlignmentLengthMismatch { .. })
    ));
}

#[test]
fn test_motifs_without_hits_writes_tables_only() {
    let dir = make_temp_dir();
    let input = dir.join("plantpan.tsv");
    fs::write(
        &input,
        "Sequence ID\tTFBS ID\tTFBS Name\tPosistion\tStrand\tSimilar Score\tBinding sequence\tTF family\tTF ID\n\
G1\tTF001\tABRE\t10\t+\t1\tACGTG\tbZIP\tX\n",
    )
    .unwrap();
    let config = MotifPlotConfig {
        input,
        output_dir: dir.join("plots"),
        tfbs: vec!["TF999".to_string()],
        promoter_length: None,
        left_margin: 20,
    };
    run_motifs(&config).unwrap();

    let coordinates = fs::read_to_string(config.output_dir.join(COORDINATES_FILE)).unwrap();
    assert_eq!(coordinates.lines().count(), 1);
    assert!(!config.output_dir.join("motif_plot.png").exists());

    let summary: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(config.output_dir.join(RUN_SUMMARY_FILE)).unwrap(),
    )
    .unwrap();
    assert_eq!(summary["counts"]["hits_in_table"], 1);
    assert_eq!(summary["counts"]["hits_after_filter"], 0);
    assert_eq!(summary["warnings"][0], "No motifs found in input file.");
}

#[test]
fn test_boxplot_missing_table_is_input_error() {
    let dir = make_temp_dir();
    let config = BoxplotConfig {
        input: dir.join("absent.tsv"),
        query: None,
        tissue: None,
        tissue_order: Vec::new(),
        title: None,
        point_size: 5.0,
        outlier_size: 5.0,
        remove_outliers: false,
        box_width: 0.6,
        drop_unassigned: false,
        output: dir.join("boxplot.png"),
    };
    assert!(matches!(run_boxplot(&config), Err(AppError::Input(_))));
    assert!(!config.output.exists());
}

#[test]
fn test_from_summary_rejects_bad_matrix() {
    let dir = make_temp_dir();
    let mut config = identity_config(&dir);
    config.input = dir.join("summary.txt");
    config.from_summary = true;
    fs::write(&config.input, "\tx\ty\nx\t100%\t80%\ny\t70%\t100%\n").unwrap();
    let err = run_identity_with(&config, &FailingAligner).unwrap_err();
    assert!(matches!(err, AppError::Input(_)));
}

/// Keeps a copy of whatever it was asked to align, then fails.
struct CapturingAligner(std::cell::RefCell<Option<String>>);

impl Aligner for CapturingAligner {
    fn align(&self, input: &Path, _output: &Path) -> Result<(), AlignError> {
        *self.0.borrow_mut() = Some(fs::read_to_string(input)?);
        Err(AlignError::ExternalToolFailure {
            program: "mafft".to_string(),
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        })
    }
}

#[test]
fn test_gz_input_is_aligned_as_plain_fasta() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let dir = make_temp_dir();
    let mut config = identity_config(&dir);
    config.input = dir.join("in.fasta.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(b">a\nACGT\n>b\nACGA\n").unwrap();
    fs::write(&config.input, enc.finish().unwrap()).unwrap();

    let aligner = CapturingAligner(std::cell::RefCell::new(None));
    let err = run_identity_with(&config, &aligner).unwrap_err();
    assert!(matches!(err, AppError::Align(_)));
    assert_eq!(
        aligner.0.borrow().as_deref(),
        Some(">a\nACGT\n>b\nACGA\n")
    );
    assert!(config.unpacked_input_path().exists());
}

#[test]
fn test_empty_fasta_warns_and_writes_empty_outputs() {
    let dir = make_temp_dir();
    let config = identity_config(&dir);
    fs::write(&config.input, "\n").unwrap();
    run_identity_with(&config, &FailingAligner).unwrap();

    let matrix_text = fs::read_to_string(config.out_dir.join(IDENTITY_SUMMARY_FILE)).unwrap();
    assert!(matrix_text.is_empty());
    assert!(!config.alignment_path().exists());
    assert!(!config.out_dir.join("heatmap.png").exists());

    let summary: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(config.out_dir.join(RUN_SUMMARY_FILE)).unwrap(),
    )
    .unwrap();
    assert_eq!(summary["counts"]["sequences"], 0);
    assert_eq!(summary["warnings"][0], "No sequences found in input file.");
}
