use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("phytoplot_align_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_default_aligner_params() {
    let aligner = CommandAligner::default();
    assert_eq!(aligner.program, PathBuf::from(DEFAULT_ALIGNER));
    assert_eq!(aligner.params, vec!["--maxiterate", "1000", "--genafpair"]);
}

#[test]
fn test_stdout_is_written_to_output() {
    let dir = make_temp_dir();
    let input = dir.join("in.fasta");
    let output = dir.join("nested").join("out.aln.fasta");
    fs::write(&input, ">a\nACGT\n").unwrap();

    let aligner = CommandAligner {
        program: PathBuf::from("cat"),
        params: Vec::new(),
    };
    aligner.align(&input, &output).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), ">a\nACGT\n");
}

#[test]
fn test_nonzero_exit_is_tool_failure() {
    let dir = make_temp_dir();
    let input = dir.join("in.fasta");
    fs::write(&input, ">a\nACGT\n").unwrap();

    let aligner = CommandAligner {
        program: PathBuf::from("false"),
        params: Vec::new(),
    };
    let err = aligner.align(&input, &dir.join("out.fasta")).unwrap_err();
    assert!(matches!(err, AlignError::ExternalToolFailure { .. }));
    assert!(!dir.join("out.fasta").exists());
}

#[test]
fn test_missing_program_is_spawn_error() {
    let dir = make_temp_dir();
    let aligner = CommandAligner::new("phytoplot-no-such-aligner");
    let err = aligner
        .align(&dir.join("in.fasta"), &dir.join("out.fasta"))
        .unwrap_err();
    assert!(matches!(err, AlignError::Spawn { .. }));
}
