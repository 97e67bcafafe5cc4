use super::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("phytoplot_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_read_text_plain_and_gz() {
    let dir = make_temp_dir();
    let plain = dir.join("genes.txt");
    fs::write(&plain, "AT1G01010\nAT1G01020\n").unwrap();

    let gz = dir.join("genes.txt.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(b"AT1G01010\nAT1G01020\n").unwrap();
    fs::write(&gz, enc.finish().unwrap()).unwrap();

    assert_eq!(read_text(&plain).unwrap(), read_text(&gz).unwrap());
}

#[test]
fn test_read_text_missing_file_is_io_error() {
    let dir = make_temp_dir();
    let err = read_text(&dir.join("absent.tsv")).unwrap_err();
    assert!(matches!(err, InputError::Io(_)));
}

#[test]
fn test_data_lines_skip_blank_and_keep_numbers() {
    let text = "a\r\n\n  \nb\n";
    let lines: Vec<_> = data_lines(text).collect();
    assert_eq!(lines, vec![(1, "a"), (4, "b")]);
}

#[test]
fn test_parse_error_message_names_origin_and_line() {
    let err = InputError::parse("tpm.tsv", 3, "bad value");
    assert_eq!(err.to_string(), "tpm.tsv line 3: bad value");
}

#[test]
fn test_read_text_invalid_utf8_is_parse_error() {
    let dir = make_temp_dir();
    let path = dir.join("tpm.tsv");
    fs::write(&path, b"Gene\ts1\nG1\t\xff\xfe\n").unwrap();
    match read_text(&path).unwrap_err() {
        InputError::Parse { origin, line, .. } => {
            assert_eq!(origin, "tpm.tsv");
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_decompress_to_writes_plain_copy() {
    let dir = make_temp_dir();
    let gz = dir.join("seqs.fasta.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(b">a\nACGT\n").unwrap();
    fs::write(&gz, enc.finish().unwrap()).unwrap();
    assert!(is_gz(&gz));

    let plain = dir.join("out").join("seqs.fasta");
    decompress_to(&gz, &plain).unwrap();
    assert!(!is_gz(&plain));
    assert_eq!(fs::read_to_string(&plain).unwrap(), ">a\nACGT\n");
}
