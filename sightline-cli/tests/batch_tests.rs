//! Batch runs over temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use sightline_cli::{
    BatchOptions, BatchRunner, BatchSummary, DocumentOutcome, Ledger, collect_documents,
};
use sightline_detect::DocumentAnalyzer;
use tempfile::TempDir;

const VISIBLE: &str = "<html><body><p>hello</p></body></html>";
const HIDDEN: &str = r#"<html><body><p style="display:none">secret</p></body></html>"#;

/// Lay out `files` under a fresh input directory.
fn input_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    dir
}

fn runner(work: &Path, options: BatchOptions) -> BatchRunner {
    let ledger = Ledger::open(work.join("ledger.txt")).unwrap();
    BatchRunner::new(DocumentAnalyzer::default(), options, ledger)
}

fn run(runner: &mut BatchRunner, input: &Path) -> (BatchSummary, String) {
    let mut out = Vec::new();
    let summary = runner.run(&[input.to_path_buf()], &mut out);
    (summary, String::from_utf8(out).unwrap())
}

#[test]
fn test_collect_documents_recurses_and_filters() {
    let input = input_dir(&[
        ("b.html", VISIBLE),
        ("a.htm", VISIBLE),
        ("notes.txt", "x"),
        ("nested/deeper/c.HTML", VISIBLE),
    ]);
    let documents = collect_documents(&[input.path().to_path_buf()]);
    let names: Vec<PathBuf> = documents.iter().map(|d| d.output_name()).collect();
    assert_eq!(
        names,
        vec![
            PathBuf::from("a.json"),
            PathBuf::from("b.json"),
            PathBuf::from("nested/deeper/c.json"),
        ]
    );
}

#[test]
fn test_outputs_mirror_input_layout() {
    let input = input_dir(&[("one.html", VISIBLE), ("sub/two.html", HIDDEN)]);
    let work = tempfile::tempdir().unwrap();
    let out_dir = work.path().join("out");

    let mut runner = runner(
        work.path(),
        BatchOptions {
            output_dir: Some(out_dir.clone()),
            ..BatchOptions::default()
        },
    );
    let (summary, stdout) = run(&mut runner, input.path());

    assert_eq!(summary.visible, 1);
    assert_eq!(summary.flagged, 1);
    assert!(stdout.is_empty());

    let records = fs::read_to_string(out_dir.join("sub/two.json")).unwrap();
    let first: serde_json::Value = serde_json::from_str(records.lines().next().unwrap()).unwrap();
    assert_eq!(first["text"], "secret");
    assert_eq!(first["visible"], false);
    assert_eq!(first["hidden_reasons"][0], "display:none");
    assert!(out_dir.join("one.json").exists());
}

#[test]
fn test_records_go_to_stream_without_output_dir() {
    let input = input_dir(&[("one.html", VISIBLE)]);
    let work = tempfile::tempdir().unwrap();
    let mut runner = runner(work.path(), BatchOptions::default());

    let (_, stdout) = run(&mut runner, input.path());
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains(r#""text":"hello""#));
}

#[test]
fn test_ledger_skips_finished_documents() {
    let input = input_dir(&[("one.html", VISIBLE), ("two.html", HIDDEN)]);
    let work = tempfile::tempdir().unwrap();

    let mut first = runner(work.path(), BatchOptions::default());
    let (summary, _) = run(&mut first, input.path());
    assert_eq!(summary.skipped, 0);
    assert_eq!(first.ledger().len(), 2);

    let ledger = fs::read_to_string(work.path().join("ledger.txt")).unwrap();
    let statuses: Vec<&str> = ledger
        .lines()
        .filter_map(|line| line.split('\t').nth(1))
        .collect();
    assert_eq!(statuses, vec!["TEXT_ALL_VISIBLE", "FOUND_INVISIBLE"]);

    let mut second = runner(work.path(), BatchOptions::default());
    let (summary, stdout) = run(&mut second, input.path());
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.total(), 2);
    assert!(stdout.is_empty());
}

#[test]
fn test_flagged_documents_are_quarantined() {
    let input = input_dir(&[("good.html", VISIBLE), ("bad.html", HIDDEN)]);
    let work = tempfile::tempdir().unwrap();
    let flagged = work.path().join("flagged");

    let mut runner = runner(
        work.path(),
        BatchOptions {
            flagged_dir: Some(flagged.clone()),
            ..BatchOptions::default()
        },
    );
    let _ = run(&mut runner, input.path());

    assert_eq!(fs::read_to_string(flagged.join("htmls/bad.html")).unwrap(), HIDDEN);
    assert!(flagged.join("jsons/bad.json").exists());
    assert!(!flagged.join("htmls/good.html").exists());
}

#[test]
fn test_quarantine_keeps_same_named_documents_apart() {
    let other = r#"<html><body><p style="visibility:hidden">other</p></body></html>"#;
    let input = input_dir(&[("inbox/mail.html", HIDDEN), ("spam/mail.html", other)]);
    let work = tempfile::tempdir().unwrap();
    let flagged = work.path().join("flagged");

    let mut runner = runner(
        work.path(),
        BatchOptions {
            flagged_dir: Some(flagged.clone()),
            ..BatchOptions::default()
        },
    );
    let (summary, _) = run(&mut runner, input.path());
    assert_eq!(summary.flagged, 2);

    assert_eq!(fs::read_to_string(flagged.join("htmls/inbox/mail.html")).unwrap(), HIDDEN);
    assert_eq!(fs::read_to_string(flagged.join("htmls/spam/mail.html")).unwrap(), other);
    let spam_records = fs::read_to_string(flagged.join("jsons/spam/mail.json")).unwrap();
    assert!(spam_records.contains(r#""text":"other""#));
    assert!(flagged.join("jsons/inbox/mail.json").exists());
}

#[test]
fn test_failing_document_does_not_stop_the_batch() {
    let input = input_dir(&[("one.html", VISIBLE)]);
    let work = tempfile::tempdir().unwrap();
    let mut runner = runner(work.path(), BatchOptions::default());

    let missing = input.path().join("missing.html");
    let mut out = Vec::new();
    let summary = runner.run(&[missing, input.path().join("one.html")], &mut out);

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.visible, 1);
    // Failures are not recorded, so a rerun retries them
    assert_eq!(runner.ledger().len(), 1);
}

#[test]
fn test_invalid_utf8_is_read_lossily() {
    let input = tempfile::tempdir().unwrap();
    let path = input.path().join("latin1.html");
    fs::write(&path, b"<p>caf\xe9</p>").unwrap();
    let work = tempfile::tempdir().unwrap();
    let mut runner = runner(work.path(), BatchOptions::default());

    let mut out = Vec::new();
    let documents = collect_documents(&[path]);
    let outcome = runner.process(&documents[0], &mut out).unwrap();
    assert_eq!(outcome, DocumentOutcome::Visible);
    assert!(String::from_utf8(out).unwrap().contains("caf\u{fffd}"));
}
