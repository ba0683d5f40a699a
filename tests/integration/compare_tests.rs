//! Integration tests for the compare pipeline over a documents directory

use crate::common::TestFixture;
use sheetdiff::cli::OutputFormat;
use sheetdiff::commands::{compare_command, render_result};
use sheetdiff::config::Config;
use sheetdiff::source::fetch_pair;
use sheetdiff::{CancelToken, Comparator, ComparisonResult, DocumentSource, SheetDiffError};
use std::fs;

fn config() -> Config {
    Config {
        worker_threads: 2,
        ..Config::default()
    }
}

#[test]
fn test_compare_writes_text_report() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .write_document("old", &[("Sheet1", &[&["a", "b"]]), ("Extra", &[&["x"]])])
        .unwrap();
    fixture
        .write_document("new", &[("Sheet1", &[&["a", "c"]])])
        .unwrap();

    let report_path = fixture.root().join("report.txt");
    compare_command(
        &fixture.source,
        &config(),
        "old",
        "new",
        OutputFormat::Text,
        false,
        Some(&report_path),
    )
    .unwrap();

    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("Extra only in old"));
    assert!(report.contains("📄 Sheet1"));
    assert!(report.contains("[-b-]{+c+}"));
    assert!(!report.contains("📄 Extra"));
}

#[test]
fn test_compare_json_report_round_trips() {
    let fixture = TestFixture::new().unwrap();
    fixture.write_document("v1", &[("Data", &[&["1", "2"]])]).unwrap();
    fixture.write_document("v2", &[("Data", &[&["1", "3"]])]).unwrap();

    let report_path = fixture.root().join("report.json");
    compare_command(
        &fixture.source,
        &config(),
        "v1",
        "v2",
        OutputFormat::Json,
        false,
        Some(&report_path),
    )
    .unwrap();

    let result: ComparisonResult =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(result.old_id, "v1");
    assert_eq!(result.new_id, "v2");
    assert_eq!(result.sheets.len(), 1);
    assert!(result.sheets[0].has_changes());
}

#[test]
fn test_halt_on_mismatch_stops_before_diffing() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .write_document("old", &[("A", &[&["1"]]), ("B", &[&["2"]])])
        .unwrap();
    fixture
        .write_document("new", &[("B", &[&["2"]]), ("A", &[&["1"]])])
        .unwrap();

    let report_path = fixture.root().join("report.txt");
    let err = compare_command(
        &fixture.source,
        &config(),
        "old",
        "new",
        OutputFormat::Text,
        true,
        Some(&report_path),
    )
    .unwrap_err();

    assert!(matches!(err, SheetDiffError::StructureMismatch { .. }));
    assert!(!report_path.exists());
}

#[test]
fn test_halt_on_mismatch_passes_when_structure_matches() {
    let fixture = TestFixture::new().unwrap();
    fixture.write_document("old", &[("A", &[&["1"]])]).unwrap();
    fixture.write_document("new", &[("A", &[&["2"]])]).unwrap();

    let report_path = fixture.root().join("report.html");
    compare_command(
        &fixture.source,
        &config(),
        "old",
        "new",
        OutputFormat::Html,
        true,
        Some(&report_path),
    )
    .unwrap();

    let page = fs::read_to_string(&report_path).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<del class=\"diff-delete\">1</del>"));
}

#[test]
fn test_invalid_id_fails_before_fetch() {
    let fixture = TestFixture::new().unwrap();
    fixture.write_document("old", &[("A", &[&["1"]])]).unwrap();

    let err = compare_command(
        &fixture.source,
        &config(),
        "old",
        "../old",
        OutputFormat::Text,
        false,
        None,
    )
    .unwrap_err();

    match err {
        SheetDiffError::Validation { id, .. } => assert_eq!(id, "../old"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_missing_document_names_identifier() {
    let fixture = TestFixture::new().unwrap();
    fixture.write_document("old", &[("A", &[&["1"]])]).unwrap();

    let err = fetch_pair(&fixture.source, "old", "absent").unwrap_err();
    match err {
        SheetDiffError::Fetch { id, .. } => assert_eq!(id, "absent"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_malformed_document_is_fetch_error() {
    let fixture = TestFixture::new().unwrap();
    fixture.write_document("old", &[("A", &[&["1"]])]).unwrap();
    fixture.write_raw("new", "{\"sheets\": [").unwrap();

    let err = fetch_pair(&fixture.source, "old", "new").unwrap_err();
    assert!(matches!(err, SheetDiffError::Fetch { .. }));
    assert!(err.is_boundary());
}

#[test]
fn test_mixed_cell_types_from_disk() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .write_raw(
            "old",
            r#"{"sheets": [{"name": "S", "rows": [["total", 10, true, null]]}]}"#,
        )
        .unwrap();
    fixture
        .write_raw(
            "new",
            r#"{"sheets": [{"name": "S", "rows": [["total", 10.5, false, ""]]}]}"#,
        )
        .unwrap();

    let (old, new) = fetch_pair(&fixture.source, "old", "new").unwrap();
    let result = Comparator::new(0)
        .unwrap()
        .compare(&old, &new, &CancelToken::new())
        .unwrap();

    let text = render_result(&result, OutputFormat::Text).unwrap();
    assert!(text.contains("'total','10"));
    assert_eq!(sheetdiff::diff::old_text(&result.sheets[0].ops), "'total','10','TRUE','',\n");
    assert_eq!(sheetdiff::diff::new_text(&result.sheets[0].ops), "'total','10.5','FALSE','',\n");
}

#[test]
fn test_list_documents() {
    let fixture = TestFixture::new().unwrap();
    fixture.write_document("b-doc", &[]).unwrap();
    fixture.write_document("a_doc", &[]).unwrap();
    fs::write(fixture.root().join("notes.txt"), "ignored").unwrap();
    fs::write(fixture.root().join("bad name.json"), "{}").unwrap();

    assert_eq!(fixture.source.list().unwrap(), vec!["a_doc", "b-doc"]);
    assert!(fixture
        .source
        .fetch(&sheetdiff::DocumentId::parse("a_doc").unwrap())
        .unwrap()
        .sheets
        .is_empty());
}
