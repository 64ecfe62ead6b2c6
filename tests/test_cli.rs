//! Tests for the pdf-partmark command line tool.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;
use std::process::{Command, Output};

fn write_pdf(path: &Path, line: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 700.into()]),
        Operation::new("Tj", vec![Object::string_literal(line)]),
        Operation::new("ET", vec![]),
    ];
    let content = Content { operations }.encode().unwrap();
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn partmark(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pdf-partmark"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_highlights_file_and_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pdf");
    let output = dir.path().join("out.pdf");
    let report = dir.path().join("report.json");
    write_pdf(&input, "Use (AB-123-L) and C-100");

    let result = partmark(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--seed",
        "3",
        "--report",
        report.to_str().unwrap(),
    ]);

    assert_eq!(result.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("1 pages to process..."));
    assert!(stdout.contains("Page: 1"));
    assert!(stdout.contains("2 Matches found"));

    assert!(Document::load(&output).is_ok());
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["total_matches"], 2);
    assert_eq!(json["pages"][0]["borders"], 1);
}

#[test]
fn test_missing_input_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.pdf");
    let output = dir.path().join("out.pdf");

    let result = partmark(&["-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()]);

    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn test_missing_output_directory_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pdf");
    let output = dir.path().join("nowhere").join("out.pdf");
    write_pdf(&input, "A-100");

    let result = partmark(&["-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()]);

    assert_eq!(result.status.code(), Some(1));
}

#[test]
fn test_invalid_config_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pdf");
    let output = dir.path().join("out.pdf");
    let config = dir.path().join("config.json");
    write_pdf(&input, "A-100");
    std::fs::write(&config, r#"{ "fallback_color": "no-such-color" }"#).unwrap();

    let result = partmark(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-c",
        config.to_str().unwrap(),
    ]);

    assert_eq!(result.status.code(), Some(1));
}

#[test]
fn test_unreadable_input_is_a_processing_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pdf");
    let output = dir.path().join("out.pdf");
    std::fs::write(&input, b"this is not a pdf").unwrap();

    let result = partmark(&["-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()]);

    assert_eq!(result.status.code(), Some(2));
    assert!(!output.exists());
}

#[test]
fn test_missing_arguments() {
    assert_eq!(partmark(&[]).status.code(), Some(1));
}
