//! Integration tests for error cases.

use pdfops::PdfOpsError;
use pdfops::commands::Commands;
use pdfops::io::OverwriteMode;
use pdfops::naming::OutputNamer;
use pdfops::pages::{Angle, Direction};

use crate::common::{STAMP, Workspace};

#[test]
fn test_list_includes_unreadable_pdf() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1", "A2"]);
    ws.add_raw_pdf("b.pdf", b"not a pdf");

    let inventory = ws.commands().inventory().unwrap();

    let counts: Vec<Option<usize>> = inventory.documents.iter().map(|d| d.page_count).collect();
    assert_eq!(counts, vec![Some(2), None]);
}

#[test]
fn test_merge_unreadable_pdf_fails_without_output() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1"]);
    ws.add_raw_pdf("b.pdf", b"not a pdf");

    let err = ws.commands().merge("1,2").unwrap_err();

    assert!(matches!(err, PdfOpsError::UnreadableDocument { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(ws.outputs().is_empty());
}

#[test]
fn test_malformed_inputs() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1"]);
    let commands = ws.commands();

    assert!(matches!(
        commands.merge("1,two"),
        Err(PdfOpsError::MalformedOrder { token }) if token == "two"
    ));
    assert!(matches!(
        commands.split(1, "1-x"),
        Err(PdfOpsError::MalformedRange { .. })
    ));
    assert!(matches!(
        commands.split(2, "1"),
        Err(PdfOpsError::InvalidChoice { index: 2, available: 1 })
    ));
    assert!(matches!(
        commands.rotate(1, Angle::Deg90, Direction::Clockwise, "2-"),
        Err(PdfOpsError::MalformedRange { .. })
    ));
}

#[test]
fn test_unreadable_image() {
    let ws = Workspace::new();
    std::fs::write(ws.config.image_dir.join("broken.png"), b"not a png").unwrap();

    let err = ws.commands().images("1").unwrap_err();
    assert!(matches!(err, PdfOpsError::UnreadableImage { .. }));
}

#[test]
fn test_same_minute_overwrites_by_default() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1"]);
    ws.add_pdf("b.pdf", &["B1"]);
    let commands = ws.commands();

    commands.merge("1").unwrap();
    commands.merge("2").unwrap();

    let output = ws.output(&format!("merged_ordered_{STAMP}.pdf"));
    assert_eq!(crate::common::page_labels(&output), vec!["B1"]);
}

#[test]
fn test_no_clobber_refuses_same_minute_output() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1"]);
    let mut config = ws.config.clone();
    config.overwrite_mode = OverwriteMode::NoClobber;
    let commands = Commands::with_namer(config, OutputNamer::with_timestamp(STAMP));

    commands.merge("1").unwrap();
    let err = commands.merge("1").unwrap_err();

    assert!(matches!(err, PdfOpsError::OutputExists { .. }));
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn test_missing_folder() {
    let ws = Workspace::new();
    std::fs::remove_dir(&ws.config.image_dir).unwrap();

    assert!(matches!(
        ws.commands().images("1"),
        Err(PdfOpsError::InvalidConfig { .. })
    ));
}
