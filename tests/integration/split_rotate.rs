//! Integration tests for splitting and rotating one PDF.

use pdfops::commands::Report;
use pdfops::io::{DocumentWriter, PdfReader, PdfWriter};
use pdfops::naming::OutputNamer;
use pdfops::pages::{Angle, Direction, PageRangeSet};
use pdfops::plan::SourceItem;
use pdfops::transform::TransformEngine;
use rstest::rstest;

use crate::common::{STAMP, Workspace, media_boxes, page_labels, page_rotations};

#[test]
fn test_split_selected_pages() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1"]);
    ws.add_pdf("report.pdf", &["R1", "R2", "R3", "R4"]);

    let report = ws.commands().split(2, "4,1-2,9").unwrap();

    let output = ws.output(&format!("report_selected_pages_{STAMP}.pdf"));
    assert!(matches!(report, Report::Written { pages: 3, .. }));
    assert_eq!(page_labels(&output), vec!["R1", "R2", "R4"]);
    // Inherited page size survives the copy
    assert_eq!(media_boxes(&output), vec![vec![0, 0, 595, 842]; 3]);
}

#[test]
fn test_split_open_ended_huge_range() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1", "A2", "A3"]);

    let report = ws.commands().split(1, "2-4000000000").unwrap();

    assert!(matches!(report, Report::Written { pages: 2, .. }));
    let output = ws.output(&format!("a_selected_pages_{STAMP}.pdf"));
    assert_eq!(page_labels(&output), vec!["A2", "A3"]);
}

#[test]
fn test_split_nothing_selected() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1", "A2"]);

    let report = ws.commands().split(1, "5-7").unwrap();

    match report {
        Report::NothingToDo { reason, .. } => assert!(reason.contains("No valid pages")),
        other => panic!("expected nothing to do, got {other:?}"),
    }
    assert!(ws.outputs().is_empty());
}

#[test]
fn test_split_twice_keeps_first_page() {
    let ws = Workspace::new();
    let source = ws.add_pdf("a.pdf", &["A1", "A2", "A3"]);
    let engine = TransformEngine::new(PdfReader::new(), OutputNamer::with_timestamp(STAMP));
    let writer = PdfWriter::new();
    let first_page = PageRangeSet::parse("1").unwrap();

    let once = engine
        .split(&SourceItem::file(&source), &first_page)
        .unwrap()
        .completed()
        .unwrap();
    let once_path = ws.root().join("once.pdf");
    writer.write(&once.pages, &once_path).unwrap();

    let twice = engine
        .split(&SourceItem::file(&once_path), &first_page)
        .unwrap()
        .completed()
        .unwrap();
    let twice_path = ws.root().join("twice.pdf");
    writer.write(&twice.pages, &twice_path).unwrap();

    assert_eq!(page_labels(&twice_path), vec!["A1"]);
    assert_eq!(page_labels(&twice_path), page_labels(&once_path));
}

#[rstest]
#[case(Angle::Deg90, Direction::Clockwise, "all", vec![90, 90, 90])]
#[case(Angle::Deg90, Direction::CounterClockwise, "all", vec![270, 270, 270])]
#[case(Angle::Deg180, Direction::Clockwise, "2", vec![0, 180, 0])]
#[case(Angle::Deg270, Direction::Clockwise, "1,3,8", vec![270, 0, 270])]
fn test_rotate(
    #[case] angle: Angle,
    #[case] direction: Direction,
    #[case] pages: &str,
    #[case] expected: Vec<i64>,
) {
    let ws = Workspace::new();
    ws.add_pdf("scan.pdf", &["S1", "S2", "S3"]);

    ws.commands().rotate(1, angle, direction, pages).unwrap();

    let output = ws.output(&format!(
        "scan_rotated_selected_{}_{}_{STAMP}.pdf",
        angle.as_degrees(),
        direction.code()
    ));
    assert_eq!(page_rotations(&output), expected);
    assert_eq!(page_labels(&output), vec!["S1", "S2", "S3"]);
}

#[test]
fn test_rotate_adds_to_existing_rotation() {
    let ws = Workspace::new();
    ws.add_rotated_pdf("scan.pdf", &["S1", "S2"], &[90, 270]);

    ws.commands().rotate(1, Angle::Deg90, Direction::Clockwise, "all").unwrap();

    let output = ws.output(&format!("scan_rotated_selected_90_c_{STAMP}.pdf"));
    assert_eq!(page_rotations(&output), vec![180, 0]);
}

#[test]
fn test_rotate_output_again_accumulates() {
    let ws = Workspace::new();
    ws.add_pdf("scan.pdf", &["S1"]);

    ws.commands().rotate(1, Angle::Deg90, Direction::Clockwise, "all").unwrap();
    let first = ws.output(&format!("scan_rotated_selected_90_c_{STAMP}.pdf"));
    std::fs::copy(&first, ws.config.pdf_dir.join("turned.pdf")).unwrap();

    // "turned.pdf" sorts after "scan.pdf"
    ws.commands().rotate(2, Angle::Deg90, Direction::Clockwise, "all").unwrap();
    let second = ws.output(&format!("turned_rotated_selected_90_c_{STAMP}.pdf"));
    assert_eq!(page_rotations(&second), vec![180]);
}

#[test]
fn test_rotate_missing_pages_is_nothing_to_do() {
    let ws = Workspace::new();
    ws.add_pdf("scan.pdf", &["S1"]);

    let report = ws.commands().rotate(1, Angle::Deg180, Direction::CounterClockwise, "4-6").unwrap();

    assert!(matches!(report, Report::NothingToDo { .. }));
    assert!(ws.outputs().is_empty());
}
