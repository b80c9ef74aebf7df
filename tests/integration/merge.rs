//! Integration tests for merging PDFs in a chosen order.

use pdfops::commands::Report;

use crate::common::{STAMP, Workspace, page_labels};

#[test]
fn test_merge_follows_requested_order() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1", "A2"]);
    ws.add_pdf("b.pdf", &["B1", "B2", "B3"]);

    let report = ws.commands().merge("2,1").unwrap();

    let expected = ws.output(&format!("merged_ordered_{STAMP}.pdf"));
    match &report {
        Report::Written { path, pages, .. } => {
            assert_eq!(path, &expected);
            assert_eq!(*pages, 5);
        }
        other => panic!("expected a written report, got {other:?}"),
    }
    assert_eq!(page_labels(&expected), vec!["B1", "B2", "B3", "A1", "A2"]);
    assert_eq!(report.progress().last().unwrap(), "Total pages: 5");
}

#[test]
fn test_merge_repeats_and_drops_out_of_range() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1"]);
    ws.add_pdf("b.pdf", &["B1"]);

    ws.commands().merge("1,9,1,2").unwrap();

    let output = ws.output(&format!("merged_ordered_{STAMP}.pdf"));
    assert_eq!(page_labels(&output), vec!["A1", "A1", "B1"]);
}

#[test]
fn test_merge_keeps_existing_rotation() {
    let ws = Workspace::new();
    ws.add_rotated_pdf("a.pdf", &["A1", "A2"], &[90, 0]);

    ws.commands().merge("1").unwrap();

    let output = ws.output(&format!("merged_ordered_{STAMP}.pdf"));
    assert_eq!(crate::common::page_rotations(&output), vec![90, 0]);
}

#[tokio::test]
async fn test_merge_on_blocking_pool() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1"]);
    let commands = ws.commands();

    let report = tokio::task::spawn_blocking(move || commands.merge("1,1"))
        .await
        .unwrap()
        .unwrap();

    assert!(matches!(report, Report::Written { pages: 2, .. }));
}

#[test]
fn test_merge_nothing_resolved() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1"]);

    let report = ws.commands().merge("4,5").unwrap();

    assert!(matches!(report, Report::NothingToDo { .. }));
    assert!(ws.outputs().is_empty());
}
