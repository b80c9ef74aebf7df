//! Integration tests for building a PDF from images.

use pdfops::commands::Report;

use crate::common::{STAMP, Workspace, media_boxes};

#[test]
fn test_images_one_page_each_in_order() {
    let ws = Workspace::new();
    ws.add_image("a.png", 40, 30);
    ws.add_image("b.jpg", 20, 50);

    let report = ws.commands().images("2,1").unwrap();

    let output = ws.output(&format!("images_to_pdf_{STAMP}.pdf"));
    assert!(matches!(report, Report::Written { pages: 2, .. }));
    assert_eq!(media_boxes(&output), vec![vec![0, 0, 20, 50], vec![0, 0, 40, 30]]);
}

#[test]
fn test_images_ignores_other_files() {
    let ws = Workspace::new();
    ws.add_image("only.png", 10, 10);
    std::fs::write(ws.config.image_dir.join("notes.txt"), b"hello").unwrap();

    let images = ws.commands().available_images().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].display_name(), "only.png");
}

#[test]
fn test_images_empty_plan() {
    let ws = Workspace::new();
    ws.add_image("a.png", 10, 10);

    let report = ws.commands().images("3").unwrap();
    assert!(matches!(report, Report::NothingToDo { .. }));
}
