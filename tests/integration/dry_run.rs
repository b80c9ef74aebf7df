//! Integration tests for dry-run mode.

use pdfops::commands::{Commands, Report};
use pdfops::naming::OutputNamer;

use crate::common::{STAMP, Workspace};

fn dry_run_commands(ws: &Workspace) -> Commands {
    let mut config = ws.config.clone();
    config.dry_run = true;
    Commands::with_namer(config, OutputNamer::with_timestamp(STAMP))
}

#[test]
fn test_dry_run_does_not_create_output() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", &["A1", "A2"]);

    let report = dry_run_commands(&ws).merge("1").unwrap();

    match report {
        Report::DryRun { path, pages, progress } => {
            assert_eq!(path, ws.output(&format!("merged_ordered_{STAMP}.pdf")));
            assert_eq!(pages, 2);
            assert!(!progress.is_empty());
        }
        other => panic!("expected dry run, got {other:?}"),
    }
    assert!(ws.outputs().is_empty());
}

#[test]
fn test_dry_run_still_reads_inputs() {
    let ws = Workspace::new();
    ws.add_raw_pdf("broken.pdf", b"not a pdf");

    let result = dry_run_commands(&ws).split(1, "1");
    assert!(matches!(
        result,
        Err(pdfops::PdfOpsError::UnreadableDocument { .. })
    ));
}
