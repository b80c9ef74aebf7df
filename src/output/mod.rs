//! Output formatting and display for pdfops.
//!
//! All user-facing console output goes through [`OutputFormatter`];
//! diagnostics go through `tracing` instead.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::commands::{Inventory, Report};
use crate::error::Result;
use crate::plan::SourceItem;

/// Display the numbered inputs.
pub fn display_inventory(formatter: &OutputFormatter, inventory: &Inventory) {
    formatter.section(&format!("PDF files in {}:", inventory.pdf_dir.display()));
    if inventory.documents.is_empty() {
        formatter.info("  (none)");
    }
    for (position, item) in inventory.documents.iter().enumerate() {
        formatter.list_item(position + 1, &describe_document(item));
    }

    formatter.section(&format!("Images in {}:", inventory.image_dir.display()));
    if inventory.images.is_empty() {
        formatter.info("  (none)");
    }
    for (position, item) in inventory.images.iter().enumerate() {
        formatter.list_item(position + 1, &item.display_name());
    }
}

/// Display the inventory as pretty-printed JSON.
pub fn display_inventory_json(formatter: &OutputFormatter, inventory: &Inventory) -> Result<()> {
    let json = serde_json::to_string_pretty(inventory)
        .map_err(|err| crate::PdfOpsError::invalid_config(err.to_string()))?;
    formatter.raw(&json);
    Ok(())
}

/// Display what a command did, progress first.
pub fn display_report(formatter: &OutputFormatter, report: &Report) {
    for event in report.progress() {
        formatter.info(event);
    }

    match report {
        Report::Written { path, pages, .. } => {
            formatter.success(&format!("Created {} ({})", path.display(), pages_label(*pages)));
        }
        Report::DryRun { path, pages, .. } => {
            formatter.success("Dry run completed successfully");
            formatter.info(&format!("  Output would be: {} ({})", path.display(), pages_label(*pages)));
            formatter.info("  Run without --dry-run to create it");
        }
        Report::NothingToDo { reason, .. } => formatter.warning(reason),
    }
}

fn describe_document(item: &SourceItem) -> String {
    match item.page_count {
        Some(count) => format!("{} ({})", item.display_name(), pages_label(count)),
        None => format!("{} (unreadable)", item.display_name()),
    }
}

fn pages_label(count: usize) -> String {
    if count == 1 {
        "1 page".to_string()
    } else {
        format!("{count} pages")
    }
}
