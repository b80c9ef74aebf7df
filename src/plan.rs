//! Ordering of input documents and images.
//!
//! The caller lists what is available; the user names items by their
//! 1-based position in that list.

use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PdfOpsError, Result};

/// One input document or image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceItem {
    /// Location of the file.
    pub path: PathBuf,
    /// Page count for documents; `None` for images or unreadable documents.
    pub page_count: Option<usize>,
}

impl SourceItem {
    /// A document whose page count is known.
    pub fn document(path: impl Into<PathBuf>, page_count: usize) -> Self {
        Self {
            path: path.into(),
            page_count: Some(page_count),
        }
    }

    /// An image, or a document whose page count could not be read.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            page_count: None,
        }
    }

    /// The file name as shown to the user.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// File name without its extension, used as the base of output names.
    pub fn stem(&self) -> String {
        file_stem(&self.path)
    }
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Source items in the order the user asked for. May repeat items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequencePlan {
    items: Vec<SourceItem>,
}

impl SequencePlan {
    /// Build a plan from items that are already resolved.
    pub fn new(items: Vec<SourceItem>) -> Self {
        Self { items }
    }

    /// The planned items, in order.
    pub fn items(&self) -> &[SourceItem] {
        &self.items
    }

    /// Number of planned items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing resolved. Callers treat this as "nothing to do".
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Resolve an ordering expression such as `"3,2,1"` against `available`.
///
/// Numbers are 1-based. Numbers outside `1..=available.len()` are dropped
/// silently; order and repeats are kept.
///
/// # Errors
///
/// Returns [`PdfOpsError::MalformedOrder`] for the first token that is not
/// an integer.
///
/// # Examples
///
/// ```
/// use pdfops::plan::{plan, SourceItem};
///
/// let available = vec![SourceItem::file("a.png"), SourceItem::file("b.png")];
/// let planned = plan("9,2,1", &available).unwrap();
/// assert_eq!(planned.items(), &[available[1].clone(), available[0].clone()]);
/// ```
pub fn plan(order_expression: &str, available: &[SourceItem]) -> Result<SequencePlan> {
    let mut positions = Vec::new();
    for token in order_expression.split(',') {
        let token = token.trim();
        match token.parse::<i64>() {
            Ok(position) => positions.push(position),
            // Too large for i64: still an integer, never in range
            Err(err)
                if matches!(
                    err.kind(),
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                ) => {}
            Err(_) => return Err(PdfOpsError::malformed_order(token)),
        }
    }

    let items = positions
        .into_iter()
        .filter_map(|position| {
            let index = usize::try_from(position.checked_sub(1)?).ok()?;
            available.get(index).cloned()
        })
        .collect();

    Ok(SequencePlan { items })
}

/// Resolve a single 1-based pick from `available`.
///
/// # Errors
///
/// Returns [`PdfOpsError::InvalidChoice`] when `index` is 0 or past the end.
pub fn choose(index: usize, available: &[SourceItem]) -> Result<&SourceItem> {
    index
        .checked_sub(1)
        .and_then(|position| available.get(position))
        .ok_or(PdfOpsError::InvalidChoice {
            index,
            available: available.len(),
        })
}
