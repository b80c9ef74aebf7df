//! PDF reading.
//!
//! Documents are loaded whole with `lopdf` and shared behind an [`Arc`], so
//! page handles stay cheap to clone and the source is never mutated.
//! Rotation lives on the handle; the writer applies it when the page is
//! copied into the output.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ::image::RgbImage;
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, instrument};

use super::image::DecodedImage;
use super::{DocumentReader, PageSource, RotatablePage};
use crate::error::{PdfOpsError, Result};
use crate::pages::{PageIndex, accumulate};
use crate::plan::SourceItem;

/// Page-tree attributes a page may inherit from its ancestors.
pub(crate) const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against malformed, cyclic `/Parent` chains.
const MAX_TREE_DEPTH: usize = 64;

/// What a page is made of.
#[derive(Debug, Clone)]
pub(crate) enum PageContent {
    /// A page of an existing document.
    Imported {
        path: PathBuf,
        document: Arc<Document>,
        id: ObjectId,
    },
    /// A full-page raster image.
    Image(Arc<RgbImage>),
}

/// A page handle: where the page comes from plus its orientation.
#[derive(Debug, Clone)]
pub struct PdfPage {
    content: PageContent,
    rotation: i64,
}

impl PdfPage {
    pub(crate) fn content(&self) -> &PageContent {
        &self.content
    }
}

impl RotatablePage for PdfPage {
    fn rotation(&self) -> i64 {
        self.rotation
    }

    fn rotate(&mut self, delta: i64) {
        self.rotation = accumulate(self.rotation, delta);
    }
}

impl From<DecodedImage> for PdfPage {
    fn from(image: DecodedImage) -> Self {
        Self {
            content: PageContent::Image(Arc::new(image.pixels)),
            rotation: 0,
        }
    }
}

/// A loaded PDF document.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    document: Arc<Document>,
    /// Page object ids in page order.
    pages: Vec<ObjectId>,
}

impl SourceDocument {
    /// Wrap an in-memory document.
    pub fn new(path: impl Into<PathBuf>, document: Document) -> Self {
        let pages = document.get_pages().into_values().collect();
        Self {
            path: path.into(),
            document: Arc::new(document),
            pages,
        }
    }
}

impl PageSource for SourceDocument {
    type Page = PdfPage;

    fn path(&self) -> &Path {
        &self.path
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: PageIndex) -> Result<PdfPage> {
        let id = index
            .checked_sub(1)
            .and_then(|offset| self.pages.get(offset as usize))
            .copied()
            .ok_or_else(|| {
                PdfOpsError::unreadable_document(
                    &self.path,
                    format!(
                        "page {index} not found (document has {} pages)",
                        self.pages.len()
                    ),
                )
            })?;

        let rotation = inherited_attribute(&self.document, id, b"Rotate")
            .and_then(|value| rotation_degrees(&value))
            .unwrap_or(0);

        Ok(PdfPage {
            content: PageContent::Imported {
                path: self.path.clone(),
                document: Arc::clone(&self.document),
                id,
            },
            rotation: accumulate(rotation, 0),
        })
    }
}

/// Opens PDF files with `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Describe a document for listing and planning.
    ///
    /// An unreadable document is still listed, without a page count; it
    /// only fails once an operation actually needs its pages.
    pub fn inspect(&self, path: &Path) -> SourceItem {
        match self.open(path) {
            Ok(document) => SourceItem::document(path, document.page_count()),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Listing unreadable PDF");
                SourceItem::file(path)
            }
        }
    }
}

impl DocumentReader for PdfReader {
    type Page = PdfPage;
    type Document = SourceDocument;

    #[instrument(skip_all, fields(path = %path.display()))]
    fn open(&self, path: &Path) -> Result<SourceDocument> {
        let document = Document::load(path).map_err(|err| {
            let reason = err.to_string();
            if reason.contains("encrypt") || reason.contains("password") {
                PdfOpsError::unreadable_document(path, format!("PDF is encrypted: {reason}"))
            } else {
                PdfOpsError::unreadable_document(path, reason)
            }
        })?;

        let source = SourceDocument::new(path, document);
        debug!(pages = source.page_count(), "PDF loaded");
        Ok(source)
    }
}

/// Read a `/Rotate` value. Some writers store it as a real; it is snapped
/// to the nearest quarter turn.
fn rotation_degrees(value: &Object) -> Option<i64> {
    match value {
        Object::Integer(degrees) => Some(*degrees),
        Object::Real(degrees) => Some((f64::from(*degrees) / 90.0).round() as i64 * 90),
        _ => None,
    }
}

/// Look up `key` on a page, walking up the page tree when the page itself
/// does not carry it.
pub(crate) fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_dictionary(node).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(match value {
                Object::Reference(id) => doc.get_object(*id).ok()?.clone(),
                other => other.clone(),
            });
        }
        node = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}
