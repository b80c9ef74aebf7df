//! Collaborators the transform engine works through.
//!
//! The engine only sees the traits in this module. The `lopdf`, `image`
//! and filesystem implementations live in the submodules.

pub mod image;
pub mod listing;
pub mod reader;
pub mod writer;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::pages::PageIndex;

pub use image::{DecodedImage, RasterDecoder};
pub use listing::{ContentKind, FsLister};
pub use reader::{PdfPage, PdfReader, SourceDocument};
pub use writer::{OverwriteMode, PdfWriter};

/// An opaque page that can be turned.
pub trait RotatablePage: Clone {
    /// Current orientation in degrees, in `0..360`.
    fn rotation(&self) -> i64;

    /// Add `delta` degrees to the orientation, modulo 360.
    fn rotate(&mut self, delta: i64);
}

/// An opened document.
pub trait PageSource {
    /// Page handle type.
    type Page: RotatablePage;

    /// Where the document was read from.
    fn path(&self) -> &Path;

    /// Number of pages.
    fn page_count(&self) -> usize;

    /// The page at 1-based `index`.
    fn page(&self, index: PageIndex) -> Result<Self::Page>;
}

/// Opens documents.
pub trait DocumentReader {
    /// Page handle type shared by all documents from this reader.
    type Page: RotatablePage;
    /// Opened document type.
    type Document: PageSource<Page = Self::Page>;

    /// Open the document at `path`.
    ///
    /// Fails with [`crate::PdfOpsError::UnreadableDocument`].
    fn open(&self, path: &Path) -> Result<Self::Document>;
}

/// Persists an ordered page list as one document.
pub trait DocumentWriter<P> {
    /// Write `pages` to `destination`.
    ///
    /// Fails with [`crate::PdfOpsError::Write`]; nothing is left at
    /// `destination` on failure.
    fn write(&self, pages: &[P], destination: &Path) -> Result<()>;
}

/// Decodes images.
pub trait ImageDecoder {
    /// Decoded image type.
    type Image;

    /// Decode the image at `path`.
    ///
    /// Fails with [`crate::PdfOpsError::UnreadableImage`].
    fn decode(&self, path: &Path) -> Result<Self::Image>;
}

/// Lists candidate input files in a folder.
pub trait DirectoryLister {
    /// Files in `folder` matching `kind`, sorted by file name.
    fn list(&self, folder: &Path, kind: ContentKind) -> Result<Vec<PathBuf>>;
}
