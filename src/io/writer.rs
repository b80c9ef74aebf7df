//! PDF writing.
//!
//! Output documents are always assembled fresh: each page handle is copied
//! into a new `lopdf` document together with everything it references,
//! then the document is written to a temporary sibling file and renamed
//! into place, so a failed write never leaves a partial output behind.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ::image::RgbImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tracing::{debug, info, instrument, warn};

use super::DocumentWriter;
use super::reader::{INHERITABLE, PageContent, PdfPage, inherited_attribute};
use crate::error::{PdfOpsError, Result};
use crate::io::RotatablePage;

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Replace an existing file silently.
    #[default]
    Force,
    /// Never overwrite, error if the file exists.
    NoClobber,
}

/// Writes page lists as PDF files.
#[derive(Debug, Clone, Copy)]
pub struct PdfWriter {
    overwrite: OverwriteMode,
    compress: bool,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    /// Create a writer that compresses streams and overwrites silently.
    pub fn new() -> Self {
        Self {
            overwrite: OverwriteMode::Force,
            compress: true,
        }
    }

    /// Set the overwrite behaviour.
    pub fn with_overwrite(mut self, overwrite: OverwriteMode) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Assemble `pages` into a new in-memory document.
    pub fn assemble(&self, pages: &[PdfPage]) -> Result<Document> {
        let mut assembler = PageAssembler::new();
        for page in pages {
            assembler.push(page)?;
        }
        let mut document = assembler.finish();
        if self.compress {
            document.compress();
        }
        Ok(document)
    }

    fn check_overwrite(&self, destination: &Path) -> Result<()> {
        if self.overwrite == OverwriteMode::NoClobber && destination.exists() {
            return Err(PdfOpsError::OutputExists {
                path: destination.to_path_buf(),
            });
        }
        Ok(())
    }
}

impl DocumentWriter<PdfPage> for PdfWriter {
    #[instrument(skip_all, fields(path = %destination.display(), pages = pages.len()))]
    fn write(&self, pages: &[PdfPage], destination: &Path) -> Result<()> {
        self.check_overwrite(destination)?;

        let mut document = self
            .assemble(pages)
            .map_err(|err| PdfOpsError::write(destination, err.to_string()))?;

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| PdfOpsError::write(destination, err.to_string()))?;
        }

        let staging = staging_path(destination);
        if let Err(err) = save(&mut document, &staging) {
            let _ = std::fs::remove_file(&staging);
            return Err(PdfOpsError::write(destination, err));
        }

        std::fs::rename(&staging, destination).map_err(|err| {
            let _ = std::fs::remove_file(&staging);
            PdfOpsError::write(destination, err.to_string())
        })?;

        info!("Wrote PDF");
        Ok(())
    }
}

fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    destination.with_file_name(name)
}

fn save(document: &mut Document, path: &Path) -> std::result::Result<(), String> {
    let file = File::create(path).map_err(|err| err.to_string())?;
    let mut writer = BufWriter::new(file);
    document
        .save_to(&mut writer)
        .map_err(|err| err.to_string())?;
    writer.flush().map_err(|err| err.to_string())
}

/// Builds a new document page by page.
///
/// Objects are copied once per source document; references between copied
/// objects are rewritten to the new ids. A reference to a page that is not
/// part of the output becomes `null`.
struct PageAssembler {
    target: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    /// (source document, source id) to id in `target`.
    imported: HashMap<(usize, ObjectId), ObjectId>,
    /// Keeps sources alive so their addresses stay unique keys.
    sources: Vec<Arc<Document>>,
}

impl PageAssembler {
    fn new() -> Self {
        let mut target = Document::with_version("1.5");
        let pages_id = target.new_object_id();
        Self {
            target,
            pages_id,
            kids: Vec::new(),
            imported: HashMap::new(),
            sources: Vec::new(),
        }
    }

    fn push(&mut self, page: &PdfPage) -> Result<()> {
        let id = match page.content() {
            PageContent::Imported { path, document, id } => {
                self.push_imported(path, document, *id)?
            }
            PageContent::Image(pixels) => self.push_image(pixels),
        };

        if let Ok(dict) = self.target.get_dictionary_mut(id) {
            match page.rotation() {
                0 => {
                    dict.remove(b"Rotate");
                }
                degrees => dict.set("Rotate", Object::Integer(degrees)),
            }
        }

        self.kids.push(Object::Reference(id));
        Ok(())
    }

    fn push_imported(
        &mut self,
        path: &Path,
        source: &Arc<Document>,
        page_id: ObjectId,
    ) -> Result<ObjectId> {
        let key = Arc::as_ptr(source) as usize;
        if !self.sources.iter().any(|kept| Arc::ptr_eq(kept, source)) {
            self.sources.push(Arc::clone(source));
        }

        let mut page = source
            .get_dictionary(page_id)
            .map_err(|err| PdfOpsError::unreadable_document(path, format!("page {page_id:?}: {err}")))?
            .clone();

        for attribute in INHERITABLE {
            if page.get(attribute).is_err()
                && let Some(value) = inherited_attribute(source, page_id, attribute)
            {
                page.set(attribute.to_vec(), value);
            }
        }
        page.remove(b"Parent");

        // Reuse an id reserved by an earlier reference to this page, unless
        // the page was already placed once.
        let new_id = match self.imported.get(&(key, page_id)) {
            Some(&reserved) if !self.target.objects.contains_key(&reserved) => reserved,
            _ => {
                let fresh = self.target.new_object_id();
                self.imported.entry((key, page_id)).or_insert(fresh);
                fresh
            }
        };
        // Placeholder so self-references resolve to this id while copying.
        self.target.objects.insert(new_id, Object::Null);

        let mut copy = self.import_dictionary(source, key, &page);
        copy.set("Parent", Object::Reference(self.pages_id));
        self.target.objects.insert(new_id, Object::Dictionary(copy));
        Ok(new_id)
    }

    fn push_image(&mut self, pixels: &RgbImage) -> ObjectId {
        let (width, height) = pixels.dimensions();
        let (width, height) = (i64::from(width), i64::from(height));

        let image_id = self.target.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => Object::Integer(8),
            },
            pixels.as_raw().clone(),
        ));

        // One image pixel per point, the image filling the page
        let content = format!("q\n{width} 0 0 {height} 0 0 cm\n/Im0 Do\nQ\n");
        let content_id = self
            .target
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        self.target.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(height),
            ],
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im0" => image_id,
                },
            },
            "Contents" => content_id,
        })
    }

    fn import_reference(&mut self, source: &Document, key: usize, id: ObjectId) -> ObjectId {
        if let Some(&mapped) = self.imported.get(&(key, id)) {
            return mapped;
        }

        let mapped = self.target.new_object_id();
        self.imported.insert((key, id), mapped);

        match source.get_object(id) {
            // Pages are only copied when placed; see `finish`.
            Ok(Object::Dictionary(dict)) if is_page(dict) => {}
            Ok(object) => {
                let copy = self.import_value(source, key, object);
                self.target.objects.insert(mapped, copy);
            }
            Err(err) => {
                warn!(?id, %err, "Cannot resolve reference, using null");
                self.target.objects.insert(mapped, Object::Null);
            }
        }

        mapped
    }

    fn import_value(&mut self, source: &Document, key: usize, object: &Object) -> Object {
        match object {
            Object::Reference(id) => Object::Reference(self.import_reference(source, key, *id)),
            Object::Dictionary(dict) => Object::Dictionary(self.import_dictionary(source, key, dict)),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.import_value(source, key, item))
                    .collect(),
            ),
            Object::Stream(stream) => {
                let mut copy = stream.clone();
                copy.dict = self.import_dictionary(source, key, &stream.dict);
                Object::Stream(copy)
            }
            other => other.clone(),
        }
    }

    fn import_dictionary(&mut self, source: &Document, key: usize, dict: &Dictionary) -> Dictionary {
        let mut copy = Dictionary::new();
        for (name, value) in dict.iter() {
            let value = self.import_value(source, key, value);
            copy.set(name.clone(), value);
        }
        copy
    }

    fn finish(mut self) -> Document {
        // References to pages that never made it into the output
        let dangling: Vec<ObjectId> = self
            .imported
            .values()
            .filter(|id| !self.target.objects.contains_key(*id))
            .copied()
            .collect();
        for id in dangling {
            self.target.objects.insert(id, Object::Null);
        }

        let count = self.kids.len() as i64;
        self.target.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => Object::Integer(count),
            }),
        );

        let catalog_id = self.target.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.target.trailer.set("Root", catalog_id);

        debug!(pages = count, objects = self.target.objects.len(), "Document assembled");
        self.target
    }
}

fn is_page(dict: &Dictionary) -> bool {
    dict.get(b"Type")
        .and_then(Object::as_name)
        .map(|name| name == b"Page")
        .unwrap_or(false)
}
