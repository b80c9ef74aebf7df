//! Shared fixtures for the integration tests.
//!
//! Every test gets its own temporary folder tree with real PDFs written by
//! `lopdf` and real pictures written by `image`.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use lopdf::{Document, Object, Stream, dictionary};
use pdfops::commands::Commands;
use pdfops::config::Config;
use pdfops::io::{DocumentReader, PageSource, PdfReader, RotatablePage};
use pdfops::naming::OutputNamer;
use tempfile::TempDir;

/// Timestamp every output name is stamped with.
pub const STAMP: &str = "20260102_0304";

/// A temporary `pdfs/`, `images/`, `output/` tree.
pub struct Workspace {
    dir: TempDir,
    pub config: Config,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config::rooted_at(dir.path());
        config.ensure_dirs().expect("Failed to create folders");
        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Commands over this tree with a fixed timestamp.
    pub fn commands(&self) -> Commands {
        Commands::with_namer(self.config.clone(), OutputNamer::with_timestamp(STAMP))
    }

    /// Write a PDF whose pages show `labels`, one label per page.
    pub fn add_pdf(&self, name: &str, labels: &[&str]) -> PathBuf {
        let rotations = vec![0; labels.len()];
        self.add_rotated_pdf(name, labels, &rotations)
    }

    /// Like [`Workspace::add_pdf`] with a `/Rotate` per page.
    pub fn add_rotated_pdf(&self, name: &str, labels: &[&str], rotations: &[i64]) -> PathBuf {
        let path = self.config.pdf_dir.join(name);
        let mut doc = labelled_document(labels, rotations);
        doc.save(&path).expect("Failed to save fixture PDF");
        path
    }

    /// Write an arbitrary file into the PDF folder.
    pub fn add_raw_pdf(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.config.pdf_dir.join(name);
        std::fs::write(&path, bytes).expect("Failed to write fixture");
        path
    }

    /// Write a solid-colour picture; the format follows the extension.
    pub fn add_image(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.config.image_dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([200, 40, 40]))
            .save(&path)
            .expect("Failed to save fixture image");
        path
    }

    pub fn output(&self, name: &str) -> PathBuf {
        self.config.output_dir.join(name)
    }

    pub fn outputs(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.config.output_dir)
            .expect("Failed to read output folder")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// A document with one text page per label. Page size and font live on
/// the page tree root so copies must resolve inherited attributes.
pub fn labelled_document(labels: &[&str], rotations: &[i64]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for (label, rotation) in labels.iter().zip(rotations) {
        let content = format!("BT /F1 24 Tf 72 720 Td ({label}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if *rotation != 0 {
            page.set("Rotate", Object::Integer(*rotation));
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(labels.len() as i64),
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// The label shown on each page of the PDF at `path`, in page order.
pub fn page_labels(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load output");
    doc.get_pages()
        .into_values()
        .map(|id| {
            let content: Vec<u8> = doc
                .get_page_contents(id)
                .into_iter()
                .filter_map(|stream_id| doc.get_object(stream_id).and_then(Object::as_stream).ok())
                .flat_map(|stream| {
                    stream
                        .decompressed_content()
                        .unwrap_or_else(|_| stream.content.clone())
                })
                .collect();
            let text = String::from_utf8_lossy(&content).into_owned();
            let start = text.find('(').map(|i| i + 1).unwrap_or(0);
            let end = text[start..].find(')').map(|i| start + i).unwrap_or(start);
            text[start..end].to_string()
        })
        .collect()
}

/// Orientation of each page of the PDF at `path`.
pub fn page_rotations(path: &Path) -> Vec<i64> {
    let doc = PdfReader::new().open(path).expect("Failed to open output");
    (1..=doc.page_count() as u32)
        .map(|index| doc.page(index).expect("Missing page").rotation())
        .collect()
}

/// Media box of each page of the PDF at `path`.
pub fn media_boxes(path: &Path) -> Vec<Vec<i64>> {
    let doc = Document::load(path).expect("Failed to load output");
    doc.get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_dictionary(id).expect("Page is not a dictionary");
            page.get(b"MediaBox")
                .and_then(Object::as_array)
                .expect("Page has no MediaBox")
                .iter()
                .map(|value| value.as_i64().expect("Non-integer MediaBox"))
                .collect()
        })
        .collect()
}
