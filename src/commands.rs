//! One function per user-facing operation.
//!
//! Each command takes fully-resolved arguments, lists its inputs, plans,
//! transforms and (unless this is a dry run) writes the result into the
//! output folder. An empty selection comes back as
//! [`Report::NothingToDo`], never as an error.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use crate::cli::DirectionArg;
use crate::config::Config;
use crate::error::Result;
use crate::io::{
    ContentKind, DirectoryLister, DocumentWriter, FsLister, PdfPage, PdfReader, PdfWriter,
    RasterDecoder,
};
use crate::naming::OutputNamer;
use crate::pages::{Angle, Direction, PageRangeSet, RotationSpec, RotationTarget};
use crate::plan::{SourceItem, choose, plan};
use crate::transform::{OutputArtifact, Outcome, TransformEngine};

/// Numbered inputs available to the operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    /// Folder the documents were listed from.
    pub pdf_dir: PathBuf,
    /// PDF documents, in the order their numbers refer to.
    pub documents: Vec<SourceItem>,
    /// Folder the images were listed from.
    pub image_dir: PathBuf,
    /// Images, in the order their numbers refer to.
    pub images: Vec<SourceItem>,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// The output was written.
    Written {
        /// Where it was written.
        path: PathBuf,
        /// Number of pages written.
        pages: usize,
        /// Progress events of the transform.
        progress: Vec<String>,
    },
    /// Dry run: the output that would have been written.
    DryRun {
        /// Where it would go.
        path: PathBuf,
        /// Number of pages it would have.
        pages: usize,
        /// Progress events of the transform.
        progress: Vec<String>,
    },
    /// The selection was empty; nothing was written.
    NothingToDo {
        /// Why there was nothing to do.
        reason: String,
        /// Progress events up to that point.
        progress: Vec<String>,
    },
}

impl Report {
    /// Progress events of the underlying transform.
    pub fn progress(&self) -> &[String] {
        match self {
            Self::Written { progress, .. }
            | Self::DryRun { progress, .. }
            | Self::NothingToDo { progress, .. } => progress,
        }
    }
}

/// The operations, wired to the filesystem collaborators.
#[derive(Debug, Clone)]
pub struct Commands {
    config: Config,
    engine: TransformEngine<PdfReader>,
    reader: PdfReader,
    writer: PdfWriter,
    decoder: RasterDecoder,
    lister: FsLister,
}

impl Commands {
    /// Commands naming outputs after the current minute.
    pub fn new(config: Config) -> Self {
        Self::with_namer(config, OutputNamer::now())
    }

    /// Commands using a fixed namer.
    pub fn with_namer(config: Config, namer: OutputNamer) -> Self {
        let reader = PdfReader::new();
        let writer = PdfWriter::new().with_overwrite(config.overwrite_mode);
        Self {
            engine: TransformEngine::new(reader, namer),
            config,
            reader,
            writer,
            decoder: RasterDecoder::new(),
            lister: FsLister::new(),
        }
    }

    /// Numbered PDFs, with page counts where readable.
    pub fn available_documents(&self) -> Result<Vec<SourceItem>> {
        let paths = self.lister.list(&self.config.pdf_dir, ContentKind::Documents)?;
        Ok(paths.iter().map(|path| self.reader.inspect(path)).collect())
    }

    /// Numbered images.
    pub fn available_images(&self) -> Result<Vec<SourceItem>> {
        let paths = self.lister.list(&self.config.image_dir, ContentKind::Images)?;
        Ok(paths.into_iter().map(SourceItem::file).collect())
    }

    /// Everything the other commands can refer to by number.
    pub fn inventory(&self) -> Result<Inventory> {
        Ok(Inventory {
            pdf_dir: self.config.pdf_dir.clone(),
            documents: self.available_documents()?,
            image_dir: self.config.image_dir.clone(),
            images: self.available_images()?,
        })
    }

    /// Merge the PDFs numbered in `order` (e.g. `"3,1,2"`).
    #[instrument(skip(self))]
    pub fn merge(&self, order: &str) -> Result<Report> {
        let available = self.available_documents()?;
        let planned = plan(order, &available)?;
        self.deliver(self.engine.merge(&planned))
    }

    /// Copy the pages in `pages` of PDF number `doc`.
    #[instrument(skip(self))]
    pub fn split(&self, doc: usize, pages: &str) -> Result<Report> {
        let requested = PageRangeSet::parse(pages)?;
        let available = self.available_documents()?;
        let source = choose(doc, &available)?;

        match self.engine.split(source, &requested)? {
            Outcome::Completed(artifact) => self.deliver(Ok(artifact)),
            Outcome::NothingSelected { progress } => Ok(Report::NothingToDo {
                reason: format!("No valid pages selected from {}", source.display_name()),
                progress,
            }),
        }
    }

    /// Rotate PDF number `doc`.
    ///
    /// `pages` is `all` or a page-range expression.
    #[instrument(skip(self))]
    pub fn rotate(&self, doc: usize, angle: Angle, direction: Direction, pages: &str) -> Result<Report> {
        let spec = RotationSpec::new(angle, direction, RotationTarget::parse(pages)?);
        let available = self.available_documents()?;
        let source = choose(doc, &available)?;
        self.deliver(self.engine.rotate(source, &spec))
    }

    /// Build a PDF from the images numbered in `order`.
    #[instrument(skip(self))]
    pub fn images(&self, order: &str) -> Result<Report> {
        let available = self.available_images()?;
        let planned = plan(order, &available)?;
        self.deliver(self.engine.compose_images(&self.decoder, &planned))
    }

    fn deliver(&self, transformed: Result<OutputArtifact<PdfPage>>) -> Result<Report> {
        let artifact = match transformed {
            Ok(artifact) => artifact,
            Err(err) if err.is_empty_selection() => {
                return Ok(Report::NothingToDo {
                    reason: err.to_string(),
                    progress: Vec::new(),
                });
            }
            Err(err) => return Err(err),
        };

        let path = self.config.output_path(&artifact.name);
        let pages = artifact.page_count();

        if self.config.dry_run {
            info!(path = %path.display(), pages, "Dry run, not writing");
            return Ok(Report::DryRun {
                path,
                pages,
                progress: artifact.progress,
            });
        }

        self.writer.write(&artifact.pages, &path)?;
        Ok(Report::Written {
            path,
            pages,
            progress: artifact.progress,
        })
    }
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Clockwise => Self::Clockwise,
            DirectionArg::CounterClockwise => Self::CounterClockwise,
        }
    }
}
