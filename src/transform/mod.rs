//! The page operations: merge, split, rotate and image composition.
//!
//! Every operation opens its inputs through the collaborators in
//! [`crate::io`], builds a new ordered page list and names it. Nothing is
//! written here; the caller hands the [`OutputArtifact`] to a
//! [`crate::io::DocumentWriter`]. Sources are never modified.

mod progress;

use std::collections::BTreeSet;

use tracing::{info, instrument};

use crate::error::{PdfOpsError, Result};
use crate::io::{DocumentReader, ImageDecoder, PageSource, RotatablePage};
use crate::naming::{
    IMAGES_BASE, IMAGES_TAG, MERGE_BASE, MERGE_TAG, OutputNamer, ROTATE_TAG, SPLIT_TAG,
};
use crate::pages::range::to_page_index;
use crate::pages::{PageIndex, PageRangeSet, RotationSpec, RotationTarget, select};
use crate::plan::{SequencePlan, SourceItem};

pub use progress::ProgressLog;

/// A named, ordered page list ready to be written.
#[derive(Debug, Clone)]
pub struct OutputArtifact<P> {
    /// Output file name, without a folder.
    pub name: String,
    /// Pages in output order.
    pub pages: Vec<P>,
    /// Human-readable progress events, in the order they happened.
    pub progress: Vec<String>,
}

impl<P> OutputArtifact<P> {
    /// Number of pages in the artifact.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Result of an operation that may legitimately select nothing.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    /// The operation produced an output.
    Completed(T),
    /// The selection came out empty; there is nothing to write.
    NothingSelected {
        /// Progress events up to the point the selection was resolved.
        progress: Vec<String>,
    },
}

impl<T> Outcome<T> {
    /// The output, if any.
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::NothingSelected { .. } => None,
        }
    }
}

/// Runs page operations against a document reader.
#[derive(Debug, Clone)]
pub struct TransformEngine<R> {
    reader: R,
    namer: OutputNamer,
}

impl<R> TransformEngine<R>
where
    R: DocumentReader,
{
    /// Create an engine naming its outputs with `namer`.
    pub fn new(reader: R, namer: OutputNamer) -> Self {
        Self { reader, namer }
    }

    /// Concatenate every page of every planned document, in plan order.
    ///
    /// Pages keep their order within each document. A document planned
    /// twice contributes its pages twice.
    ///
    /// # Errors
    ///
    /// [`PdfOpsError::EmptyPlan`] for an empty plan, or the reader's error
    /// for the first document that cannot be opened.
    #[instrument(skip_all, fields(documents = plan.len()))]
    pub fn merge(&self, plan: &SequencePlan) -> Result<OutputArtifact<R::Page>> {
        if plan.is_empty() {
            return Err(PdfOpsError::EmptyPlan);
        }

        let mut progress = ProgressLog::new();
        let mut pages = Vec::new();
        let total = plan.len();

        for (position, item) in plan.items().iter().enumerate() {
            progress.event(format!(
                "[{}/{total}] Processing: {}",
                position + 1,
                item.display_name()
            ));

            let document = self.reader.open(&item.path)?;
            let added = document.page_count();
            for index in 1..=to_page_index(added) {
                pages.push(document.page(index)?);
            }

            progress.event(format!("  → {added} pages added ({} so far)", pages.len()));
        }

        progress.event(format!("Total pages: {}", pages.len()));
        let name = self.namer.name::<&str>(MERGE_BASE, MERGE_TAG, &[]);
        info!(pages = pages.len(), %name, "Merge planned");

        Ok(OutputArtifact {
            name,
            pages,
            progress: progress.into_events(),
        })
    }

    /// Copy the requested pages of `source`, ascending.
    ///
    /// Requested pages past the end of the document are ignored. When none
    /// remain the result is [`Outcome::NothingSelected`].
    ///
    /// # Errors
    ///
    /// The reader's error if `source` cannot be opened.
    #[instrument(skip_all, fields(path = %source.path.display(), requested = %requested))]
    pub fn split(
        &self,
        source: &SourceItem,
        requested: &PageRangeSet,
    ) -> Result<Outcome<OutputArtifact<R::Page>>> {
        let mut progress = ProgressLog::new();
        let document = self.reader.open(&source.path)?;
        progress.event(format!(
            "{} has {} pages",
            source.display_name(),
            document.page_count()
        ));
        let selected = select(requested, document.page_count());

        if selected.is_empty() {
            progress.event(format!(
                "No valid pages selected from {} ({} pages)",
                source.display_name(),
                document.page_count()
            ));
            return Ok(Outcome::NothingSelected {
                progress: progress.into_events(),
            });
        }

        let mut pages = Vec::with_capacity(selected.len());
        for index in selected {
            pages.push(document.page(index)?);
            progress.event(format!("Page {index} added"));
        }

        let name = self.namer.name::<&str>(&source.stem(), SPLIT_TAG, &[]);
        info!(pages = pages.len(), %name, "Split planned");

        Ok(Outcome::Completed(OutputArtifact {
            name,
            pages,
            progress: progress.into_events(),
        }))
    }

    /// Turn the targeted pages of `source`, keeping every page in place.
    ///
    /// Rotation adds to each page's current orientation.
    ///
    /// # Errors
    ///
    /// [`PdfOpsError::EmptyTarget`] when no targeted page exists in the
    /// document, or the reader's error if `source` cannot be opened.
    #[instrument(skip_all, fields(path = %source.path.display(), delta = spec.delta()))]
    pub fn rotate(&self, source: &SourceItem, spec: &RotationSpec) -> Result<OutputArtifact<R::Page>> {
        let mut progress = ProgressLog::new();
        let document = self.reader.open(&source.path)?;
        let total = document.page_count();
        progress.event(format!("{} has {total} pages", source.display_name()));

        let targets: BTreeSet<PageIndex> = match &spec.target {
            RotationTarget::All => PageRangeSet::all(total).iter().collect(),
            RotationTarget::Pages(requested) => select(requested, total).into_iter().collect(),
        };
        if targets.is_empty() {
            return Err(PdfOpsError::EmptyTarget {
                path: source.path.clone(),
            });
        }

        let delta = spec.delta();
        let mut pages = Vec::with_capacity(total);
        for index in 1..=to_page_index(total) {
            let mut page = document.page(index)?;
            if targets.contains(&index) {
                page.rotate(delta);
                progress.event(format!(
                    "Page {index} rotated {} degrees {}",
                    spec.angle.as_degrees(),
                    spec.direction
                ));
            } else {
                progress.event(format!("Page {index} left as is"));
            }
            pages.push(page);
        }

        let extra = [spec.angle.as_degrees().to_string(), spec.direction.code().to_string()];
        let name = self.namer.name(&source.stem(), ROTATE_TAG, &extra);
        info!(rotated = targets.len(), pages = pages.len(), %name, "Rotation planned");

        Ok(OutputArtifact {
            name,
            pages,
            progress: progress.into_events(),
        })
    }

    /// One page per planned image, in plan order.
    ///
    /// # Errors
    ///
    /// [`PdfOpsError::EmptyPlan`] for an empty plan, or the decoder's error
    /// for the first image that cannot be read.
    #[instrument(skip_all, fields(images = plan.len()))]
    pub fn compose_images<D>(&self, decoder: &D, plan: &SequencePlan) -> Result<OutputArtifact<R::Page>>
    where
        D: ImageDecoder,
        D::Image: Into<R::Page>,
    {
        if plan.is_empty() {
            return Err(PdfOpsError::EmptyPlan);
        }

        let mut progress = ProgressLog::new();
        let mut pages = Vec::with_capacity(plan.len());
        let total = plan.len();

        for (position, item) in plan.items().iter().enumerate() {
            let image = decoder.decode(&item.path)?;
            pages.push(image.into());
            progress.event(format!(
                "[{}/{total}] Added image: {}",
                position + 1,
                item.display_name()
            ));
        }

        let name = self.namer.name::<&str>(IMAGES_BASE, IMAGES_TAG, &[]);
        info!(pages = pages.len(), %name, "Image composition planned");

        Ok(OutputArtifact {
            name,
            pages,
            progress: progress.into_events(),
        })
    }
}
