//! Finding input files in a folder.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use super::DirectoryLister;
use crate::error::{PdfOpsError, Result};

/// What kind of files to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// PDF documents.
    Documents,
    /// PNG and JPEG pictures.
    Images,
}

impl ContentKind {
    /// File name patterns for this kind, matched case-insensitively.
    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            Self::Documents => &["*.pdf"],
            Self::Images => &["*.png", "*.jpg", "*.jpeg"],
        }
    }

    fn matcher(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in self.patterns() {
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|err| PdfOpsError::invalid_config(err.to_string()))?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|err| PdfOpsError::invalid_config(err.to_string()))
    }
}

/// Lists files directly inside a folder (no recursion).
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl FsLister {
    /// Create a new lister.
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryLister for FsLister {
    fn list(&self, folder: &Path, kind: ContentKind) -> Result<Vec<PathBuf>> {
        if !folder.is_dir() {
            return Err(PdfOpsError::invalid_config(format!(
                "Folder does not exist: {}",
                folder.display()
            )));
        }

        let matcher = kind.matcher()?;
        let mut found = Vec::new();

        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|err| PdfOpsError::Io {
                source: err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            })?;

            if entry.file_type().is_file() && matcher.is_match(entry.file_name()) {
                found.push(entry.into_path());
            }
        }

        tracing::debug!(folder = %folder.display(), ?kind, count = found.len(), "Listed inputs");
        Ok(found)
    }
}
