//! Error types for pdfops.
//!
//! Every fallible operation in the crate returns [`PdfOpsError`]. Parse
//! failures carry the offending token, collaborator failures carry the path
//! they were working on, so the CLI can print a useful diagnostic.
//!
//! An empty selection after filtering is *not* an error for split (see
//! [`crate::transform::Outcome`]); merge and rotate report it through
//! [`PdfOpsError::EmptyPlan`] and [`PdfOpsError::EmptyTarget`], which
//! [`PdfOpsError::is_empty_selection`] lets callers tell apart from genuine
//! failures.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfops operations.
pub type Result<T> = std::result::Result<T, PdfOpsError>;

/// Main error type for pdfops operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfOpsError {
    /// A page-range expression contained a token that is neither an integer
    /// nor a `start-end` pair.
    #[error("Invalid page range token '{token}': {reason}")]
    MalformedRange {
        /// The offending token, as typed.
        token: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An ordering expression contained a token that is not an integer.
    #[error("Invalid order token '{token}': expected a number such as 3,2,1")]
    MalformedOrder {
        /// The offending token, as typed.
        token: String,
    },

    /// Nothing to merge or compose.
    #[error("Nothing to do: the plan is empty")]
    EmptyPlan,

    /// None of the requested pages exist in the document to rotate.
    #[error("No valid pages selected to rotate in {}", .path.display())]
    EmptyTarget {
        /// Document the rotation was requested on.
        path: PathBuf,
    },

    /// A document could not be opened or parsed.
    #[error("Failed to read PDF: {}\n  Reason: {reason}", .path.display())]
    UnreadableDocument {
        /// Path of the document.
        path: PathBuf,
        /// Reason reported by the decoder.
        reason: String,
    },

    /// An image could not be opened or decoded.
    #[error("Failed to read image: {}\n  Reason: {reason}", .path.display())]
    UnreadableImage {
        /// Path of the image.
        path: PathBuf,
        /// Reason reported by the decoder.
        reason: String,
    },

    /// The output document could not be written.
    #[error("Failed to write output file: {}\n  Reason: {reason}", .path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// A single-item pick (the document to split or rotate) was out of range.
    #[error("Invalid choice {index}: pick a number between 1 and {available}")]
    InvalidChoice {
        /// The 1-based number that was requested.
        index: usize,
        /// Number of items on offer.
        available: usize,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Wait a minute or drop --no-clobber to overwrite it",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Invalid configuration or command-line argument.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what is wrong.
        message: String,
    },

    /// A blocking task could not be joined.
    #[error("Background task failed: {message}")]
    Task {
        /// Join error description.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl PdfOpsError {
    /// Create a MalformedRange error.
    pub fn malformed_range(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRange {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create a MalformedOrder error.
    pub fn malformed_order(token: impl Into<String>) -> Self {
        Self::MalformedOrder {
            token: token.into(),
        }
    }

    /// Create an UnreadableDocument error.
    pub fn unreadable_document(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnreadableDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnreadableImage error.
    pub fn unreadable_image(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnreadableImage {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a Write error.
    pub fn write(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error only means "the selection came out empty".
    ///
    /// The CLI reports these as a notice rather than a failure.
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::EmptyPlan | Self::EmptyTarget { .. })
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MalformedRange { .. } => 1,
            Self::MalformedOrder { .. } => 1,
            Self::InvalidChoice { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::EmptyPlan => 0,
            Self::EmptyTarget { .. } => 0,
            Self::UnreadableDocument { .. } => 3,
            Self::UnreadableImage { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::Write { .. } => 5,
            Self::Io { .. } => 5,
            Self::Task { .. } => 6,
        }
    }
}
