//! Output file naming.
//!
//! Names look like `<base>_<operation>[_<extra>...]_<YYYYMMDD_HHMM>.pdf`.
//! Two runs against the same source within the same minute produce the
//! same name; the later output replaces the earlier one unless the caller
//! refuses to overwrite.

use chrono::{DateTime, Local, TimeZone};

/// Extension of every generated file.
pub const EXTENSION: &str = "pdf";

/// Separator between name parts.
pub const DELIMITER: &str = "_";

/// Timestamp layout, minute resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Base name for merged outputs, which have no single source.
pub const MERGE_BASE: &str = "merged";

/// Base name for documents composed from images.
pub const IMAGES_BASE: &str = "images";

/// Operation tag for merge.
pub const MERGE_TAG: &str = "ordered";

/// Operation tag for split.
pub const SPLIT_TAG: &str = "selected_pages";

/// Operation tag for rotation.
pub const ROTATE_TAG: &str = "rotated_selected";

/// Operation tag for image composition.
pub const IMAGES_TAG: &str = "to_pdf";

/// Builds output names from a fixed timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNamer {
    timestamp: String,
}

impl OutputNamer {
    /// Namer stamped with the current local time.
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    /// Namer stamped with the given time.
    pub fn at<Tz: TimeZone>(time: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Namer using a literal, already formatted timestamp.
    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
        }
    }

    /// The timestamp part of every name.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Name an output.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfops::naming::OutputNamer;
    ///
    /// let namer = OutputNamer::with_timestamp("20260102_0304");
    /// assert_eq!(
    ///     namer.name("scan", "rotated_selected", &["90", "cc"]),
    ///     "scan_rotated_selected_90_cc_20260102_0304.pdf"
    /// );
    /// ```
    pub fn name<S: AsRef<str>>(&self, base: &str, operation: &str, extra: &[S]) -> String {
        name(base, operation, extra, &self.timestamp)
    }
}

/// Join the name parts and append the extension.
pub fn name<S: AsRef<str>>(base: &str, operation: &str, extra: &[S], timestamp: &str) -> String {
    let mut parts = vec![base, operation];
    parts.extend(extra.iter().map(AsRef::as_ref));
    parts.push(timestamp);
    format!("{}.{EXTENSION}", parts.join(DELIMITER))
}
