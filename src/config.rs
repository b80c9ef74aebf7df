//! Configuration module for pdfops.
//!
//! Turns command-line arguments into a validated configuration. Folder
//! locations are always explicit here and are passed to the collaborators
//! that need them; nothing reads a global working folder.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{PdfOpsError, Result};
use crate::io::OverwriteMode;

/// Default folder holding input PDFs.
pub const DEFAULT_PDF_DIR: &str = "pdfs";

/// Default folder holding input images.
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Default folder receiving every output.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Complete configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Folder listed for PDF inputs.
    pub pdf_dir: PathBuf,

    /// Folder listed for image inputs.
    pub image_dir: PathBuf,

    /// Folder outputs are written to.
    pub output_dir: PathBuf,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Dry run mode - plan and transform without writing.
    pub dry_run: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_dir: PathBuf::from(DEFAULT_PDF_DIR),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            verbose: false,
            quiet: false,
            dry_run: false,
            overwrite_mode: OverwriteMode::default(),
        }
    }
}

impl Config {
    /// Configuration rooted at `base`, using the default folder names.
    pub fn rooted_at(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            pdf_dir: base.join(DEFAULT_PDF_DIR),
            image_dir: base.join(DEFAULT_IMAGE_DIR),
            output_dir: base.join(DEFAULT_OUTPUT_DIR),
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::InvalidConfig`] if:
    /// - Verbose and quiet modes are both enabled
    /// - The output folder is also an input folder
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(PdfOpsError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        for input in [&self.pdf_dir, &self.image_dir] {
            if input == &self.output_dir {
                return Err(PdfOpsError::invalid_config(format!(
                    "Output folder cannot be the same as an input folder: {}",
                    self.output_dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Create the input and output folders if they are missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.pdf_dir, &self.image_dir, &self.output_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Where an output called `name` goes.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}

impl TryFrom<&Cli> for Config {
    type Error = PdfOpsError;

    fn try_from(cli: &Cli) -> Result<Self> {
        let overwrite_mode = if cli.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Force
        };

        let config = Self {
            pdf_dir: cli.pdf_dir.clone(),
            image_dir: cli.image_dir.clone(),
            output_dir: cli.output_dir.clone(),
            verbose: cli.verbose,
            quiet: cli.quiet,
            dry_run: cli.dry_run,
            overwrite_mode,
        };

        config.validate()?;
        Ok(config)
    }
}
