//! CLI argument parsing for pdfops.
//!
//! Each operation is its own subcommand taking fully-resolved arguments;
//! there is no interactive prompting. Numbers given to `--order` and
//! `--doc` refer to the positions shown by `pdfops list`.
//!
//! This file only depends on `clap` so `build.rs` can include it to render
//! the man page.
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Reading PDFs from {}", cli.pdf_dir.display());
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Merge, split, rotate and assemble PDF files.
///
/// pdfops works on three folders: one holding input PDFs, one holding
/// input images, and one receiving every output. Outputs are named after
/// their source, the operation and the current minute.
#[derive(Parser, Debug)]
#[command(name = "pdfops")]
#[command(version)]
#[command(about = "Merge, split, rotate and assemble PDF files", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Folder holding input PDF files
    #[arg(long, global = true, value_name = "DIR", env = "PDFOPS_PDF_DIR", default_value = "pdfs")]
    pub pdf_dir: PathBuf,

    /// Folder holding input images (PNG, JPEG)
    #[arg(long, global = true, value_name = "DIR", env = "PDFOPS_IMAGE_DIR", default_value = "images")]
    pub image_dir: PathBuf,

    /// Folder receiving generated PDF files
    #[arg(long, global = true, value_name = "DIR", env = "PDFOPS_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Dry run - plan the operation and show the output name without writing
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Verbose output - show every progress step and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    /// Useful for scripts and automation.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never overwrite an existing output file
    ///
    /// Two runs of the same operation within one minute produce the same
    /// output name. By default the later run replaces the earlier file;
    /// with this flag it fails instead.
    #[arg(long, global = true)]
    pub no_clobber: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// The operations.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the numbered PDFs and images available as inputs
    List {
        /// Print the inventory as JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge PDFs in the given order into one document
    ///
    /// Example:
    ///   pdfops merge --order 3,1,2
    Merge {
        /// Comma-separated PDF numbers, e.g. "3,1,2"; repeats are allowed
        #[arg(short, long, value_name = "LIST")]
        order: String,
    },

    /// Copy selected pages of one PDF into a new document
    ///
    /// Example:
    ///   pdfops split --doc 2 --pages 1-3,7
    Split {
        /// Number of the PDF to split
        #[arg(short, long, value_name = "N")]
        doc: usize,

        /// Page ranges to keep, e.g. "1-3,5,7"
        #[arg(short, long, value_name = "RANGE")]
        pages: String,
    },

    /// Rotate pages of one PDF, keeping page order
    ///
    /// Example:
    ///   pdfops rotate --doc 1 --angle 90 --direction cc --pages all
    Rotate {
        /// Number of the PDF to rotate
        #[arg(short, long, value_name = "N")]
        doc: usize,

        /// Rotation in degrees
        #[arg(short, long, value_name = "DEGREES", value_parser = parse_angle)]
        angle: u16,

        /// Rotation direction: c (clockwise) or cc (counter-clockwise)
        #[arg(short = 'r', long, value_enum, default_value = "c")]
        direction: DirectionArg,

        /// Pages to rotate: "all" or page ranges such as "1-3,5"
        #[arg(short, long, value_name = "RANGE", default_value = "all")]
        pages: String,
    },

    /// Turn images into a PDF, one page per image
    ///
    /// Example:
    ///   pdfops images --order 2,1
    Images {
        /// Comma-separated image numbers, e.g. "2,1"
        #[arg(short, long, value_name = "LIST")]
        order: String,
    },
}

/// Rotation direction as typed on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    /// Clockwise
    #[value(name = "c", alias = "cw")]
    Clockwise,
    /// Counter-clockwise
    #[value(name = "cc", alias = "ccw")]
    CounterClockwise,
}

/// Accept only quarter turns.
fn parse_angle(value: &str) -> Result<u16, String> {
    match value.trim().parse::<u16>() {
        Ok(degrees @ (90 | 180 | 270)) => Ok(degrees),
        _ => Err(format!("invalid rotation '{value}': must be 90, 180, or 270")),
    }
}
