//! pdfops - merge, split, rotate and assemble PDF files.
//!
//! The crate is split the way the work flows:
//!
//! - [`pages`] parses page-range expressions and rotation requests and
//!   resolves them against a document's page count.
//! - [`plan`] resolves user-given orderings against the available inputs.
//! - [`transform`] runs merge, split, rotate and image composition over
//!   the collaborator traits in [`io`].
//! - [`naming`] names the outputs.
//! - [`commands`] wires it all to the configured folders.
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::commands::Commands;
//! use pdfops::config::Config;
//!
//! # fn main() -> pdfops::Result<()> {
//! let commands = Commands::new(Config::default());
//! let report = commands.merge("2,1")?;
//! println!("{:?}", report);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod io;
pub mod naming;
pub mod output;
pub mod pages;
pub mod plan;
pub mod transform;

pub use error::{PdfOpsError, Result};

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
