//! pdfops - merge, split, rotate and assemble PDF files.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pdfops::cli::{Cli, Command};
use pdfops::commands::{Commands, Inventory, Report};
use pdfops::config::Config;
use pdfops::error::{PdfOpsError, Result};
use pdfops::output::{OutputFormatter, display_inventory, display_inventory_json, display_report};
use pdfops::pages::Angle;

/// What ran, ready to display.
enum Executed {
    Inventory { inventory: Inventory, json: bool },
    Report(Report),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        OutputFormatter::default().error(&format!("Error: {err}"));
        process::exit(err.exit_code());
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "pdfops=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    let config = Config::try_from(&cli)?;
    let formatter = OutputFormatter::from_config(&config);

    if formatter.is_verbose() {
        formatter.section(&format!("{} v{}", pdfops::NAME, pdfops::VERSION));
    }
    formatter.debug(&format!("PDF folder: {}", config.pdf_dir.display()));
    formatter.debug(&format!("Image folder: {}", config.image_dir.display()));
    formatter.debug(&format!("Output folder: {}", config.output_dir.display()));
    if config.dry_run {
        formatter.info("DRY RUN MODE - No files will be created");
    }

    config.ensure_dirs()?;

    let commands = Commands::new(config);
    let command = cli.command;

    // lopdf and image are blocking
    let executed = tokio::task::spawn_blocking(move || execute(&commands, command))
        .await
        .map_err(|err| PdfOpsError::Task {
            message: err.to_string(),
        })??;

    match executed {
        Executed::Inventory { inventory, json } if json => {
            display_inventory_json(&formatter, &inventory)?
        }
        Executed::Inventory { inventory, .. } => display_inventory(&formatter, &inventory),
        Executed::Report(report) => display_report(&formatter, &report),
    }

    Ok(())
}

fn execute(commands: &Commands, command: Command) -> Result<Executed> {
    let report = match command {
        Command::List { json } => {
            return Ok(Executed::Inventory {
                inventory: commands.inventory()?,
                json,
            });
        }
        Command::Merge { order } => commands.merge(&order)?,
        Command::Split { doc, pages } => commands.split(doc, &pages)?,
        Command::Rotate {
            doc,
            angle,
            direction,
            pages,
        } => commands.rotate(doc, Angle::from_degrees(angle)?, direction.into(), &pages)?,
        Command::Images { order } => commands.images(&order)?,
    };
    Ok(Executed::Report(report))
}
