//! Command-line interface for sanger-barcode.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **convert**: Derive every barcode form from one input form
//! - **validate**: Check one or more barcodes for transcription or scan errors
//! - **split**: Show the components of a barcode
//! - **prefixes**: List, show, or export the prefix registry
//!
//! ## Usage
//!
//! ```text
//! # Human barcode to scanner value
//! sanger-barcode convert --human PR1234K
//!
//! # Build from prefix and number
//! sanger-barcode convert --prefix PR --number 1234 --format json
//!
//! # Validate scanned values
//! sanger-barcode validate 4500001234757 4500001234758
//!
//! # Use a site-specific registry
//! sanger-barcode --catalog my_prefixes.json prefixes list
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::catalog::store::PrefixRegistry;

pub mod convert;
pub mod prefixes;
pub mod split;
pub mod validate;

#[derive(Parser)]
#[command(name = "sanger-barcode")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Convert and validate laboratory sample barcodes")]
#[command(
    long_about = "sanger-barcode converts sample barcodes between their three equivalent forms:\n\n- a two-letter prefix plus a sequence number (PR, 1234)\n- the human-readable label with its checksum letter (PR1234K)\n- the 13-digit EAN value read by scanners (4500001234757)\n\nand detects mistyped or misread barcodes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Path to custom prefix registry file
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Derive every form of a barcode from one input form
    Convert(convert::ConvertArgs),

    /// Validate barcodes (human or machine form)
    Validate(validate::ValidateArgs),

    /// Split a barcode into its components
    Split(split::SplitArgs),

    /// Inspect the prefix registry
    Prefixes(prefixes::PrefixesArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load the registry named by `--catalog`, or the embedded one
pub fn load_registry(catalog: Option<&Path>) -> anyhow::Result<PrefixRegistry> {
    let registry = if let Some(path) = catalog {
        debug!(path = %path.display(), "Loading custom prefix registry");
        PrefixRegistry::load_from_file(path)?
    } else {
        PrefixRegistry::load_embedded()?
    };
    Ok(registry)
}
