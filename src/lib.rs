//! # sanger-barcode
//!
//! A library for converting laboratory sample barcodes between their three
//! equivalent forms.
//!
//! Tubes and plates are labelled with a two-letter prefix and a sequence number.
//! People read the label as a human barcode with a checksum letter (`PR1234K`);
//! scanners read a 13-digit EAN value (`4500001234757`). Both carry independent
//! checks, so a mistyped label or misread scan is detected rather than silently
//! resolving to the wrong sample.
//!
//! ## Features
//!
//! - **Three-way conversion**: prefix + number, human and machine forms
//! - **Checksum letter**: position-weighted mod-23 checksum over prefix and number
//! - **EAN check digit**: alternating-weight mod-10 digit for scanners
//! - **Prefix registry**: embedded, build-validated and replaceable at runtime
//! - **Legacy API**: free functions matching the historical barcode helpers
//!
//! ## Example
//!
//! ```rust
//! use sanger_barcode::SangerBarcode;
//!
//! let scanned = SangerBarcode::from_machine(4_500_001_234_757).unwrap();
//! assert!(scanned.is_valid());
//! assert_eq!(scanned.human_barcode(), Some("PR1234K"));
//!
//! let typed = SangerBarcode::from_human("PR1234K").unwrap();
//! assert_eq!(typed.machine_barcode().unwrap(), 4_500_001_234_757);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Prefix registry storage and lookup
//! - [`core`]: Prefix, checksum and barcode types
//! - [`legacy`]: Historical convenience functions
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod legacy;

// Re-export commonly used types for convenience
pub use catalog::store::{CatalogError, PrefixRegistry};
pub use core::barcode::{BarcodeSummary, SangerBarcode};
pub use core::checksum::Checksum;
pub use core::error::BarcodeError;
pub use core::prefix::Prefix;
