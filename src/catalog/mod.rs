//! Prefix registry storage and lookup.
//!
//! The registry maps each two-letter prefix to the numeric code embedded in
//! machine barcodes. An embedded registry is compiled into the binary and
//! validated by `build.rs`; custom registries can be loaded from JSON files.
//!
//! ## Example
//!
//! ```rust
//! use sanger_barcode::PrefixRegistry;
//!
//! let registry = PrefixRegistry::load_embedded().unwrap();
//! let prefix = registry.from_human("PR").unwrap();
//! assert_eq!(prefix.machine, 450);
//! assert_eq!(registry.from_machine(450).unwrap().human, "PR");
//! ```
//!
//! ## Custom Registries
//!
//! ```rust,no_run
//! use sanger_barcode::{PrefixRegistry, SangerBarcode};
//! use std::path::Path;
//!
//! let registry = PrefixRegistry::load_from_file(Path::new("my_prefixes.json")).unwrap();
//! let barcode = SangerBarcode::from_components_in(&registry, "PR", 1234).unwrap();
//! ```

pub mod store;
