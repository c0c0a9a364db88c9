//! Core barcode types and algorithms.
//!
//! - [`Prefix`]: A registered two-letter code and its numeric counterpart
//! - [`Checksum`]: The verification letter carried by the human barcode
//! - [`SangerBarcode`]: Converts between the three barcode forms and validates them
//! - [`ean`]: The EAN-13 style check digit appended to the machine barcode
//!
//! ## Barcode Forms
//!
//! | Form | Example |
//! |------|---------|
//! | Prefix + number | `PR`, `1234` |
//! | Human | `PR1234K` |
//! | Machine | `4500001234757` |
//!
//! The machine form is laid out as `[prefix][number:7][checksum:2][check digit:1]`,
//! where the checksum slot holds the code point of the human checksum letter.
//!
//! [`Prefix`]: prefix::Prefix
//! [`Checksum`]: checksum::Checksum
//! [`SangerBarcode`]: barcode::SangerBarcode

pub mod barcode;
pub mod checksum;
pub mod ean;
pub mod error;
pub mod prefix;
