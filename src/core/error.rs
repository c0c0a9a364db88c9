use thiserror::Error;

/// Failures raised while building or deriving a barcode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BarcodeError {
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    #[error("Invalid barcode: {0}")]
    InvalidBarcode(String),

    #[error("You must supply a complete barcode, including the final letter (eg. DN12345R)")]
    ChecksumRequired,

    #[error("You must provide either a prefix and a number, or a human or machine barcode")]
    ConstructionError,

    #[error("Number {0} is too big to generate a barcode (maximum 7 digits)")]
    NumberTooLong(u64),

    #[error("Checksum character {0:?} does not fit the two-digit machine slot")]
    InvalidChecksum(char),
}
