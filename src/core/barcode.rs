use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::store::PrefixRegistry;
use crate::core::checksum::Checksum;
use crate::core::ean::{calculate_ean13, is_valid_ean13};
use crate::core::error::BarcodeError;
use crate::core::prefix::Prefix;

/// Maximum number of decimal digits in the sequence number
pub const NUMBER_LENGTH: u32 = 7;

/// Smallest number that no longer fits the number field
const NUMBER_LIMIT: u64 = 10_u64.pow(NUMBER_LENGTH);

/// `[prefix][number:7][checksum:2][check digit:1]`
const MACHINE_BARCODE_PATTERN: &str = r"^(\d{1,3})(\d{7})(\d{2})(\d)$";

/// `[2 letters][1-7 digits][optional checksum letter]`
const HUMAN_BARCODE_PATTERN: &str = r"^([A-Z]{2})(\d{1,7})([A-Z])?$";

fn machine_barcode_format() -> &'static Regex {
    static FORMAT: OnceLock<Regex> = OnceLock::new();
    FORMAT.get_or_init(|| Regex::new(MACHINE_BARCODE_PATTERN).expect("static pattern compiles"))
}

fn human_barcode_format() -> &'static Regex {
    static FORMAT: OnceLock<Regex> = OnceLock::new();
    FORMAT.get_or_init(|| Regex::new(HUMAN_BARCODE_PATTERN).expect("static pattern compiles"))
}

/// A laboratory barcode in all three of its forms.
///
/// Build one from a prefix and number, a human-readable string (`PR1234K`) or a
/// scanned EAN-13 value (`4500001234757`); the other forms are derived on first
/// access and cached for the life of the value.
///
/// ```
/// use sanger_barcode::SangerBarcode;
///
/// let barcode = SangerBarcode::from_components("PR", 1234).unwrap();
/// assert_eq!(barcode.human_barcode(), Some("PR1234K"));
/// assert_eq!(barcode.machine_barcode().unwrap(), 4_500_001_234_757);
/// ```
#[derive(Debug, Clone)]
pub struct SangerBarcode {
    prefix: Prefix,
    number: u64,

    /// Explicit or parsed checksum, otherwise derived on demand
    checksum: OnceLock<Checksum>,

    /// The value read by a scanner, when built from machine form
    scanned: Option<u64>,

    machine_barcode: OnceLock<u64>,
    human_barcode: OnceLock<Option<String>>,
}

impl SangerBarcode {
    /// Build from an already resolved prefix and a number
    #[must_use]
    pub fn new(prefix: Prefix, number: u64) -> Self {
        Self {
            prefix,
            number,
            checksum: OnceLock::new(),
            scanned: None,
            machine_barcode: OnceLock::new(),
            human_barcode: OnceLock::new(),
        }
    }

    /// Store a caller-supplied checksum instead of deriving one.
    /// The checksum is trusted here; `is_valid` reports a mismatch.
    /// Any scanned value no longer describes the barcode and is dropped.
    #[must_use]
    pub fn with_checksum(mut self, checksum: Checksum) -> Self {
        self.checksum = OnceLock::from(checksum);
        self.scanned = None;
        self.human_barcode = OnceLock::new();
        self.machine_barcode = OnceLock::new();
        self
    }

    /// Build from a two-letter prefix and a number using the embedded registry
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::UnknownPrefix` if the prefix is not registered.
    pub fn from_components(prefix: &str, number: u64) -> Result<Self, BarcodeError> {
        Self::from_components_in(PrefixRegistry::global(), prefix, number)
    }

    /// Build from a two-letter prefix and a number using `registry`
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::UnknownPrefix` if the prefix is not registered.
    pub fn from_components_in(
        registry: &PrefixRegistry,
        prefix: &str,
        number: u64,
    ) -> Result<Self, BarcodeError> {
        Ok(Self::new(registry.from_human(prefix)?, number))
    }

    /// Parse a human-readable barcode; a missing checksum letter is derived
    ///
    /// # Errors
    ///
    /// See [`SangerBarcode::from_human_checked`].
    pub fn from_human(code: &str) -> Result<Self, BarcodeError> {
        Self::from_human_checked(code, false)
    }

    /// Parse a human-readable barcode such as `PR1234K`
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::InvalidBarcode` if the text does not match the
    /// human format, `BarcodeError::ChecksumRequired` if `checksum_required` is
    /// set and the trailing letter is missing, or `BarcodeError::UnknownPrefix`.
    pub fn from_human_checked(code: &str, checksum_required: bool) -> Result<Self, BarcodeError> {
        Self::from_human_in(PrefixRegistry::global(), code, checksum_required)
    }

    /// Parse a human-readable barcode against `registry`
    ///
    /// # Errors
    ///
    /// See [`SangerBarcode::from_human_checked`].
    pub fn from_human_in(
        registry: &PrefixRegistry,
        code: &str,
        checksum_required: bool,
    ) -> Result<Self, BarcodeError> {
        let captures = human_barcode_format().captures(code).ok_or_else(|| {
            BarcodeError::InvalidBarcode(
                "The human readable barcode was invalid, perhaps it was mistyped?".to_string(),
            )
        })?;

        let checksum_char = captures.get(3).and_then(|m| m.as_str().chars().next());
        if checksum_required && checksum_char.is_none() {
            return Err(BarcodeError::ChecksumRequired);
        }

        let prefix = registry.from_human(&captures[1])?;
        let number = captures[2]
            .parse::<u64>()
            .map_err(|e| BarcodeError::InvalidBarcode(e.to_string()))?;

        let barcode = Self::new(prefix, number);
        match checksum_char {
            Some(c) => Ok(barcode.with_checksum(Checksum::from_human(c)?)),
            None => Ok(barcode),
        }
    }

    /// Decode a scanned EAN-13 value using the embedded registry.
    ///
    /// The trailing check digit and checksum slot are not verified here; call
    /// [`SangerBarcode::is_valid`] to confirm integrity.
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::InvalidBarcode` if the value does not have the
    /// machine layout, or `BarcodeError::UnknownPrefix`.
    pub fn from_machine(code: u64) -> Result<Self, BarcodeError> {
        Self::from_machine_in(PrefixRegistry::global(), code)
    }

    /// Decode a scanned value given as text, e.g. straight from a reader
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::InvalidBarcode` if the text is not numeric, otherwise
    /// as [`SangerBarcode::from_machine`].
    pub fn from_machine_str(code: &str) -> Result<Self, BarcodeError> {
        Self::from_machine_str_in(PrefixRegistry::global(), code)
    }

    /// Decode a scanned value given as text against `registry`
    ///
    /// # Errors
    ///
    /// See [`SangerBarcode::from_machine_str`].
    pub fn from_machine_str_in(registry: &PrefixRegistry, code: &str) -> Result<Self, BarcodeError> {
        Self::from_machine_in(registry, parse_machine_text(code)?)
    }

    /// Decode a scanned EAN-13 value against `registry`
    ///
    /// # Errors
    ///
    /// See [`SangerBarcode::from_machine`].
    pub fn from_machine_in(registry: &PrefixRegistry, code: u64) -> Result<Self, BarcodeError> {
        let text = code.to_string();
        let captures = machine_barcode_format().captures(&text).ok_or_else(|| {
            BarcodeError::InvalidBarcode(format!("{code} is not a valid ean13 barcode"))
        })?;

        let machine_prefix = captures[1]
            .parse::<u32>()
            .map_err(|e| BarcodeError::InvalidBarcode(e.to_string()))?;
        let prefix = registry.from_machine(machine_prefix)?;
        let number = captures[2]
            .parse::<u64>()
            .map_err(|e| BarcodeError::InvalidBarcode(e.to_string()))?;
        let checksum = Checksum::from_machine_digits(&captures[3])?;

        Ok(Self {
            prefix,
            number,
            checksum: OnceLock::from(checksum),
            scanned: Some(code),
            machine_barcode: OnceLock::from(code),
            human_barcode: OnceLock::new(),
        })
    }

    /// Parse either form: all-digit input is read as a scanned value, anything
    /// else as a human barcode
    ///
    /// # Errors
    ///
    /// As [`SangerBarcode::from_machine_in`] or [`SangerBarcode::from_human_in`].
    pub fn parse_in(
        registry: &PrefixRegistry,
        code: &str,
        checksum_required: bool,
    ) -> Result<Self, BarcodeError> {
        let code = code.trim();
        if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) {
            Self::from_machine_str_in(registry, code)
        } else {
            Self::from_human_in(registry, code, checksum_required)
        }
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    /// The stored checksum, deriving it from prefix and number if none was given
    pub fn checksum(&self) -> Checksum {
        *self
            .checksum
            .get_or_init(|| self.calculate_checksum())
    }

    /// The checksum recomputed from prefix and number, ignoring any stored one
    #[must_use]
    pub fn calculate_checksum(&self) -> Checksum {
        Checksum::calculate(self.prefix.human(), self.number)
    }

    /// Whether the number fits, the checksum letter matches and the scanned
    /// check digit (if any) is consistent
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.number_fits() && self.calculate_checksum() == self.checksum() && self.check_ean()
    }

    /// Verify the trailing EAN digit of a scanned barcode.
    /// Barcodes not built from a scanned value have nothing to verify.
    #[must_use]
    pub fn check_ean(&self) -> bool {
        self.scanned.map_or(true, is_valid_ean13)
    }

    /// Human-readable form, e.g. `PR1234K`.
    ///
    /// `None` when the barcode is not valid; callers rely on the absence as an
    /// invalidity signal, so this never errors.
    pub fn human_barcode(&self) -> Option<&str> {
        self.human_barcode
            .get_or_init(|| self.calculate_human_barcode())
            .as_deref()
    }

    /// Full 13-digit scanner value with its EAN check digit
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::NumberTooLong` if the number has more than seven digits.
    pub fn machine_barcode(&self) -> Result<u64, BarcodeError> {
        if let Some(code) = self.machine_barcode.get() {
            return Ok(*code);
        }
        let inner = self.sanger_barcode()?;
        let code = inner * 10 + calculate_ean13(inner);
        debug!(prefix = %self.prefix, number = self.number, code, "Derived machine barcode");
        Ok(*self.machine_barcode.get_or_init(|| code))
    }

    /// `[machine_prefix, number, machine_checksum]`
    pub fn split_barcode(&self) -> (String, u64, String) {
        (
            self.prefix.machine_s(),
            self.number,
            self.checksum().machine(),
        )
    }

    /// `[human_prefix, number, human_checksum]`
    pub fn split_human_barcode(&self) -> (String, String, char) {
        (
            self.prefix.human().to_string(),
            self.number.to_string(),
            self.checksum().human(),
        )
    }

    /// Snapshot of every representation, for reporting
    pub fn summary(&self) -> BarcodeSummary {
        let checksum = self.checksum();
        BarcodeSummary {
            prefix: self.prefix.human().to_string(),
            machine_prefix: self.prefix.machine_code(),
            number: self.number,
            checksum: checksum.human(),
            machine_checksum: checksum.machine(),
            human_barcode: self.human_barcode().map(str::to_string),
            machine_barcode: self.machine_barcode().ok(),
            valid: self.is_valid(),
            check_ean: self.check_ean(),
        }
    }

    fn number_fits(&self) -> bool {
        self.number < NUMBER_LIMIT
    }

    fn calculate_human_barcode(&self) -> Option<String> {
        if !self.is_valid() {
            debug!(prefix = %self.prefix, number = self.number, "Barcode invalid, no human form");
            return None;
        }
        Some(format!(
            "{}{}{}",
            self.prefix.human(),
            self.number,
            self.checksum().human()
        ))
    }

    /// The 12-digit inner code: prefix, number and checksum byte
    fn sanger_barcode(&self) -> Result<u64, BarcodeError> {
        if !self.number_fits() {
            return Err(BarcodeError::NumberTooLong(self.number));
        }
        Ok(self.prefix.machine_full() + self.number * 100 + u64::from(self.checksum().byte()))
    }
}

impl FromStr for SangerBarcode {
    type Err = BarcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_in(PrefixRegistry::global(), s, false)
    }
}

fn parse_machine_text(code: &str) -> Result<u64, BarcodeError> {
    code.trim()
        .parse::<u64>()
        .map_err(|_| BarcodeError::InvalidBarcode(format!("{code} is not a valid ean13 barcode")))
}

/// Every representation of a barcode, as reported by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeSummary {
    pub prefix: String,
    pub machine_prefix: u32,
    pub number: u64,
    pub checksum: char,
    pub machine_checksum: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_barcode: Option<u64>,
    pub valid: bool,
    pub check_ean: bool,
}
