use serde::{Deserialize, Serialize};

use crate::core::error::BarcodeError;

/// Added to the `0..23` remainder to land on a printable letter (`'A'..='W'`)
pub const CHECKSUM_ASCII_OFFSET: u8 = b'A';

/// Modulus of the human checksum
pub const CHECKSUM_MODULUS: u32 = 23;

/// Width of the checksum slot in the machine barcode
pub const MACHINE_CHECKSUM_WIDTH: usize = 2;

/// The verification character carried by a barcode.
///
/// `human` is the printed letter; `machine` is its code point rendered as two
/// decimal digits. Both encodings always describe the same byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum {
    byte: u8,
}

impl Checksum {
    /// Wrap a checksum character
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::InvalidChecksum` if the character's code point
    /// needs more than two decimal digits.
    pub fn from_human(human: char) -> Result<Self, BarcodeError> {
        match u8::try_from(human) {
            Ok(byte) if byte < 100 => Ok(Self { byte }),
            _ => Err(BarcodeError::InvalidChecksum(human)),
        }
    }

    /// Parse the two-digit checksum slot of a machine barcode
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::InvalidBarcode` if the slot is not exactly two digits.
    pub fn from_machine_digits(digits: &str) -> Result<Self, BarcodeError> {
        if digits.len() != MACHINE_CHECKSUM_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BarcodeError::InvalidBarcode(format!(
                "{digits} is not a valid checksum slot"
            )));
        }
        let byte = digits
            .parse::<u8>()
            .map_err(|e| BarcodeError::InvalidBarcode(e.to_string()))?;
        Ok(Self { byte })
    }

    /// Compute the human checksum for a prefix and number.
    ///
    /// The prefix and decimal number are concatenated and reversed; each byte is
    /// weighted by its 1-based position and the sum reduced modulo 23.
    #[must_use]
    pub fn calculate(prefix: &str, number: u64) -> Self {
        let text = format!("{prefix}{number}");
        let sum: u32 = text
            .bytes()
            .rev()
            .zip(1u32..)
            .map(|(byte, position)| u32::from(byte) * position)
            .sum();
        // remainder < 23, so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation)]
        let remainder = (sum % CHECKSUM_MODULUS) as u8;
        Self {
            byte: remainder + CHECKSUM_ASCII_OFFSET,
        }
    }

    #[must_use]
    pub fn human(&self) -> char {
        char::from(self.byte)
    }

    /// Fixed-width decimal code point, e.g. `"75"` for `'K'`
    #[must_use]
    pub fn machine(&self) -> String {
        format!("{:0width$}", self.byte, width = MACHINE_CHECKSUM_WIDTH)
    }

    /// Numeric code point as embedded in the inner machine code
    #[must_use]
    pub fn byte(&self) -> u8 {
        self.byte
    }
}

impl std::fmt::Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.human())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_known_value() {
        let checksum = Checksum::calculate("PR", 1234);
        assert_eq!(checksum.human(), 'K');
        assert_eq!(checksum.machine(), "75");
        assert_eq!(checksum.byte(), 75);
    }

    #[test]
    fn test_calculate_other_values() {
        assert_eq!(Checksum::calculate("DN", 1).human(), 'S');
        assert_eq!(Checksum::calculate("NT", 9_999_999).human(), 'D');
        assert_eq!(Checksum::calculate("PR", 101_234).human(), 'R');
    }

    #[test]
    fn test_checksum_range_is_printable() {
        for number in 0..500 {
            let human = Checksum::calculate("DN", number).human();
            assert!(('A'..='W').contains(&human), "{human:?} out of range");
        }
    }

    #[test]
    fn test_encodings_agree() {
        let from_human = Checksum::from_human('K').unwrap();
        let from_machine = Checksum::from_machine_digits("75").unwrap();
        assert_eq!(from_human, from_machine);
        assert_eq!(from_machine.human(), 'K');
        assert_eq!(from_human.machine(), "75");
    }

    #[test]
    fn test_machine_is_zero_padded() {
        let checksum = Checksum::from_machine_digits("07").unwrap();
        assert_eq!(checksum.machine(), "07");
    }

    #[test]
    fn test_from_human_rejects_wide_code_points() {
        assert_eq!(
            Checksum::from_human('z'),
            Err(BarcodeError::InvalidChecksum('z'))
        );
        assert!(Checksum::from_human('é').is_err());
    }

    #[test]
    fn test_from_machine_digits_rejects_bad_slots() {
        assert!(Checksum::from_machine_digits("7").is_err());
        assert!(Checksum::from_machine_digits("7a").is_err());
        assert!(Checksum::from_machine_digits("750").is_err());
    }
}
