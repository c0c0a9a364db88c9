//! Free functions kept for callers of the historical barcode API.
//!
//! Each is a thin pass-through to [`SangerBarcode`]. A few lookup-style calls
//! return `Ok(None)` for a malformed barcode instead of an error, because
//! existing callers probe with them rather than assert. Only
//! `BarcodeError::InvalidBarcode` is downgraded that way; every other failure
//! still propagates.

use crate::core::barcode::SangerBarcode;
use crate::core::error::BarcodeError;
use crate::core::prefix::Prefix;

/// Turn `InvalidBarcode` into `None`, leaving other errors alone
fn absent_if_invalid<T>(result: Result<T, BarcodeError>) -> Result<Option<T>, BarcodeError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(BarcodeError::InvalidBarcode(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Split a machine barcode into `(machine_prefix, number, machine_checksum)`
///
/// # Errors
///
/// Propagates any construction error from [`SangerBarcode::from_machine`].
pub fn split_barcode(code: u64) -> Result<(String, u64, String), BarcodeError> {
    Ok(SangerBarcode::from_machine(code)?.split_barcode())
}

/// Split a human barcode into `(human_prefix, number, human_checksum)`
///
/// # Errors
///
/// Propagates any construction error from [`SangerBarcode::from_human`].
pub fn split_human_barcode(code: &str) -> Result<(String, String, char), BarcodeError> {
    Ok(SangerBarcode::from_human(code)?.split_human_barcode())
}

/// The sequence number of a machine barcode as text, e.g. `"1234"`
///
/// # Errors
///
/// Returns `Ok(None)` for a malformed barcode; an unknown prefix is still an error.
pub fn number_to_human(code: u64) -> Result<Option<String>, BarcodeError> {
    absent_if_invalid(SangerBarcode::from_machine(code).map(|bc| bc.number().to_string()))
}

/// The two-letter prefix of a machine barcode, e.g. `"PR"`
///
/// # Errors
///
/// Returns `Ok(None)` for a malformed barcode; an unknown prefix is still an error.
pub fn prefix_from_barcode(code: u64) -> Result<Option<String>, BarcodeError> {
    absent_if_invalid(
        SangerBarcode::from_machine(code).map(|bc| bc.prefix().human().to_string()),
    )
}

/// Numeric prefix to its two-letter form
///
/// # Errors
///
/// Returns `BarcodeError::UnknownPrefix` if the code is not registered.
pub fn prefix_to_human(machine_prefix: u32) -> Result<String, BarcodeError> {
    Ok(Prefix::from_machine(machine_prefix)?.human)
}

/// Two-letter prefix to its scaled numeric form, e.g. `PR` -> `450_000_000_000`
///
/// # Errors
///
/// Returns `BarcodeError::UnknownPrefix` if the code is not registered.
pub fn prefix_to_number(human_prefix: &str) -> Result<u64, BarcodeError> {
    Ok(Prefix::from_human(human_prefix)?.machine_full())
}

/// Convert a human barcode to its scanner value, rejecting mistyped input
///
/// # Errors
///
/// Returns `BarcodeError::InvalidBarcode` if the barcode parses but fails validation.
pub fn human_to_machine_barcode(code: &str) -> Result<u64, BarcodeError> {
    let barcode = SangerBarcode::from_human(code)?;
    if !barcode.is_valid() {
        return Err(BarcodeError::InvalidBarcode(
            "The human readable barcode was invalid, perhaps it was mistyped?".to_string(),
        ));
    }
    barcode.machine_barcode()
}

/// Convert a scanner value to its human form.
///
/// `Ok(None)` both for a malformed value and for one that fails validation.
///
/// # Errors
///
/// Returns `BarcodeError::UnknownPrefix` if the prefix is not registered.
pub fn barcode_to_human(code: u64) -> Result<Option<String>, BarcodeError> {
    let barcode = absent_if_invalid(SangerBarcode::from_machine(code))?;
    Ok(barcode.and_then(|bc| bc.human_barcode().map(str::to_string)))
}

/// Convert a scanner value to its human form, failing loudly.
///
/// When `expected_prefix` is given, the decoded prefix must match it.
///
/// # Errors
///
/// Returns `BarcodeError::InvalidBarcode` if the value is malformed, fails
/// validation or carries a different prefix.
pub fn barcode_to_human_strict(
    code: u64,
    expected_prefix: Option<&str>,
) -> Result<String, BarcodeError> {
    let barcode = SangerBarcode::from_machine(code)?;
    let human = barcode.human_barcode().map(str::to_string);

    if let Some(expected) = expected_prefix {
        if barcode.prefix().human() != expected {
            return Err(BarcodeError::InvalidBarcode(format!(
                "Barcode {code} ({}) does not match prefix {expected}",
                human.as_deref().unwrap_or("")
            )));
        }
    }

    human.ok_or_else(|| BarcodeError::InvalidBarcode(format!("Barcode {code} appears to be invalid")))
}

/// Verify the EAN check digit of a scanner value
///
/// # Errors
///
/// Propagates any construction error from [`SangerBarcode::from_machine`].
pub fn check_ean(code: u64) -> Result<bool, BarcodeError> {
    Ok(SangerBarcode::from_machine(code)?.check_ean())
}

/// Scanner value for a prefix and number
///
/// # Errors
///
/// Returns `BarcodeError::UnknownPrefix` or `BarcodeError::NumberTooLong`.
pub fn calculate_barcode(human_prefix: &str, number: u64) -> Result<u64, BarcodeError> {
    SangerBarcode::from_components(human_prefix, number)?.machine_barcode()
}

/// Checksum letter for a prefix and number
///
/// # Errors
///
/// Returns `BarcodeError::UnknownPrefix` if the prefix is not registered.
pub fn calculate_checksum(human_prefix: &str, number: u64) -> Result<char, BarcodeError> {
    Ok(SangerBarcode::from_components(human_prefix, number)?
        .checksum()
        .human())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EAN13: u64 = 4_500_001_234_757;

    #[test]
    fn test_prefix_conversions() {
        assert_eq!(prefix_to_number("PR").unwrap(), 450_000_000_000);
        assert_eq!(prefix_to_human(450).unwrap(), "PR");
        assert!(prefix_to_human(999).is_err());
    }

    #[test]
    fn test_calculations() {
        assert_eq!(calculate_barcode("PR", 1234).unwrap(), EAN13);
        assert_eq!(calculate_checksum("PR", 1234).unwrap(), 'K');
        assert_eq!(
            calculate_barcode("PR", 12_345_678).unwrap_err(),
            BarcodeError::NumberTooLong(12_345_678)
        );
    }

    #[test]
    fn test_splits() {
        assert_eq!(
            split_barcode(EAN13).unwrap(),
            ("450".to_string(), 1234, "75".to_string())
        );
        assert_eq!(
            split_human_barcode("PR1234K").unwrap(),
            ("PR".to_string(), "1234".to_string(), 'K')
        );
    }

    #[test]
    fn test_lookups() {
        assert_eq!(number_to_human(EAN13).unwrap().as_deref(), Some("1234"));
        assert_eq!(prefix_from_barcode(EAN13).unwrap().as_deref(), Some("PR"));
        assert_eq!(barcode_to_human(EAN13).unwrap().as_deref(), Some("PR1234K"));
    }

    #[test]
    fn test_lookups_swallow_malformed_input() {
        assert_eq!(number_to_human(1234).unwrap(), None);
        assert_eq!(prefix_from_barcode(1234).unwrap(), None);
        assert_eq!(barcode_to_human(1234).unwrap(), None);
    }

    #[test]
    fn test_lookups_keep_unknown_prefix_errors() {
        // 999 is not registered
        assert!(matches!(
            number_to_human(9_990_000_001_234),
            Err(BarcodeError::UnknownPrefix(_))
        ));
    }

    #[test]
    fn test_barcode_to_human_of_invalid_value() {
        assert_eq!(barcode_to_human(4_500_101_234_757).unwrap(), None);
    }

    #[test]
    fn test_human_machine_round_trip() {
        assert_eq!(human_to_machine_barcode("PR1234K").unwrap(), EAN13);
        assert!(matches!(
            human_to_machine_barcode("PR1234A"),
            Err(BarcodeError::InvalidBarcode(_))
        ));
        assert!(matches!(
            human_to_machine_barcode("XX1234X"),
            Err(BarcodeError::UnknownPrefix(_))
        ));
    }

    #[test]
    fn test_barcode_to_human_strict() {
        assert_eq!(
            barcode_to_human_strict(EAN13, Some("PR")).unwrap(),
            "PR1234K"
        );
        assert_eq!(barcode_to_human_strict(EAN13, None).unwrap(), "PR1234K");
        assert!(matches!(
            barcode_to_human_strict(EAN13, Some("XX")),
            Err(BarcodeError::InvalidBarcode(_))
        ));
        assert!(barcode_to_human_strict(4_500_101_234_757, Some("PR")).is_err());
    }

    #[test]
    fn test_check_ean() {
        assert!(check_ean(EAN13).unwrap());
        assert!(!check_ean(4_500_101_234_757).unwrap());
        assert!(!check_ean(EAN13 + 1).unwrap());
    }
}
