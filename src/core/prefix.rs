use serde::{Deserialize, Serialize};

use crate::catalog::store::PrefixRegistry;
use crate::core::error::BarcodeError;

/// Multiplier placing the numeric prefix in the leading digits of the 12-digit inner code
pub const MACHINE_PREFIX_SCALE: u64 = 1_000_000_000;

/// A registered barcode prefix, e.g. `PR` <-> `450`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prefix {
    /// Two-letter code printed on the label
    pub human: String,

    /// Numeric code embedded in the machine barcode
    pub machine: u32,
}

impl Prefix {
    /// Look up a textual prefix in the embedded registry
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::UnknownPrefix` if the code is not registered.
    pub fn from_human(code: &str) -> Result<Self, BarcodeError> {
        PrefixRegistry::global().from_human(code)
    }

    /// Look up a numeric prefix in the embedded registry
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::UnknownPrefix` if the code is not registered.
    pub fn from_machine(code: u32) -> Result<Self, BarcodeError> {
        PrefixRegistry::global().from_machine(code)
    }

    pub fn human(&self) -> &str {
        &self.human
    }

    #[must_use]
    pub fn machine_code(&self) -> u32 {
        self.machine
    }

    /// Numeric code rendered as text, as returned by the legacy split
    #[must_use]
    pub fn machine_s(&self) -> String {
        self.machine.to_string()
    }

    /// Numeric code scaled into the highest-order digits of the inner code
    #[must_use]
    pub fn machine_full(&self) -> u64 {
        u64::from(self.machine) * MACHINE_PREFIX_SCALE
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.human)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_human() {
        let prefix = Prefix::from_human("PR").unwrap();
        assert_eq!(prefix.human(), "PR");
        assert_eq!(prefix.machine_code(), 450);
        assert_eq!(prefix.machine_s(), "450");
    }

    #[test]
    fn test_machine_full() {
        let prefix = Prefix::from_human("PR").unwrap();
        assert_eq!(prefix.machine_full(), 450_000_000_000);
    }

    #[test]
    fn test_registry_round_trip() {
        for code in ["DN", "NT", "PR", "BD"] {
            let prefix = Prefix::from_human(code).unwrap();
            let back = Prefix::from_machine(prefix.machine_code()).unwrap();
            assert_eq!(back, prefix);
        }
    }

    #[test]
    fn test_unknown_prefix() {
        assert_eq!(
            Prefix::from_human("XX"),
            Err(BarcodeError::UnknownPrefix("XX".to_string()))
        );
        assert_eq!(
            Prefix::from_machine(999),
            Err(BarcodeError::UnknownPrefix("999".to_string()))
        );
    }
}
