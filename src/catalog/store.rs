use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::error::BarcodeError;
use crate::core::prefix::Prefix;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read prefix registry: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse prefix registry: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate human prefix in registry: {0}")]
    DuplicateHuman(String),

    #[error("Duplicate machine code in registry: {0}")]
    DuplicateMachine(u32),

    #[error("Invalid registry entry: {0}")]
    InvalidEntry(String),
}

/// Registry version for compatibility checking
pub const REGISTRY_VERSION: &str = "1.0.0";

/// Smallest machine code; zero would leave the prefix digits empty and the
/// barcode undecodable
pub const MIN_MACHINE_CODE: u32 = 1;

/// Largest machine code that fits the leading digits of a machine barcode
pub const MAX_MACHINE_CODE: u32 = 999;

/// Serializable registry format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryData {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub prefixes: Vec<Prefix>,
}

/// Bidirectional prefix lookup, immutable once loaded
#[derive(Debug, Clone, Default)]
pub struct PrefixRegistry {
    /// Registered prefixes in file order
    prefixes: Vec<Prefix>,

    /// Index: human code -> index in prefixes vec
    human_to_index: HashMap<String, usize>,

    /// Index: machine code -> index in prefixes vec
    machine_to_index: HashMap<u32, usize>,
}

impl PrefixRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded registry, loaded on first use and shared for the process lifetime
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<PrefixRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            // build.rs rejects any registry this could fail on
            Self::load_embedded().expect("embedded prefix registry is validated at build time")
        })
    }

    /// Load the embedded default registry
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time via build.rs
        const EMBEDDED_REGISTRY: &str = include_str!("../../catalogs/prefixes.json");
        Self::from_json(EMBEDDED_REGISTRY)
    }

    /// Load registry from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse registry from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: RegistryData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != REGISTRY_VERSION {
            warn!(
                expected = REGISTRY_VERSION,
                found = %data.version,
                "Prefix registry version mismatch"
            );
        }

        let mut registry = Self::new();
        for prefix in data.prefixes {
            registry.add_prefix(prefix)?;
        }

        debug!(prefixes = registry.len(), "Loaded prefix registry");
        Ok(registry)
    }

    /// Register a prefix, keeping both directions one-to-one
    pub fn add_prefix(&mut self, prefix: Prefix) -> Result<(), CatalogError> {
        if prefix.human.len() != 2 || !prefix.human.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CatalogError::InvalidEntry(format!(
                "'{}' must be two uppercase letters",
                prefix.human
            )));
        }
        if !(MIN_MACHINE_CODE..=MAX_MACHINE_CODE).contains(&prefix.machine) {
            return Err(CatalogError::InvalidEntry(format!(
                "'{}' has machine code {} (must be {MIN_MACHINE_CODE}..={MAX_MACHINE_CODE})",
                prefix.human, prefix.machine
            )));
        }
        if self.human_to_index.contains_key(&prefix.human) {
            return Err(CatalogError::DuplicateHuman(prefix.human));
        }
        if self.machine_to_index.contains_key(&prefix.machine) {
            return Err(CatalogError::DuplicateMachine(prefix.machine));
        }

        let index = self.prefixes.len();
        self.human_to_index.insert(prefix.human.clone(), index);
        self.machine_to_index.insert(prefix.machine, index);
        self.prefixes.push(prefix);
        Ok(())
    }

    /// Look up a prefix by its two-letter code
    #[allow(clippy::wrong_self_convention)]
    pub fn from_human(&self, code: &str) -> Result<Prefix, BarcodeError> {
        self.human_to_index
            .get(code)
            .map(|&idx| self.prefixes[idx].clone())
            .ok_or_else(|| BarcodeError::UnknownPrefix(code.to_string()))
    }

    /// Look up a prefix by its numeric code
    #[allow(clippy::wrong_self_convention)]
    pub fn from_machine(&self, code: u32) -> Result<Prefix, BarcodeError> {
        self.machine_to_index
            .get(&code)
            .map(|&idx| self.prefixes[idx].clone())
            .ok_or_else(|| BarcodeError::UnknownPrefix(code.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prefix> {
        self.prefixes.iter()
    }

    /// Export registry to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = RegistryData {
            version: REGISTRY_VERSION.to_string(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            prefixes: self.prefixes.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of registered prefixes
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(human: &str, machine: u32) -> Prefix {
        Prefix {
            human: human.to_string(),
            machine,
        }
    }

    #[test]
    fn test_load_embedded_registry() {
        let registry = PrefixRegistry::load_embedded().unwrap();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), PrefixRegistry::global().len());
    }

    #[test]
    fn test_lookup_both_directions() {
        let registry = PrefixRegistry::load_embedded().unwrap();
        assert_eq!(registry.from_human("PR").unwrap().machine, 450);
        assert_eq!(registry.from_human("DN").unwrap().machine, 122);
        assert_eq!(registry.from_machine(398).unwrap().human, "NT");
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = PrefixRegistry::load_embedded().unwrap();
        assert!(matches!(
            registry.from_human("ZZ"),
            Err(BarcodeError::UnknownPrefix(_))
        ));
        assert!(matches!(
            registry.from_machine(0),
            Err(BarcodeError::UnknownPrefix(_))
        ));
    }

    #[test]
    fn test_every_entry_round_trips() {
        let registry = PrefixRegistry::load_embedded().unwrap();
        for entry in registry.iter() {
            let by_human = registry.from_human(&entry.human).unwrap();
            let by_machine = registry.from_machine(by_human.machine).unwrap();
            assert_eq!(&by_machine, entry);
        }
    }

    #[test]
    fn test_to_json_reloads() {
        let registry = PrefixRegistry::load_embedded().unwrap();
        let json = registry.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"prefixes\""));
        assert!(json.contains("\"PR\""));

        let reloaded = PrefixRegistry::from_json(&json).unwrap();
        assert_eq!(reloaded.len(), registry.len());
    }

    #[test]
    fn test_add_prefix_rejects_duplicates() {
        let mut registry = PrefixRegistry::new();
        registry.add_prefix(prefix("PR", 450)).unwrap();

        assert!(matches!(
            registry.add_prefix(prefix("PR", 451)),
            Err(CatalogError::DuplicateHuman(_))
        ));
        assert!(matches!(
            registry.add_prefix(prefix("QQ", 450)),
            Err(CatalogError::DuplicateMachine(450))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_prefix_rejects_bad_entries() {
        let mut registry = PrefixRegistry::new();
        assert!(registry.add_prefix(prefix("pr", 450)).is_err());
        assert!(registry.add_prefix(prefix("PRX", 450)).is_err());
        assert!(registry.add_prefix(prefix("PR", 1000)).is_err());
        assert!(matches!(
            registry.add_prefix(prefix("ZZ", 0)),
            Err(CatalogError::InvalidEntry(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_from_json_rejects_zero_machine_code() {
        let json = r#"{"version": "1.0.0", "prefixes": [
            {"human": "AA", "machine": 5},
            {"human": "ZZ", "machine": 0}
        ]}"#;
        assert!(matches!(
            PrefixRegistry::from_json(json),
            Err(CatalogError::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_smallest_machine_code_round_trips() {
        let mut registry = PrefixRegistry::new();
        registry.add_prefix(prefix("AA", MIN_MACHINE_CODE)).unwrap();

        let barcode =
            crate::core::barcode::SangerBarcode::from_components_in(&registry, "AA", 1234).unwrap();
        let code = barcode.machine_barcode().unwrap();
        let decoded = crate::core::barcode::SangerBarcode::from_machine_in(&registry, code).unwrap();
        assert_eq!(decoded.prefix().human(), "AA");
        assert_eq!(decoded.number(), 1234);
        assert!(decoded.is_valid());
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"{"version": "1.0.0", "prefixes": [
            {"human": "PR", "machine": 450},
            {"human": "PR", "machine": 451}
        ]}"#;
        assert!(matches!(
            PrefixRegistry::from_json(json),
            Err(CatalogError::DuplicateHuman(_))
        ));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            PrefixRegistry::from_json("{"),
            Err(CatalogError::ParseError(_))
        ));
    }
}
