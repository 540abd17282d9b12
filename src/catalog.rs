//! Material price catalog.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub reference: String,
    pub designation: String,
    pub average_price: f64,
}

/// Immutable snapshot of supplier prices, searched by exact reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<MaterialRecord>,
}

impl Catalog {
    pub fn new(records: Vec<MaterialRecord>) -> Self {
        Self { records }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn records(&self) -> &[MaterialRecord] {
        &self.records
    }

    pub fn find(&self, reference: &str) -> Option<&MaterialRecord> {
        self.records.iter().find(|m| m.reference == reference)
    }

    /// Price for `reference`, or `fallback` when the catalog does not list it.
    pub fn resolve(&self, reference: &str, fallback: f64) -> f64 {
        match self.find(reference) {
            Some(m) => m.average_price,
            None => {
                trace!(reference, fallback, "catalog miss");
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(reference: &str, price: f64) -> MaterialRecord {
        MaterialRecord {
            reference: reference.to_string(),
            designation: format!("ref {reference}"),
            average_price: price,
        }
    }

    #[test]
    fn test_resolve_hit() {
        let catalog = Catalog::new(vec![record("3", 80.0), record("12", 60.0)]);
        assert_eq!(catalog.resolve("12", 1.0), 60.0);
    }

    #[test]
    fn test_resolve_miss_uses_fallback() {
        let catalog = Catalog::new(vec![record("3", 80.0)]);
        assert_eq!(catalog.resolve("999", 57.67), 57.67);
        assert_eq!(Catalog::default().resolve("3", 74.0), 74.0);
    }

    #[test]
    fn test_first_match_wins() {
        let catalog = Catalog::new(vec![record("3", 80.0), record("3", 90.0)]);
        assert_eq!(catalog.resolve("3", 0.0), 80.0);
    }

    #[test]
    fn test_exact_match_only() {
        let catalog = Catalog::new(vec![record("31", 2.7)]);
        assert_eq!(catalog.resolve("3", 74.0), 74.0);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{"reference": "43", "designation": "equerre en tole", "average_price": 1.5}]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.records().len(), 1);
        assert_eq!(catalog.resolve("43", 1.2), 1.5);
    }

    #[test]
    fn test_bundled_catalog() {
        let catalog = Catalog::from_json(include_str!("../data/catalog.json")).unwrap();
        assert_eq!(catalog.resolve("94", 0.0), 82.0);
        assert_eq!(catalog.find("289").unwrap().designation, "40112 blanc eurosist");
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(Catalog::from_json("{not json").is_err());
    }
}
