//! Build configuration.

use crate::error::{ModelBuildError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Suffix appended to the namespace for the default container name.
const CONTAINER_SUFFIX: &str = "Container";

/// Overrides for generated EDM names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMapping {
    /// Entity name to entity type name.
    #[serde(default)]
    pub entity_types: BTreeMap<String, String>,
    /// Entity name to entity set name.
    #[serde(default)]
    pub entity_sets: BTreeMap<String, String>,
    /// `Owner.attribute` to property or navigation property name.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Embeddable name to complex type name.
    #[serde(default)]
    pub embeddables: BTreeMap<String, String>,
}

impl NameMapping {
    /// Rename an entity type.
    pub fn with_entity_type(mut self, entity: &str, name: &str) -> Self {
        self.entity_types.insert(entity.to_string(), name.to_string());
        self
    }

    /// Rename an entity set.
    pub fn with_entity_set(mut self, entity: &str, name: &str) -> Self {
        self.entity_sets.insert(entity.to_string(), name.to_string());
        self
    }

    /// Rename an attribute of an entity or embeddable.
    pub fn with_attribute(mut self, owner: &str, attribute: &str, name: &str) -> Self {
        self.attributes
            .insert(format!("{}.{}", owner, attribute), name.to_string());
        self
    }

    /// Rename a complex type.
    pub fn with_embeddable(mut self, embeddable: &str, name: &str) -> Self {
        self.embeddables
            .insert(embeddable.to_string(), name.to_string());
        self
    }

    /// Override for an attribute, if any.
    pub fn attribute(&self, owner: &str, attribute: &str) -> Option<&str> {
        self.attributes
            .get(&format!("{}.{}", owner, attribute))
            .map(String::as_str)
    }
}

/// Configuration of one schema build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Schema namespace; defaults to the persistence unit name.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Entity container name; defaults to `<namespace>Container`.
    #[serde(default)]
    pub container_name: Option<String>,
    /// Name overrides.
    #[serde(default)]
    pub mapping: NameMapping,
}

impl BuildConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the container name.
    pub fn with_container_name(mut self, name: impl Into<String>) -> Self {
        self.container_name = Some(name.into());
        self
    }

    /// Set the name mapping.
    pub fn with_mapping(mut self, mapping: NameMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ModelBuildError::Deserialization(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&json).map_err(|e| ModelBuildError::Deserialization(e.to_string()))
    }

    /// Effective namespace for a persistence unit.
    pub fn namespace_for(&self, persistence_unit: &str) -> String {
        self.namespace
            .clone()
            .unwrap_or_else(|| persistence_unit.to_string())
    }

    /// Effective container name for a namespace.
    pub fn container_name_for(&self, namespace: &str) -> String {
        self.container_name
            .clone()
            .unwrap_or_else(|| format!("{}{}", namespace, CONTAINER_SUFFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::new();

        assert_eq!(config.namespace_for("shop"), "shop");
        assert_eq!(config.container_name_for("shop"), "shopContainer");
    }

    #[test]
    fn test_overrides() {
        let config = BuildConfig::new()
            .with_namespace("Sales")
            .with_container_name("SalesService")
            .with_mapping(NameMapping::default().with_attribute("Order", "items", "Lines"));

        assert_eq!(config.namespace_for("shop"), "Sales");
        assert_eq!(config.container_name_for("Sales"), "SalesService");
        assert_eq!(config.mapping.attribute("Order", "items"), Some("Lines"));
        assert_eq!(config.mapping.attribute("Order", "note"), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.json");
        std::fs::write(
            &path,
            r#"{"namespace":"Sales","mapping":{"entity_sets":{"Order":"AllOrders"}}}"#,
        )
        .unwrap();

        let config = BuildConfig::from_path(&path).unwrap();
        assert_eq!(config.namespace.as_deref(), Some("Sales"));
        assert!(config.container_name.is_none());
        assert_eq!(
            config.mapping.entity_sets.get("Order").map(String::as_str),
            Some("AllOrders")
        );
    }
}
