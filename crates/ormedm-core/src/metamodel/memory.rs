//! In-memory metamodel snapshot.

use super::{EmbeddableDescriptor, EntityDescriptor, OperationHolder, SchemaIntrospector};
use crate::error::{ModelBuildError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// A fully loaded metamodel, as produced by an introspection run.
///
/// Snapshots can be built programmatically or loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metamodel {
    /// Persistence unit name.
    pub persistence_unit: String,
    /// Entities in visitation order.
    #[serde(default)]
    pub entities: Vec<EntityDescriptor>,
    /// Embeddable types.
    #[serde(default)]
    pub embeddables: Vec<EmbeddableDescriptor>,
    /// Operation holders.
    #[serde(default)]
    pub operations: Vec<OperationHolder>,
    /// Excluded entity names.
    #[serde(default)]
    pub excluded_entities: BTreeSet<String>,
    /// Excluded attributes as `Entity.attribute`.
    #[serde(default)]
    pub excluded_attributes: BTreeSet<String>,
}

impl Metamodel {
    /// Create an empty metamodel for a persistence unit.
    pub fn new(persistence_unit: impl Into<String>) -> Self {
        Self {
            persistence_unit: persistence_unit.into(),
            ..Self::default()
        }
    }

    /// Add an entity.
    pub fn with_entity(mut self, entity: EntityDescriptor) -> Self {
        self.entities.push(entity);
        self
    }

    /// Add an embeddable.
    pub fn with_embeddable(mut self, embeddable: EmbeddableDescriptor) -> Self {
        self.embeddables.push(embeddable);
        self
    }

    /// Add an operation holder.
    pub fn with_operations(mut self, holder: OperationHolder) -> Self {
        self.operations.push(holder);
        self
    }

    /// Exclude an entity from the model.
    pub fn exclude_entity(mut self, entity: impl Into<String>) -> Self {
        self.excluded_entities.insert(entity.into());
        self
    }

    /// Exclude one attribute of an entity.
    pub fn exclude_attribute(mut self, entity: &str, attribute: &str) -> Self {
        self.excluded_attributes
            .insert(format!("{}.{}", entity, attribute));
        self
    }

    /// Parse a metamodel from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ModelBuildError::Deserialization(e.to_string()))
    }

    /// Load a metamodel from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ModelBuildError::GeneralReflectionFailure(format!(
                "cannot read metamodel {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&json)
    }

    /// Serialize the metamodel to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ModelBuildError::Serialization(e.to_string()))
    }
}

impl SchemaIntrospector for Metamodel {
    fn persistence_unit(&self) -> &str {
        &self.persistence_unit
    }

    fn entities(&self) -> &[EntityDescriptor] {
        &self.entities
    }

    fn entity_by_type(&self, java_type: &str) -> Option<&EntityDescriptor> {
        self.entities.iter().find(|e| e.java_type == java_type)
    }

    fn embeddable(&self, java_type: &str) -> Option<&EmbeddableDescriptor> {
        self.embeddables.iter().find(|e| e.java_type == java_type)
    }

    fn is_excluded(&self, entity: &str, attribute: Option<&str>) -> bool {
        if self.excluded_entities.contains(entity) {
            return true;
        }
        match attribute {
            Some(attribute) => self
                .excluded_attributes
                .contains(&format!("{}.{}", entity, attribute)),
            None => false,
        }
    }

    fn operation_holders(&self) -> &[OperationHolder] {
        &self.operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metamodel::AttributeDescriptor;

    fn sample() -> Metamodel {
        Metamodel::new("shop")
            .with_entity(
                EntityDescriptor::new("Customer", "shop.Customer")
                    .with_attribute(AttributeDescriptor::id("id", "long"))
                    .with_attribute(AttributeDescriptor::embedded("address", "shop.Address")),
            )
            .with_embeddable(
                EmbeddableDescriptor::new("Address", "shop.Address")
                    .with_attribute(AttributeDescriptor::basic("city", "java.lang.String")),
            )
            .exclude_attribute("Customer", "secret")
    }

    #[test]
    fn test_lookups() {
        let model = sample();

        assert_eq!(model.persistence_unit(), "shop");
        assert!(model.entity_by_type("shop.Customer").is_some());
        assert!(model.entity_by_type("shop.Missing").is_none());
        assert!(model.embeddable("shop.Address").is_some());
    }

    #[test]
    fn test_exclusion_oracle() {
        let model = sample().exclude_entity("Audit");

        assert!(model.is_excluded("Audit", None));
        assert!(model.is_excluded("Audit", Some("anything")));
        assert!(model.is_excluded("Customer", Some("secret")));
        assert!(!model.is_excluded("Customer", Some("address")));
        assert!(!model.is_excluded("Customer", None));
    }

    #[test]
    fn test_json_roundtrip_through_file() {
        let model = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metamodel.json");
        std::fs::write(&path, model.to_json().unwrap()).unwrap();

        let loaded = Metamodel::from_path(&path).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_missing_file_is_reflection_failure() {
        let err = Metamodel::from_path("/nonexistent/metamodel.json").unwrap_err();
        assert!(matches!(err, ModelBuildError::GeneralReflectionFailure(_)));
    }
}
