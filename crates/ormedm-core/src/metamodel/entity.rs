//! Entity and embeddable descriptors.

use super::attribute::AttributeDescriptor;
use serde::{Deserialize, Serialize};

/// A persistent entity as seen by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Entity name.
    pub name: String,
    /// Fully qualified java type.
    pub java_type: String,
    /// Declared identifier type when the identifier is an embeddable.
    #[serde(default)]
    pub id_type: Option<String>,
    /// Attributes in declaration order.
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
}

impl EntityDescriptor {
    /// Create a new entity descriptor.
    pub fn new(name: impl Into<String>, java_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            java_type: java_type.into(),
            id_type: None,
            attributes: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add an embedded identifier; also records the identifier type.
    pub fn with_embedded_id(
        mut self,
        name: impl Into<String>,
        java_type: impl Into<String>,
    ) -> Self {
        let java_type = java_type.into();
        self.id_type = Some(java_type.clone());
        self.attributes
            .push(AttributeDescriptor::embedded_id(name, java_type));
        self
    }

    /// Get an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// The first identifier attribute.
    pub fn identifier(&self) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.identifier)
    }
}

/// An embeddable value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddableDescriptor {
    /// Simple class name.
    pub name: String,
    /// Fully qualified java type.
    pub java_type: String,
    /// Attributes in declaration order.
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
}

impl EmbeddableDescriptor {
    /// Create a new embeddable descriptor.
    pub fn new(name: impl Into<String>, java_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            java_type: java_type.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_builder() {
        let order = EntityDescriptor::new("Order", "shop.Order")
            .with_attribute(AttributeDescriptor::id("id", "long"))
            .with_attribute(AttributeDescriptor::basic("note", "java.lang.String"));

        assert_eq!(order.attributes.len(), 2);
        assert_eq!(order.identifier().map(|a| a.name.as_str()), Some("id"));
        assert!(order.attribute("note").is_some());
        assert!(order.attribute("missing").is_none());
        assert!(order.id_type.is_none());
    }

    #[test]
    fn test_embedded_id_records_id_type() {
        let line = EntityDescriptor::new("OrderLine", "shop.OrderLine")
            .with_embedded_id("key", "shop.OrderKey");

        assert_eq!(line.id_type.as_deref(), Some("shop.OrderKey"));
        assert!(line.identifier().is_some());
    }
}
