//! Entity types and complex types.

use super::navigation::NavigationProperty;
use super::property::{Property, PropertyRef, SimpleProperty};
use super::types::Mapping;
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// An entity type.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub struct EntityType {
    /// EDM name.
    pub name: String,
    /// Schema namespace.
    pub namespace: String,
    /// Structural properties in resolution order.
    pub properties: Vec<Property>,
    /// Key property references.
    pub key: Vec<PropertyRef>,
    /// Navigation properties.
    pub navigation_properties: Vec<NavigationProperty>,
    /// Persistence origin (entity name and java type).
    pub mapping: Mapping,
}

impl EntityType {
    /// Create an empty entity type.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, mapping: Mapping) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            properties: Vec::new(),
            key: Vec::new(),
            navigation_properties: Vec::new(),
            mapping,
        }
    }

    /// Namespace-qualified name.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Get a structural property by EDM name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Get a navigation property by EDM name.
    pub fn navigation_property(&self, name: &str) -> Option<&NavigationProperty> {
        self.navigation_properties.iter().find(|n| n.name == name)
    }

    /// Scalar properties.
    pub fn simple_properties(&self) -> impl Iterator<Item = &SimpleProperty> {
        self.properties.iter().filter_map(Property::as_simple)
    }

    /// Whether a structural or navigation member already uses `name`.
    pub fn has_member(&self, name: &str) -> bool {
        self.property(name).is_some() || self.navigation_property(name).is_some()
    }

    /// Key property names in order.
    pub fn key_names(&self) -> Vec<&str> {
        self.key.iter().map(|k| k.name.as_str()).collect()
    }
}

/// A complex (value) type built from an embeddable.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub struct ComplexType {
    /// EDM name.
    pub name: String,
    /// Schema namespace.
    pub namespace: String,
    /// Structural properties (may be complex themselves).
    pub properties: Vec<Property>,
    /// Persistence origin (embeddable name and java type).
    pub mapping: Mapping,
}

impl ComplexType {
    /// Namespace-qualified name.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Get a property by EDM name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }
}
