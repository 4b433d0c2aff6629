//! Structural properties.

use super::types::{EdmSimpleType, Facets, Mapping};
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A scalar-valued property.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub struct SimpleProperty {
    /// EDM name.
    pub name: String,
    /// Scalar kind.
    pub edm_type: EdmSimpleType,
    /// Facets.
    pub facets: Facets,
    /// Persistence origin.
    pub mapping: Mapping,
}

/// A property typed by a complex type.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub struct ComplexProperty {
    /// EDM name.
    pub name: String,
    /// Complex type name within the schema namespace.
    pub type_name: String,
    /// Facets (nullability only).
    pub facets: Facets,
    /// Persistence origin.
    pub mapping: Mapping,
}

/// A structural property of an entity or complex type.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub enum Property {
    /// Scalar property.
    Simple(SimpleProperty),
    /// Complex-typed property.
    Complex(ComplexProperty),
}

impl Property {
    /// EDM name.
    pub fn name(&self) -> &str {
        match self {
            Property::Simple(p) => &p.name,
            Property::Complex(p) => &p.name,
        }
    }

    /// Persistence origin.
    pub fn mapping(&self) -> &Mapping {
        match self {
            Property::Simple(p) => &p.mapping,
            Property::Complex(p) => &p.mapping,
        }
    }

    /// The scalar property, if this is one.
    pub fn as_simple(&self) -> Option<&SimpleProperty> {
        match self {
            Property::Simple(p) => Some(p),
            Property::Complex(_) => None,
        }
    }

    /// The complex property, if this is one.
    pub fn as_complex(&self) -> Option<&ComplexProperty> {
        match self {
            Property::Complex(p) => Some(p),
            Property::Simple(_) => None,
        }
    }
}

/// Reference to a property by name (keys, referential constraints).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct PropertyRef {
    /// Referenced property name.
    pub name: String,
}

impl PropertyRef {
    /// Create a property reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
