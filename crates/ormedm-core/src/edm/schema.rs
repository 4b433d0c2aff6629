//! The finished, immutable EDM schema.

use super::{Association, ComplexType, EntityContainer, EntityType};
use crate::error::{ModelBuildError, Result};
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Result of one schema build.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub struct EdmSchema {
    /// Schema namespace.
    pub namespace: String,
    /// Entity types in visitation order.
    pub entity_types: Vec<EntityType>,
    /// Complex types in first-use order.
    pub complex_types: Vec<ComplexType>,
    /// Associations.
    pub associations: Vec<Association>,
    /// The default entity container.
    pub container: EntityContainer,
}

impl EdmSchema {
    /// Get an entity type by name.
    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.name == name)
    }

    /// Get a complex type by name.
    pub fn complex_type(&self, name: &str) -> Option<&ComplexType> {
        self.complex_types.iter().find(|c| c.name == name)
    }

    /// Get an association by name.
    pub fn association(&self, name: &str) -> Option<&Association> {
        self.associations.iter().find(|a| a.name == name)
    }

    /// Associations connecting two entity types in either order.
    pub fn associations_between(&self, a: &str, b: &str) -> Vec<&Association> {
        self.associations
            .iter()
            .filter(|assoc| assoc.connects(a, b))
            .collect()
    }

    /// Serialize the schema to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map(|v| v.to_vec())
            .map_err(|e| ModelBuildError::Serialization(e.to_string()))
    }

    /// Deserialize a schema from bytes.
    ///
    /// The input need not be aligned; it is copied into an aligned buffer first.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut aligned: rkyv::util::AlignedVec<16> = rkyv::util::AlignedVec::new();
        aligned.extend_from_slice(bytes);
        rkyv::from_bytes::<Self, rkyv::rancor::Error>(&aligned)
            .map_err(|e| ModelBuildError::Deserialization(e.to_string()))
    }
}
