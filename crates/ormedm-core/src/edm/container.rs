//! Entity container: entity sets, association sets and function imports.

use super::types::{EdmSimpleType, Facets, Mapping, Multiplicity};
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Addressable collection of one entity type.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct EntitySet {
    /// Set name.
    pub name: String,
    /// Entity type name.
    pub entity_type: String,
}

/// One end of an association set.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct AssociationSetEnd {
    /// Association role.
    pub role: String,
    /// Entity set playing the role.
    pub entity_set: String,
}

/// Association instantiated between two entity sets.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct AssociationSet {
    /// Set name.
    pub name: String,
    /// Association name.
    pub association: String,
    /// First end.
    pub end1: AssociationSetEnd,
    /// Second end.
    pub end2: AssociationSetEnd,
}

/// Declared result of a function import.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct FunctionReturnType {
    /// Qualified type name (`Edm.*` for scalars).
    pub type_name: String,
    /// ONE or MANY.
    pub multiplicity: Multiplicity,
}

/// A function import parameter.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub struct FunctionImportParameter {
    /// Parameter name.
    pub name: String,
    /// Scalar kind.
    pub edm_type: EdmSimpleType,
    /// Facets.
    pub facets: Facets,
}

/// A custom operation exposed by the service.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub struct FunctionImport {
    /// EDM name.
    pub name: String,
    /// Result type.
    pub return_type: FunctionReturnType,
    /// Entity set for entity results.
    pub entity_set: Option<String>,
    /// HTTP method (GET, POST, PUT, DELETE).
    pub http_method: String,
    /// Exposed parameters.
    pub parameters: Vec<FunctionImportParameter>,
    /// Persistence origin (method name and holder class).
    pub mapping: Mapping,
}

/// The default entity container of a schema.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub struct EntityContainer {
    /// Container name.
    pub name: String,
    /// Whether this is the default container.
    pub is_default: bool,
    /// Entity sets.
    pub entity_sets: Vec<EntitySet>,
    /// Association sets.
    pub association_sets: Vec<AssociationSet>,
    /// Function imports.
    pub function_imports: Vec<FunctionImport>,
}

impl EntityContainer {
    /// Get an entity set by name.
    pub fn entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets.iter().find(|s| s.name == name)
    }

    /// The entity set holding the given entity type.
    pub fn entity_set_for(&self, entity_type: &str) -> Option<&EntitySet> {
        self.entity_sets.iter().find(|s| s.entity_type == entity_type)
    }

    /// Get an association set by association name.
    pub fn association_set_for(&self, association: &str) -> Option<&AssociationSet> {
        self.association_sets
            .iter()
            .find(|s| s.association == association)
    }

    /// Get a function import by name.
    pub fn function_import(&self, name: &str) -> Option<&FunctionImport> {
        self.function_imports.iter().find(|f| f.name == name)
    }
}
