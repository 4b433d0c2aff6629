//! Navigation properties.

use super::types::Mapping;
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Traversal from an entity type along an association.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct NavigationProperty {
    /// EDM name.
    pub name: String,
    /// Association name.
    pub relationship: String,
    /// Role of the declaring entity type.
    pub from_role: String,
    /// Role of the target entity type.
    pub to_role: String,
    /// Persistence origin (relationship attribute).
    pub mapping: Mapping,
}
