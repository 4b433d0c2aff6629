//! Associations and referential constraints.

use super::property::PropertyRef;
use super::types::Multiplicity;
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One end of an association.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct AssociationEnd {
    /// Entity type name at this end.
    pub entity_type: String,
    /// Role name, unique within the association.
    pub role: String,
    /// End multiplicity.
    pub multiplicity: Multiplicity,
}

impl AssociationEnd {
    /// Create an end whose role is the entity type name.
    pub fn new(entity_type: impl Into<String>, multiplicity: Multiplicity) -> Self {
        let entity_type = entity_type.into();
        Self {
            role: entity_type.clone(),
            entity_type,
            multiplicity,
        }
    }
}

/// One role of a referential constraint.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct ReferentialConstraintRole {
    /// Association role name.
    pub role: String,
    /// Properties participating in the key.
    pub property_refs: Vec<PropertyRef>,
}

/// Foreign-key mapping between the principal and dependent ends.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct ReferentialConstraint {
    /// Referenced side.
    pub principal: ReferentialConstraintRole,
    /// Referencing side.
    pub dependent: ReferentialConstraintRole,
}

/// An association between two entity types.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct Association {
    /// Name, unique within the schema.
    pub name: String,
    /// First end.
    pub end1: AssociationEnd,
    /// Second end.
    pub end2: AssociationEnd,
    /// Foreign-key constraint, when resolvable.
    pub referential_constraint: Option<ReferentialConstraint>,
}

impl Association {
    /// Find the end with the given role.
    pub fn end_for_role(&self, role: &str) -> Option<&AssociationEnd> {
        [&self.end1, &self.end2].into_iter().find(|e| e.role == role)
    }

    /// Whether the association connects the two entity types, in either order.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.end1.entity_type == a && self.end2.entity_type == b)
            || (self.end1.entity_type == b && self.end2.entity_type == a)
    }

    /// Whether both ends refer to the same entity type.
    pub fn is_self_referencing(&self) -> bool {
        self.end1.entity_type == self.end2.entity_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_role_defaults_to_type() {
        let end = AssociationEnd::new("Order", Multiplicity::One);
        assert_eq!(end.role, "Order");
    }

    #[test]
    fn test_association_queries() {
        let mut end2 = AssociationEnd::new("Employee", Multiplicity::ZeroToOne);
        end2.role = "Employee2".to_string();
        let assoc = Association {
            name: "Employee_Employee".to_string(),
            end1: AssociationEnd::new("Employee", Multiplicity::Many),
            end2,
            referential_constraint: None,
        };

        assert!(assoc.is_self_referencing());
        assert!(assoc.connects("Employee", "Employee"));
        assert_eq!(
            assoc.end_for_role("Employee2").map(|e| e.multiplicity),
            Some(Multiplicity::ZeroToOne)
        );
        assert!(assoc.end_for_role("Manager").is_none());
    }
}
