//! Referential constraints derived from join columns.

use super::association_end::Alignment;
use super::context::BuildContext;
use super::join_column::JoinColumnPair;
use crate::edm::{
    Association, AssociationEnd, EntityType, PropertyRef, ReferentialConstraint,
    ReferentialConstraintRole,
};
use tracing::debug;

/// Which side of the foreign key a role describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleKind {
    /// Holder of the referenced key.
    Principal,
    /// Holder of the foreign key.
    Dependent,
}

/// A referential constraint queued until both of its entity types are built.
#[derive(Debug, Clone)]
pub(crate) struct PendingConstraint {
    /// Association the constraint belongs to.
    pub(crate) association: String,
    /// Declaring relationship attribute, for diagnostics.
    pub(crate) attribute: String,
    /// Entity type holding the foreign key.
    dependent_type: String,
    /// Entity type holding the referenced key.
    principal_type: String,
    /// Association ends at the time the attribute was resolved.
    ends: [AssociationEnd; 2],
    /// Index into `ends` of the declaring side.
    source_end: usize,
    join_columns: Vec<JoinColumnPair>,
    principal: Option<ReferentialConstraintRole>,
    dependent: Option<ReferentialConstraintRole>,
}

impl PendingConstraint {
    /// Queue a constraint for an owning relationship attribute.
    ///
    /// Returns `None` when the attribute carries no join columns, which is
    /// always the case for inverse and many-to-many sides.
    pub(crate) fn new(
        association: &Association,
        alignment: Alignment,
        attribute: &str,
        dependent_type: &str,
        principal_type: &str,
        join_columns: Vec<JoinColumnPair>,
    ) -> Option<Self> {
        if join_columns.is_empty() {
            return None;
        }
        Some(Self {
            association: association.name.clone(),
            attribute: attribute.to_string(),
            dependent_type: dependent_type.to_string(),
            principal_type: principal_type.to_string(),
            ends: [association.end1.clone(), association.end2.clone()],
            source_end: match alignment {
                Alignment::Straight => 0,
                Alignment::Swapped => 1,
            },
            join_columns,
            principal: None,
            dependent: None,
        })
    }

    /// Whether both roles carry at least one property ref.
    pub(crate) fn is_consistent(&self) -> bool {
        self.principal.is_some() && self.dependent.is_some()
    }

    /// Try to resolve the roles that are still missing.
    ///
    /// Returns the constraint once both roles resolve.
    pub(crate) fn resolve(&mut self, ctx: &BuildContext<'_>) -> Option<ReferentialConstraint> {
        if self.principal.is_none() {
            self.principal = self.resolve_role(ctx, RoleKind::Principal);
        }
        if self.dependent.is_none() {
            self.dependent = self.resolve_role(ctx, RoleKind::Dependent);
        }

        match (&self.principal, &self.dependent) {
            (Some(principal), Some(dependent)) => {
                debug!(
                    association = %self.association,
                    attribute = %self.attribute,
                    principal = %principal.role,
                    dependent = %dependent.role,
                    "Resolved referential constraint"
                );
                Some(ReferentialConstraint {
                    principal: principal.clone(),
                    dependent: dependent.clone(),
                })
            }
            _ => None,
        }
    }

    fn resolve_role(&self, ctx: &BuildContext<'_>, kind: RoleKind) -> Option<ReferentialConstraintRole> {
        let (entity_type, oriented_end) = match kind {
            RoleKind::Principal => (&self.principal_type, 1 - self.source_end),
            RoleKind::Dependent => (&self.dependent_type, self.source_end),
        };
        let entity = ctx.entity_types.get(entity_type)?;

        let property_refs: Vec<PropertyRef> = self
            .join_columns
            .iter()
            .filter_map(|pair| {
                let column = match kind {
                    RoleKind::Principal => &pair.referenced,
                    RoleKind::Dependent => &pair.local,
                };
                property_for_column(entity, column)
            })
            .collect();
        if property_refs.is_empty() {
            return None;
        }

        let role = self.role_of(entity_type, oriented_end)?;
        Some(ReferentialConstraintRole {
            role,
            property_refs,
        })
    }

    /// Role of the end typed `entity_type`, preferring the oriented end so a
    /// self-reference picks the right one.
    fn role_of(&self, entity_type: &str, oriented_end: usize) -> Option<String> {
        let oriented = &self.ends[oriented_end];
        if oriented.entity_type == entity_type {
            return Some(oriented.role.clone());
        }
        self.ends
            .iter()
            .find(|end| end.entity_type == entity_type)
            .map(|end| end.role.clone())
    }
}

fn property_for_column(entity: &EntityType, column: &str) -> Option<PropertyRef> {
    entity
        .simple_properties()
        .find(|p| p.mapping.column_name.as_deref() == Some(column) || p.name == column)
        .map(|p| PropertyRef::new(p.name.clone()))
}
