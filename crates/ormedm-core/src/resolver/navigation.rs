//! Navigation properties.

use super::association::AssociationMatch;
use super::association_end::Alignment;
use super::context::BuildContext;
use super::naming;
use crate::edm::{EntityType, Mapping, NavigationProperty};
use crate::error::{ModelBuildError, Result};
use crate::metamodel::{AttributeDescriptor, EntityDescriptor};

/// Build the navigation property for a resolved relationship attribute.
///
/// The per-(source, target) sequence advances on every call. It becomes a
/// name suffix only when the plain name is already used on the entity type,
/// and is bumped until the suffixed name is free.
pub(crate) fn resolve(
    ctx: &mut BuildContext<'_>,
    entity: &EntityDescriptor,
    attribute: &AttributeDescriptor,
    entity_type: &EntityType,
    target_type: &str,
    matched: &AssociationMatch,
) -> Result<NavigationProperty> {
    let sequence = ctx.next_navigation_sequence(&entity_type.name, target_type);

    let association = ctx.associations.get(&matched.name).ok_or_else(|| {
        ModelBuildError::GeneralReflectionFailure(format!("association {} vanished", matched.name))
    })?;
    let (from_role, to_role) = match matched.alignment {
        Alignment::Straight => (&association.end1.role, &association.end2.role),
        Alignment::Swapped => (&association.end2.role, &association.end1.role),
    };

    let base = naming::member_name(ctx.config, &entity.name, &attribute.name)?;
    let mut name = base.clone();
    let mut suffix = sequence;
    while entity_type.has_member(&name) {
        name = format!("{}{}", base, suffix);
        suffix += 1;
    }

    Ok(NavigationProperty {
        name,
        relationship: matched.name.clone(),
        from_role: from_role.clone(),
        to_role: to_role.clone(),
        mapping: Mapping::new(attribute.name.clone(), attribute.target_type().to_string()),
    })
}
