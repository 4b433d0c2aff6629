//! Entity types.

use super::context::BuildContext;
use super::naming;
use super::property;
use crate::edm::{EntityType, Mapping};
use crate::error::{ModelBuildError, Result};
use crate::metamodel::EntityDescriptor;
use tracing::debug;

/// Build the entity type for `entity` and register it in the context.
///
/// Returns the entity type name, or `None` when the entity is excluded.
pub(crate) fn resolve(ctx: &mut BuildContext<'_>, entity: &EntityDescriptor) -> Result<Option<String>> {
    if ctx.introspector.is_excluded(&entity.name, None) {
        debug!(entity = %entity.name, "Skipping excluded entity");
        return Ok(None);
    }

    let name = naming::entity_type_name(ctx.config, entity)?;
    if ctx.entity_types.contains_key(&name) {
        return Err(ModelBuildError::DuplicateType {
            kind: "entity type",
            name,
        });
    }

    let mut entity_type = EntityType::new(
        name.clone(),
        ctx.namespace.clone(),
        Mapping::new(entity.name.clone(), entity.java_type.clone()),
    );
    property::resolve(ctx, entity, &mut entity_type)?;

    debug!(
        entity_type = %name,
        properties = entity_type.properties.len(),
        navigation_properties = entity_type.navigation_properties.len(),
        "Built entity type"
    );
    ctx.entity_types.insert(name.clone(), entity_type);
    Ok(Some(name))
}
