//! EDM name generation.

use crate::config::BuildConfig;
use crate::error::{ModelBuildError, Result};
use crate::metamodel::{EmbeddableDescriptor, EntityDescriptor};

const ENTITY_SET_SUFFIX: &str = "s";
const ASSOCIATION_SET_SUFFIX: &str = "Set";

/// Upper-case the first character.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Entity type name: mapped name or the entity name.
pub(crate) fn entity_type_name(config: &BuildConfig, entity: &EntityDescriptor) -> Result<String> {
    if entity.name.is_empty() {
        return Err(ModelBuildError::MissingName { kind: "entity" });
    }
    Ok(config
        .mapping
        .entity_types
        .get(&entity.name)
        .cloned()
        .unwrap_or_else(|| entity.name.clone()))
}

/// Complex type name: mapped name or the embeddable's simple name.
pub(crate) fn complex_type_name(
    config: &BuildConfig,
    embeddable: &EmbeddableDescriptor,
) -> Result<String> {
    if embeddable.name.is_empty() {
        return Err(ModelBuildError::MissingName { kind: "embeddable" });
    }
    Ok(config
        .mapping
        .embeddables
        .get(&embeddable.name)
        .cloned()
        .unwrap_or_else(|| embeddable.name.clone()))
}

/// Property or navigation property name for an attribute of `owner`.
pub(crate) fn member_name(config: &BuildConfig, owner: &str, attribute: &str) -> Result<String> {
    if attribute.is_empty() {
        return Err(ModelBuildError::MissingName { kind: "attribute" });
    }
    Ok(config
        .mapping
        .attribute(owner, attribute)
        .map(String::from)
        .unwrap_or_else(|| capitalize(attribute)))
}

/// Name of the property mirroring a writable foreign-key column.
///
/// When the column name would shadow the relationship's navigation name
/// (a join column that defaults to the attribute name), the referenced
/// attribute is appended, e.g. `Order` becomes `OrderId`.
pub(crate) fn foreign_key_property_name(column: &str, referenced: &str, navigation: &str) -> String {
    let name = capitalize(column);
    if name == navigation {
        format!("{}{}", name, capitalize(referenced))
    } else {
        name
    }
}

/// Entity set name for an entity.
pub(crate) fn entity_set_name(config: &BuildConfig, entity: &str, entity_type: &str) -> String {
    config
        .mapping
        .entity_sets
        .get(entity)
        .cloned()
        .unwrap_or_else(|| format!("{}{}", entity_type, ENTITY_SET_SUFFIX))
}

/// Association name from its end types, ordered case-insensitively.
///
/// `similar` is the number of associations already connecting the same two
/// types; a non-zero count becomes a numeric suffix.
pub(crate) fn association_name(end1: &str, end2: &str, similar: usize) -> String {
    let base = if end1.to_lowercase() > end2.to_lowercase() {
        format!("{}_{}", end2, end1)
    } else {
        format!("{}_{}", end1, end2)
    };
    if similar > 0 {
        format!("{}{}", base, similar)
    } else {
        base
    }
}

/// Association set name.
pub(crate) fn association_set_name(association: &str) -> String {
    format!("{}{}", association, ASSOCIATION_SET_SUFFIX)
}
