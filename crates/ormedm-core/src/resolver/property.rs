//! Entity members: simple, complex and navigation properties plus keys.

use super::association;
use super::association_end::{self, RelationshipKind};
use super::complex_type;
use super::context::BuildContext;
use super::join_column;
use super::naming;
use super::navigation;
use super::referential_constraint::PendingConstraint;
use super::type_map;
use crate::edm::{
    ComplexProperty, EdmSimpleType, EntityType, Facets, Mapping, Property, PropertyRef,
    SimpleProperty,
};
use crate::error::{ModelBuildError, Result};
use crate::metamodel::{AttributeDescriptor, AttributeKind, EntityDescriptor};
use tracing::debug;

/// Attributes in ascending name order.
pub(crate) fn sorted_by_name(attributes: &[AttributeDescriptor]) -> Vec<&AttributeDescriptor> {
    let mut sorted: Vec<&AttributeDescriptor> = attributes.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

/// Build a simple property for a basic attribute.
///
/// Key members are never nullable, nor are primitives.
pub(crate) fn simple_property(
    name: String,
    attribute: &AttributeDescriptor,
    internal_name: String,
    key_member: bool,
) -> Result<SimpleProperty> {
    let edm_type = type_map::edm_simple_type(
        &attribute.name,
        &attribute.java_type,
        attribute.temporal,
        attribute.enumerated,
    )?;

    let column = attribute.column.as_ref();
    let nullable = !key_member
        && !type_map::is_primitive(&attribute.java_type)
        && column.map_or(true, |c| c.nullable);
    let mut facets = Facets::nullable(nullable);
    if edm_type.has_length() {
        facets.max_length = column.and_then(|c| c.length);
    }
    if edm_type == EdmSimpleType::Decimal {
        facets.precision = column.and_then(|c| c.precision);
        facets.scale = column.and_then(|c| c.scale);
    }

    Ok(SimpleProperty {
        name,
        edm_type,
        facets,
        mapping: Mapping::new(internal_name, attribute.java_type.clone())
            .with_column(attribute.column_name()),
    })
}

/// Append a property, rejecting a name already used on the entity type.
pub(crate) fn push_property(entity_type: &mut EntityType, property: Property) -> Result<()> {
    if entity_type.has_member(property.name()) {
        return Err(ModelBuildError::DuplicateProperty {
            owner: entity_type.name.clone(),
            property: property.name().to_string(),
        });
    }
    entity_type.properties.push(property);
    Ok(())
}

/// Resolve every visible attribute of `entity` onto `entity_type`.
pub(crate) fn resolve(
    ctx: &mut BuildContext<'_>,
    entity: &EntityDescriptor,
    entity_type: &mut EntityType,
) -> Result<()> {
    for attribute in sorted_by_name(&entity.attributes) {
        if ctx.introspector.is_excluded(&entity.name, Some(&attribute.name)) {
            debug!(entity = %entity.name, attribute = %attribute.name, "Skipping excluded attribute");
            continue;
        }

        match attribute.kind {
            AttributeKind::Basic => {
                let name = naming::member_name(ctx.config, &entity.name, &attribute.name)?;
                let property =
                    simple_property(name, attribute, attribute.name.clone(), attribute.identifier)?;
                if attribute.identifier {
                    entity_type.key.push(PropertyRef::new(property.name.clone()));
                }
                push_property(entity_type, Property::Simple(property))?;
            }
            AttributeKind::Embedded => {
                let is_key = attribute.identifier
                    || entity.id_type.as_deref() == Some(attribute.java_type.as_str());
                if is_key {
                    complex_type::flatten_key(ctx, &attribute.java_type, &attribute.name, entity_type)?;
                } else {
                    let type_name = complex_type::resolve(ctx, &attribute.java_type)?;
                    let name = naming::member_name(ctx.config, &entity.name, &attribute.name)?;
                    let nullable = attribute.column.as_ref().map_or(true, |c| c.nullable);
                    push_property(
                        entity_type,
                        Property::Complex(ComplexProperty {
                            name,
                            type_name,
                            facets: Facets::nullable(nullable),
                            mapping: Mapping::new(attribute.name.clone(), attribute.java_type.clone()),
                        }),
                    )?;
                }
            }
            AttributeKind::OneToOne
            | AttributeKind::OneToMany
            | AttributeKind::ManyToOne
            | AttributeKind::ManyToMany => {
                relationship(ctx, entity, attribute, entity_type)?;
            }
        }
    }
    Ok(())
}

fn relationship(
    ctx: &mut BuildContext<'_>,
    entity: &EntityDescriptor,
    attribute: &AttributeDescriptor,
    entity_type: &mut EntityType,
) -> Result<()> {
    let Some(kind) = RelationshipKind::of(attribute.kind) else {
        return Ok(());
    };
    let introspector = ctx.introspector;
    let target = introspector
        .entity_by_type(attribute.target_type())
        .ok_or_else(|| {
            ModelBuildError::GeneralReflectionFailure(format!(
                "unknown target entity {} of {}.{}",
                attribute.target_type(),
                entity.name,
                attribute.name
            ))
        })?;
    if introspector.is_excluded(&target.name, None) {
        debug!(entity = %entity.name, attribute = %attribute.name, target = %target.name, "Skipping relationship to excluded entity");
        return Ok(());
    }
    let target_type = naming::entity_type_name(ctx.config, target)?;

    let navigation_name = naming::member_name(ctx.config, &entity.name, &attribute.name)?;
    let join_columns = join_column::resolve(ctx, entity, attribute, target)?;
    for join_column in &join_columns {
        if let Some(mirror) = join_column::mirror_property(attribute, join_column, &navigation_name)? {
            push_property(entity_type, mirror)?;
        }
    }
    let pairs: Vec<_> = join_columns.into_iter().map(|j| j.pair).collect();

    let view = association_end::resolve(&entity_type.name, &target_type, kind, attribute, pairs.clone());
    let matched = association::resolve(ctx, view);

    if let Some(known) = ctx.associations.get(&matched.name) {
        if let Some(pending) = PendingConstraint::new(
            known,
            matched.alignment,
            &attribute.name,
            &entity_type.name,
            &target_type,
            pairs,
        ) {
            ctx.pending.push(pending);
        }
    }

    let navigation = navigation::resolve(ctx, entity, attribute, entity_type, &target_type, &matched)?;
    entity_type.navigation_properties.push(navigation);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metamodel::ColumnInfo;

    #[test]
    fn test_sorted_by_name() {
        let attributes = vec![
            AttributeDescriptor::basic("name", "java.lang.String"),
            AttributeDescriptor::id("id", "long"),
            AttributeDescriptor::basic("amount", "java.math.BigDecimal"),
        ];
        let names: Vec<&str> = sorted_by_name(&attributes)
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["amount", "id", "name"]);
    }

    #[test]
    fn test_simple_property_facets() {
        let name = AttributeDescriptor::basic("name", "java.lang.String")
            .with_column(ColumnInfo::named("NAME").not_null().with_length(40));
        let property = simple_property("Name".to_string(), &name, "name".to_string(), false).unwrap();

        assert_eq!(property.edm_type, EdmSimpleType::String);
        assert_eq!(property.facets.nullable, Some(false));
        assert_eq!(property.facets.max_length, Some(40));
        assert_eq!(property.facets.precision, None);
        assert_eq!(property.mapping.column_name.as_deref(), Some("NAME"));

        let amount = AttributeDescriptor::basic("amount", "java.math.BigDecimal")
            .with_column(ColumnInfo::default().with_precision(10, 2));
        let property = simple_property("Amount".to_string(), &amount, "amount".to_string(), false).unwrap();
        assert_eq!(property.facets.nullable, Some(true));
        assert_eq!(property.facets.precision, Some(10));
        assert_eq!(property.facets.scale, Some(2));
        assert_eq!(property.mapping.column_name.as_deref(), Some("amount"));
    }

    #[test]
    fn test_primitives_and_keys_are_not_nullable() {
        let count = AttributeDescriptor::basic("count", "int");
        let property = simple_property("Count".to_string(), &count, "count".to_string(), false).unwrap();
        assert_eq!(property.facets.nullable, Some(false));

        let id = AttributeDescriptor::id("id", "java.lang.Long");
        let property = simple_property("Id".to_string(), &id, "id".to_string(), true).unwrap();
        assert_eq!(property.facets.nullable, Some(false));
    }

    #[test]
    fn test_push_property_rejects_duplicates() {
        let mut order = EntityType::new("Order", "shop", Mapping::new("Order", "shop.Order"));
        let id = AttributeDescriptor::id("id", "long");
        let property = simple_property("Id".to_string(), &id, "id".to_string(), true).unwrap();

        push_property(&mut order, Property::Simple(property.clone())).unwrap();
        let err = push_property(&mut order, Property::Simple(property)).unwrap_err();
        assert!(matches!(err, ModelBuildError::DuplicateProperty { ref property, .. } if property == "Id"));
    }
}
