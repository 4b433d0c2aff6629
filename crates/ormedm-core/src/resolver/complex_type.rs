//! Complex types built from embeddables, and flattened embedded keys.

use super::context::BuildContext;
use super::naming;
use super::property::{push_property, simple_property, sorted_by_name};
use crate::edm::{ComplexProperty, ComplexType, EntityType, Facets, Mapping, Property, PropertyRef};
use crate::error::{ModelBuildError, Result};
use crate::metamodel::{AttributeKind, EmbeddableDescriptor};
use tracing::debug;

/// Resolve the complex type for an embeddable java type, building it once.
///
/// Returns the complex type name.
pub(crate) fn resolve(ctx: &mut BuildContext<'_>, java_type: &str) -> Result<String> {
    if let Some(existing) = ctx.complex_types.get(java_type) {
        return Ok(existing.name.clone());
    }

    let introspector = ctx.introspector;
    let embeddable = introspector.embeddable(java_type).ok_or_else(|| {
        ModelBuildError::GeneralReflectionFailure(format!("unknown embeddable {}", java_type))
    })?;

    if !ctx.complex_in_progress.insert(java_type.to_string()) {
        return Err(ModelBuildError::GeneralReflectionFailure(format!(
            "embeddable {} contains itself",
            java_type
        )));
    }
    let built = build(ctx, embeddable);
    ctx.complex_in_progress.remove(java_type);
    let complex_type = built?;

    if ctx.complex_types.values().any(|c| c.name == complex_type.name) {
        return Err(ModelBuildError::DuplicateType {
            kind: "complex type",
            name: complex_type.name,
        });
    }

    let name = complex_type.name.clone();
    debug!(complex_type = %name, java_type, "Built complex type");
    ctx.complex_types.insert(java_type.to_string(), complex_type);
    Ok(name)
}

fn build(ctx: &mut BuildContext<'_>, embeddable: &EmbeddableDescriptor) -> Result<ComplexType> {
    let mut complex_type = ComplexType {
        name: naming::complex_type_name(ctx.config, embeddable)?,
        namespace: ctx.namespace.clone(),
        properties: Vec::new(),
        mapping: Mapping::new(embeddable.name.clone(), embeddable.java_type.clone()),
    };

    for attribute in sorted_by_name(&embeddable.attributes) {
        if ctx.introspector.is_excluded(&embeddable.name, Some(&attribute.name)) {
            debug!(embeddable = %embeddable.name, attribute = %attribute.name, "Skipping excluded attribute");
            continue;
        }
        let name = naming::member_name(ctx.config, &embeddable.name, &attribute.name)?;
        let property = match attribute.kind {
            AttributeKind::Basic => Property::Simple(simple_property(
                name,
                attribute,
                attribute.name.clone(),
                false,
            )?),
            AttributeKind::Embedded => {
                let type_name = resolve(ctx, &attribute.java_type)?;
                let nullable = attribute.column.as_ref().map_or(true, |c| c.nullable);
                Property::Complex(ComplexProperty {
                    name,
                    type_name,
                    facets: Facets::nullable(nullable),
                    mapping: Mapping::new(attribute.name.clone(), attribute.java_type.clone()),
                })
            }
            _ => {
                debug!(embeddable = %embeddable.name, attribute = %attribute.name, "Skipping relationship inside embeddable");
                continue;
            }
        };

        if complex_type.property(property.name()).is_some() {
            return Err(ModelBuildError::DuplicateProperty {
                owner: complex_type.name,
                property: property.name().to_string(),
            });
        }
        complex_type.properties.push(property);
    }
    Ok(complex_type)
}

/// Flatten an embedded identifier onto the entity type as key properties.
///
/// Members get dotted mapping names rooted at `path`. Nested embeddables are
/// flattened recursively. Nothing is recorded as a complex type.
pub(crate) fn flatten_key(
    ctx: &mut BuildContext<'_>,
    java_type: &str,
    path: &str,
    entity_type: &mut EntityType,
) -> Result<()> {
    let introspector = ctx.introspector;
    let embeddable = introspector.embeddable(java_type).ok_or_else(|| {
        ModelBuildError::GeneralReflectionFailure(format!("unknown embeddable {}", java_type))
    })?;

    if !ctx.complex_in_progress.insert(java_type.to_string()) {
        return Err(ModelBuildError::GeneralReflectionFailure(format!(
            "embeddable {} contains itself",
            java_type
        )));
    }
    let flattened = flatten_members(ctx, embeddable, path, entity_type);
    ctx.complex_in_progress.remove(java_type);
    flattened
}

fn flatten_members(
    ctx: &mut BuildContext<'_>,
    embeddable: &EmbeddableDescriptor,
    path: &str,
    entity_type: &mut EntityType,
) -> Result<()> {
    for attribute in sorted_by_name(&embeddable.attributes) {
        if ctx.introspector.is_excluded(&embeddable.name, Some(&attribute.name)) {
            debug!(embeddable = %embeddable.name, attribute = %attribute.name, "Skipping excluded key member");
            continue;
        }
        let member_path = format!("{}.{}", path, attribute.name);
        match attribute.kind {
            AttributeKind::Basic => {
                let name = naming::member_name(ctx.config, &embeddable.name, &attribute.name)?;
                let property = simple_property(name, attribute, member_path, true)?;
                entity_type.key.push(PropertyRef::new(property.name.clone()));
                push_property(entity_type, Property::Simple(property))?;
            }
            AttributeKind::Embedded => {
                flatten_key(ctx, &attribute.java_type, &member_path, entity_type)?;
            }
            _ => {
                debug!(embeddable = %embeddable.name, attribute = %attribute.name, "Skipping relationship inside embedded key");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildConfig, NameMapping};
    use crate::metamodel::{AttributeDescriptor, Metamodel};

    fn metamodel() -> Metamodel {
        Metamodel::new("shop")
            .with_embeddable(
                EmbeddableDescriptor::new("Address", "shop.Address")
                    .with_attribute(AttributeDescriptor::basic("street", "java.lang.String"))
                    .with_attribute(AttributeDescriptor::basic("city", "java.lang.String"))
                    .with_attribute(AttributeDescriptor::embedded("geo", "shop.Geo")),
            )
            .with_embeddable(
                EmbeddableDescriptor::new("Geo", "shop.Geo")
                    .with_attribute(AttributeDescriptor::basic("lat", "double"))
                    .with_attribute(AttributeDescriptor::basic("lon", "double")),
            )
            .with_embeddable(
                EmbeddableDescriptor::new("OrderKey", "shop.OrderKey")
                    .with_attribute(AttributeDescriptor::basic("region", "java.lang.String"))
                    .with_attribute(AttributeDescriptor::basic("number", "long")),
            )
            .with_embeddable(
                EmbeddableDescriptor::new("Loop", "shop.Loop")
                    .with_attribute(AttributeDescriptor::embedded("inner", "shop.Loop")),
            )
    }

    #[test]
    fn test_built_once_with_nested_types() {
        let metamodel = metamodel();
        let config = BuildConfig::new();
        let mut ctx = BuildContext::new(&metamodel, &config);

        assert_eq!(resolve(&mut ctx, "shop.Address").unwrap(), "Address");
        assert_eq!(resolve(&mut ctx, "shop.Address").unwrap(), "Address");
        assert_eq!(ctx.complex_types.len(), 2);

        let address = &ctx.complex_types["shop.Address"];
        let names: Vec<&str> = address.properties.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["City", "Geo", "Street"]);
        assert_eq!(address.property("Geo").unwrap().as_complex().unwrap().type_name, "Geo");
    }

    #[test]
    fn test_mapped_name() {
        let metamodel = metamodel();
        let config = BuildConfig::new()
            .with_mapping(NameMapping::default().with_embeddable("Geo", "Coordinates"));
        let mut ctx = BuildContext::new(&metamodel, &config);

        assert_eq!(resolve(&mut ctx, "shop.Geo").unwrap(), "Coordinates");
    }

    #[test]
    fn test_recursive_embeddable_fails() {
        let metamodel = metamodel();
        let config = BuildConfig::new();
        let mut ctx = BuildContext::new(&metamodel, &config);

        let err = resolve(&mut ctx, "shop.Loop").unwrap_err();
        assert!(matches!(err, ModelBuildError::GeneralReflectionFailure(_)));
        assert!(ctx.complex_in_progress.is_empty());
    }

    #[test]
    fn test_unknown_embeddable_fails() {
        let metamodel = metamodel();
        let config = BuildConfig::new();
        let mut ctx = BuildContext::new(&metamodel, &config);

        assert!(matches!(
            resolve(&mut ctx, "shop.Missing"),
            Err(ModelBuildError::GeneralReflectionFailure(_))
        ));
    }

    #[test]
    fn test_flatten_key() {
        let metamodel = metamodel();
        let config = BuildConfig::new();
        let mut ctx = BuildContext::new(&metamodel, &config);
        let mut order = EntityType::new("Order", "shop", Mapping::new("Order", "shop.Order"));

        flatten_key(&mut ctx, "shop.OrderKey", "key", &mut order).unwrap();

        assert_eq!(order.key_names(), vec!["Number", "Region"]);
        let number = order.property("Number").unwrap().as_simple().unwrap();
        assert_eq!(number.mapping.internal_name, "key.number");
        assert_eq!(number.facets.nullable, Some(false));
        assert!(ctx.complex_types.is_empty());
    }

    #[test]
    fn test_flatten_key_skips_excluded_member() {
        let metamodel = metamodel().exclude_attribute("OrderKey", "region");
        let config = BuildConfig::new();
        let mut ctx = BuildContext::new(&metamodel, &config);
        let mut order = EntityType::new("Order", "shop", Mapping::new("Order", "shop.Order"));

        flatten_key(&mut ctx, "shop.OrderKey", "key", &mut order).unwrap();

        assert_eq!(order.key_names(), vec!["Number"]);
        assert!(order.property("Region").is_none());
    }
}
