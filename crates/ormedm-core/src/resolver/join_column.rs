//! Foreign-key resolution for single-valued relationships.

use super::context::BuildContext;
use super::naming;
use super::type_map;
use crate::edm::{Facets, Mapping, Property, SimpleProperty};
use crate::error::{ModelBuildError, Result};
use crate::metamodel::{AttributeDescriptor, AttributeKind, EntityDescriptor, JoinColumnInfo};

/// A local foreign-key column and the column it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JoinColumnPair {
    pub(crate) local: String,
    pub(crate) referenced: String,
}

/// A join column with its referenced attribute located.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedJoinColumn {
    pub(crate) pair: JoinColumnPair,
    pub(crate) info: JoinColumnInfo,
    pub(crate) referenced_attribute: AttributeDescriptor,
}

/// Resolve the join columns of `attribute` against the referenced entity.
///
/// Only owning single-valued sides carry join columns; everything else
/// resolves to an empty list.
pub(crate) fn resolve(
    ctx: &BuildContext<'_>,
    source: &EntityDescriptor,
    attribute: &AttributeDescriptor,
    target: &EntityDescriptor,
) -> Result<Vec<ResolvedJoinColumn>> {
    if !attribute.kind.is_to_one() || attribute.mapped_by_name().is_some() {
        return Ok(Vec::new());
    }

    let mut resolved = Vec::with_capacity(attribute.join_columns.len());
    for info in &attribute.join_columns {
        let local = info.name.clone().unwrap_or_else(|| attribute.name.clone());
        let referenced_attribute = match info.referenced_column_name.as_deref() {
            Some(column) => find_by_column(ctx, target, column),
            None => target.identifier().filter(|id| id.kind == AttributeKind::Basic),
        };
        let referenced_attribute =
            referenced_attribute.ok_or_else(|| ModelBuildError::ReferenceAttributeNotFound {
                entity: source.name.clone(),
                attribute: attribute.name.clone(),
                column: info
                    .referenced_column_name
                    .clone()
                    .unwrap_or_else(|| local.clone()),
            })?;

        resolved.push(ResolvedJoinColumn {
            pair: JoinColumnPair {
                local,
                referenced: referenced_attribute.column_name().to_string(),
            },
            info: info.clone(),
            referenced_attribute: referenced_attribute.clone(),
        });
    }
    Ok(resolved)
}

/// Find a basic attribute of `target` mapped to `column`, descending into an
/// embedded identifier.
fn find_by_column<'m>(
    ctx: &BuildContext<'m>,
    target: &'m EntityDescriptor,
    column: &str,
) -> Option<&'m AttributeDescriptor> {
    let direct = target
        .attributes
        .iter()
        .find(|a| a.kind == AttributeKind::Basic && a.column_name() == column);
    if direct.is_some() {
        return direct;
    }

    let embedded_id = target
        .attributes
        .iter()
        .find(|a| a.kind == AttributeKind::Embedded && (a.identifier || target.id_type.as_deref() == Some(a.java_type.as_str())))?;
    ctx.introspector
        .embeddable(&embedded_id.java_type)?
        .attributes
        .iter()
        .find(|a| a.kind == AttributeKind::Basic && a.column_name() == column)
}

/// Build the property mirroring a writable foreign-key column, if any.
pub(crate) fn mirror_property(
    attribute: &AttributeDescriptor,
    join_column: &ResolvedJoinColumn,
    navigation_name: &str,
) -> Result<Option<Property>> {
    if !join_column.info.is_writable() {
        return Ok(None);
    }

    let referenced = &join_column.referenced_attribute;
    let edm_type = type_map::edm_simple_type(
        &referenced.name,
        &referenced.java_type,
        referenced.temporal,
        referenced.enumerated,
    )?;
    let mut facets = Facets::nullable(join_column.info.nullable);
    if edm_type.has_length() {
        facets.max_length = referenced.column.as_ref().and_then(|c| c.length);
    }

    Ok(Some(Property::Simple(SimpleProperty {
        name: naming::foreign_key_property_name(
            &join_column.pair.local,
            &referenced.name,
            navigation_name,
        ),
        edm_type,
        facets,
        mapping: Mapping::new(
            format!("{}.{}", attribute.name, referenced.name),
            referenced.java_type.clone(),
        )
        .with_column(join_column.pair.local.clone()),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::edm::EdmSimpleType;
    use crate::metamodel::{ColumnInfo, EmbeddableDescriptor, Metamodel};

    fn metamodel() -> Metamodel {
        Metamodel::new("shop")
            .with_entity(
                EntityDescriptor::new("Order", "shop.Order").with_attribute(
                    AttributeDescriptor::id("id", "long").with_column(ColumnInfo::named("ORDER_ID")),
                ),
            )
            .with_entity(
                EntityDescriptor::new("Shipment", "shop.Shipment")
                    .with_embedded_id("key", "shop.ShipmentKey"),
            )
            .with_embeddable(
                EmbeddableDescriptor::new("ShipmentKey", "shop.ShipmentKey")
                    .with_attribute(
                        AttributeDescriptor::basic("carrier", "java.lang.String")
                            .with_column(ColumnInfo::named("CARRIER").with_length(8)),
                    )
                    .with_attribute(AttributeDescriptor::basic("number", "int")),
            )
    }

    fn entity<'m>(metamodel: &'m Metamodel, name: &str) -> &'m EntityDescriptor {
        metamodel.entities.iter().find(|e| e.name == name).unwrap()
    }

    #[test]
    fn test_defaults_to_identifier_column() {
        let metamodel = metamodel();
        let config = BuildConfig::new();
        let ctx = BuildContext::new(&metamodel, &config);
        let item = EntityDescriptor::new("Item", "shop.Item");
        let order = AttributeDescriptor::many_to_one("order", "shop.Order")
            .with_join_column(JoinColumnInfo::default());

        let resolved = resolve(&ctx, &item, &order, entity(&metamodel, "Order")).unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].pair.local, "order");
        assert_eq!(resolved[0].pair.referenced, "ORDER_ID");
    }

    #[test]
    fn test_descends_into_embedded_identifier() {
        let metamodel = metamodel();
        let config = BuildConfig::new();
        let ctx = BuildContext::new(&metamodel, &config);
        let parcel = EntityDescriptor::new("Parcel", "shop.Parcel");
        let shipment = AttributeDescriptor::many_to_one("shipment", "shop.Shipment")
            .with_join_column(JoinColumnInfo::named("SHIP_CARRIER").references("CARRIER"));

        let resolved = resolve(&ctx, &parcel, &shipment, entity(&metamodel, "Shipment")).unwrap();
        assert_eq!(resolved[0].referenced_attribute.name, "carrier");

        let mirror = mirror_property(&shipment, &resolved[0], "Shipment").unwrap().unwrap();
        let mirror = mirror.as_simple().unwrap();
        assert_eq!(mirror.name, "SHIP_CARRIER");
        assert_eq!(mirror.edm_type, EdmSimpleType::String);
        assert_eq!(mirror.facets.max_length, Some(8));
        assert_eq!(mirror.mapping.internal_name, "shipment.carrier");
        assert_eq!(mirror.mapping.column_name.as_deref(), Some("SHIP_CARRIER"));
    }

    #[test]
    fn test_unknown_referenced_column() {
        let metamodel = metamodel();
        let config = BuildConfig::new();
        let ctx = BuildContext::new(&metamodel, &config);
        let item = EntityDescriptor::new("Item", "shop.Item");
        let order = AttributeDescriptor::many_to_one("order", "shop.Order")
            .with_join_column(JoinColumnInfo::named("ORDER_ID").references("NO_SUCH_COLUMN"));

        let err = resolve(&ctx, &item, &order, entity(&metamodel, "Order")).unwrap_err();
        assert!(matches!(
            err,
            ModelBuildError::ReferenceAttributeNotFound { ref column, .. } if column == "NO_SUCH_COLUMN"
        ));
    }

    #[test]
    fn test_read_only_column_has_no_mirror() {
        let metamodel = metamodel();
        let config = BuildConfig::new();
        let ctx = BuildContext::new(&metamodel, &config);
        let item = EntityDescriptor::new("Item", "shop.Item");
        let order = AttributeDescriptor::many_to_one("order", "shop.Order")
            .with_join_column(JoinColumnInfo::named("ORDER_ID").read_only());

        let resolved = resolve(&ctx, &item, &order, entity(&metamodel, "Order")).unwrap();
        assert!(mirror_property(&order, &resolved[0], "Order").unwrap().is_none());
    }

    #[test]
    fn test_inverse_side_has_no_join_columns() {
        let metamodel = metamodel();
        let config = BuildConfig::new();
        let ctx = BuildContext::new(&metamodel, &config);
        let order = entity(&metamodel, "Order");
        let items = AttributeDescriptor::one_to_many("items", "shop.Item").mapped_by("order");

        assert!(resolve(&ctx, order, &items, order).unwrap().is_empty());
    }
}
