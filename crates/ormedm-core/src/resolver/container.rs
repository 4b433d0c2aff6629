//! The default entity container.

use super::context::BuildContext;
use super::naming;
use crate::edm::{
    Association, AssociationEnd, AssociationSet, AssociationSetEnd, EntityContainer, EntitySet,
    FunctionImport,
};
use std::collections::HashMap;

/// Build the default container over the finished entity types and associations.
pub(crate) fn resolve(
    ctx: &BuildContext<'_>,
    associations: &[Association],
    function_imports: Vec<FunctionImport>,
) -> EntityContainer {
    let entity_sets: Vec<EntitySet> = ctx
        .entity_types
        .values()
        .map(|entity_type| EntitySet {
            name: naming::entity_set_name(
                ctx.config,
                &entity_type.mapping.internal_name,
                &entity_type.name,
            ),
            entity_type: entity_type.name.clone(),
        })
        .collect();

    let set_by_type: HashMap<&str, &str> = entity_sets
        .iter()
        .map(|set| (set.entity_type.as_str(), set.name.as_str()))
        .collect();
    let set_end = |end: &AssociationEnd| AssociationSetEnd {
        role: end.role.clone(),
        entity_set: set_by_type
            .get(end.entity_type.as_str())
            .map(|name| name.to_string())
            .unwrap_or_else(|| naming::entity_set_name(ctx.config, &end.entity_type, &end.entity_type)),
    };

    let association_sets = associations
        .iter()
        .map(|association| AssociationSet {
            name: naming::association_set_name(&association.name),
            association: association.name.clone(),
            end1: set_end(&association.end1),
            end2: set_end(&association.end2),
        })
        .collect();

    EntityContainer {
        name: ctx.config.container_name_for(&ctx.namespace),
        is_default: true,
        entity_sets,
        association_sets,
        function_imports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildConfig, NameMapping};
    use crate::edm::{EntityType, Mapping, Multiplicity};
    use crate::metamodel::Metamodel;

    #[test]
    fn test_sets_follow_entity_types() {
        let metamodel = Metamodel::new("people");
        let config = BuildConfig::new()
            .with_mapping(NameMapping::default().with_entity_set("Person", "People"));
        let mut ctx = BuildContext::new(&metamodel, &config);
        for name in ["Person", "Address"] {
            ctx.entity_types.insert(
                name.to_string(),
                EntityType::new(name, "people", Mapping::new(name, format!("people.{}", name))),
            );
        }
        let association = Association {
            name: "Address_Person".to_string(),
            end1: AssociationEnd::new("Person", Multiplicity::Many),
            end2: AssociationEnd::new("Address", Multiplicity::ZeroToOne),
            referential_constraint: None,
        };

        let container = resolve(&ctx, &[association], Vec::new());

        assert_eq!(container.name, "peopleContainer");
        assert!(container.is_default);
        assert_eq!(container.entity_set_for("Person").unwrap().name, "People");
        assert_eq!(container.entity_set_for("Address").unwrap().name, "Addresss");

        let set = container.association_set_for("Address_Person").unwrap();
        assert_eq!(set.name, "Address_PersonSet");
        assert_eq!(set.end1.role, "Person");
        assert_eq!(set.end1.entity_set, "People");
        assert_eq!(set.end2.entity_set, "Addresss");
    }
}
