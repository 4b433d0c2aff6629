//! Function imports for exposed operation methods.

use super::context::BuildContext;
use super::type_map;
use crate::edm::{
    EdmSimpleType, Facets, FunctionImport, FunctionImportParameter, FunctionReturnType, Mapping,
    Multiplicity,
};
use crate::error::{ModelBuildError, Result};
use crate::metamodel::{
    FunctionInfo, MethodDescriptor, MethodParameter, OperationHolder, ReturnCardinality, ReturnKind,
};
use tracing::debug;

/// Build function imports for every annotated method of every operation holder.
pub(crate) fn resolve_all(ctx: &BuildContext<'_>) -> Result<Vec<FunctionImport>> {
    let mut imports = Vec::new();
    for holder in ctx.introspector.operation_holders() {
        for method in holder.exposed_methods() {
            let Some(function) = &method.function else {
                continue;
            };
            imports.push(resolve(ctx, holder, method, function)?);
        }
    }
    Ok(imports)
}

fn resolve(
    ctx: &BuildContext<'_>,
    holder: &OperationHolder,
    method: &MethodDescriptor,
    function: &FunctionInfo,
) -> Result<FunctionImport> {
    let name = function.name.clone().unwrap_or_else(|| method.name.clone());
    let return_info = function
        .return_type
        .ok_or_else(|| ModelBuildError::FunctionReturnTypeMissing {
            function: name.clone(),
        })?;
    let returned = method.returned_type();
    let not_found = || ModelBuildError::FunctionReturnTypeNotFound {
        function: name.clone(),
        java_type: returned.to_string(),
    };

    let mut entity_set = None;
    let type_name = match return_info.kind {
        ReturnKind::Entity => {
            let entity_type = ctx
                .entity_types
                .values()
                .find(|e| e.mapping.java_type == returned)
                .ok_or_else(not_found)?;
            entity_set = Some(function.entity_set.clone().ok_or_else(|| {
                ModelBuildError::FunctionEntitySetMissing {
                    function: name.clone(),
                }
            })?);
            entity_type.qualified_name()
        }
        ReturnKind::Simple => type_map::edm_simple_type(&name, returned, None, false)?
            .qualified_name()
            .to_string(),
        ReturnKind::Complex => {
            let simple_name = returned.rsplit('.').next().unwrap_or(returned);
            ctx.complex_types
                .get(returned)
                .or_else(|| {
                    ctx.complex_types.values().find(|c| {
                        c.name == simple_name || c.mapping.internal_name == simple_name
                    })
                })
                .ok_or_else(not_found)?
                .qualified_name()
        }
    };
    let multiplicity = match return_info.cardinality {
        ReturnCardinality::One => Multiplicity::One,
        ReturnCardinality::Many => Multiplicity::Many,
    };

    let mut parameters = Vec::new();
    for (position, parameter) in method.parameters.iter().enumerate() {
        if let Some(resolved) = resolve_parameter(&name, position, parameter)? {
            parameters.push(resolved);
        }
    }

    debug!(function = %name, return_type = %type_name, "Built function import");
    Ok(FunctionImport {
        name,
        return_type: FunctionReturnType {
            type_name,
            multiplicity,
        },
        entity_set,
        http_method: function.http_method.as_str().to_string(),
        parameters,
        mapping: Mapping::new(method.name.clone(), holder.class_name.clone()),
    })
}

fn resolve_parameter(
    function: &str,
    position: usize,
    parameter: &MethodParameter,
) -> Result<Option<FunctionImportParameter>> {
    let Some(annotation) = &parameter.annotation else {
        return Ok(None);
    };
    let name = annotation
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ModelBuildError::FunctionParameterNameMissing {
            function: function.to_string(),
            position,
        })?;
    let edm_type = type_map::edm_simple_type(&name, &parameter.java_type, None, false)?;

    let mut facets = Facets::default();
    if let Some(column) = &annotation.facets {
        facets.nullable = Some(column.nullable);
        if edm_type.has_length() {
            facets.max_length = column.length;
        }
        if edm_type == EdmSimpleType::Decimal {
            facets.precision = column.precision;
            facets.scale = column.scale;
        }
    }

    Ok(Some(FunctionImportParameter {
        name,
        edm_type,
        facets,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::metamodel::{ColumnInfo, Metamodel, ParameterInfo};

    fn run(holder: OperationHolder) -> Result<Vec<FunctionImport>> {
        let metamodel = Metamodel::new("shop").with_operations(holder);
        let config = BuildConfig::new();
        let ctx = BuildContext::new(&metamodel, &config);
        resolve_all(&ctx)
    }

    #[test]
    fn test_simple_function_with_parameters() {
        let mut method = MethodDescriptor::new("countOrders", "long")
            .with_function(FunctionInfo::returning(ReturnKind::Simple, ReturnCardinality::One))
            .with_parameter("java.lang.String", Some("region"));
        method.parameters.push(MethodParameter {
            java_type: "shop.Context".to_string(),
            annotation: None,
        });
        method.parameters.push(MethodParameter {
            java_type: "java.math.BigDecimal".to_string(),
            annotation: Some(ParameterInfo {
                name: Some("minimum".to_string()),
                facets: Some(ColumnInfo::default().not_null().with_precision(12, 2)),
            }),
        });
        let holder = OperationHolder::new("shop.Reports").with_method(method);

        let imports = run(holder).unwrap();
        assert_eq!(imports.len(), 1);
        let import = &imports[0];
        assert_eq!(import.name, "countOrders");
        assert_eq!(import.return_type.type_name, "Edm.Int64");
        assert_eq!(import.http_method, "GET");
        assert_eq!(import.mapping.internal_name, "countOrders");
        assert_eq!(import.mapping.java_type, "shop.Reports");

        let names: Vec<&str> = import.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["region", "minimum"]);
        assert_eq!(import.parameters[1].facets.nullable, Some(false));
        assert_eq!(import.parameters[1].facets.precision, Some(12));
    }

    #[test]
    fn test_unannotated_methods_and_allowlist() {
        let holder = OperationHolder::new("shop.Reports")
            .with_method(MethodDescriptor::new("helper", "void"))
            .with_method(
                MethodDescriptor::new("hidden", "int")
                    .with_function(FunctionInfo::returning(ReturnKind::Simple, ReturnCardinality::One)),
            )
            .with_method(
                MethodDescriptor::new("visible", "int")
                    .with_function(FunctionInfo::returning(ReturnKind::Simple, ReturnCardinality::One)),
            )
            .with_allowlist(["helper", "visible"]);

        let imports = run(holder).unwrap();
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].name, "visible");
    }

    #[test]
    fn test_missing_return_type() {
        let holder = OperationHolder::new("shop.Reports")
            .with_method(MethodDescriptor::new("broken", "int").with_function(FunctionInfo::default()));

        assert!(matches!(
            run(holder),
            Err(ModelBuildError::FunctionReturnTypeMissing { ref function }) if function == "broken"
        ));
    }

    #[test]
    fn test_missing_parameter_name() {
        let holder = OperationHolder::new("shop.Reports").with_method(
            MethodDescriptor::new("byRegion", "int")
                .with_function(FunctionInfo::returning(ReturnKind::Simple, ReturnCardinality::One))
                .with_parameter("java.lang.String", None),
        );

        assert!(matches!(
            run(holder),
            Err(ModelBuildError::FunctionParameterNameMissing { position: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_entity_return_type() {
        let holder = OperationHolder::new("shop.Reports").with_method(
            MethodDescriptor::new("topOrders", "java.util.List")
                .returning_collection_of("shop.Order")
                .with_function(
                    FunctionInfo::returning(ReturnKind::Entity, ReturnCardinality::Many)
                        .with_entity_set("Orders"),
                ),
        );

        assert!(matches!(
            run(holder),
            Err(ModelBuildError::FunctionReturnTypeNotFound { ref java_type, .. }) if java_type == "shop.Order"
        ));
    }
}
