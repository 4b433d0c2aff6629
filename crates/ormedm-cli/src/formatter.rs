//! Output formatters for built schemas.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use ormedm_core::{
    Association, AssociationEnd, EdmSchema, EntityType, FunctionImport, Property,
    ReferentialConstraintRole,
};

/// Output format for schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter: Send + Sync {
    /// Format a built schema.
    fn format_schema(&self, schema: &EdmSchema) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_schema(&self, schema: &EdmSchema) -> String {
        let mut sections = vec![format!(
            "Namespace: {}\nContainer: {}",
            schema.namespace, schema.container.name
        )];

        sections.push(entity_type_table(&schema.entity_types).to_string());

        if !schema.complex_types.is_empty() {
            let mut table = Table::new();
            table.set_header(vec!["Complex Type", "Properties"]);
            for complex_type in &schema.complex_types {
                table.add_row(vec![
                    Cell::new(&complex_type.name),
                    Cell::new(property_list(&complex_type.properties)),
                ]);
            }
            sections.push(table.to_string());
        }

        if !schema.associations.is_empty() {
            sections.push(association_table(&schema.associations).to_string());
        }

        let mut sets = Table::new();
        sets.set_header(vec!["Entity Set", "Entity Type"]);
        for set in &schema.container.entity_sets {
            sets.add_row(vec![&set.name, &set.entity_type]);
        }
        sections.push(sets.to_string());

        if !schema.container.function_imports.is_empty() {
            sections.push(function_table(&schema.container.function_imports).to_string());
        }

        sections.join("\n\n")
    }
}

fn entity_type_table(entity_types: &[EntityType]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Entity Type", "Key", "Properties", "Navigation"]);

    for entity_type in entity_types {
        let navigation = entity_type
            .navigation_properties
            .iter()
            .map(|n| format!("{} -> {}", n.name, n.to_role))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(&entity_type.name),
            Cell::new(entity_type.key_names().join(", ")),
            Cell::new(property_list(&entity_type.properties)),
            Cell::new(navigation),
        ]);
    }
    table
}

fn property_list(properties: &[Property]) -> String {
    properties
        .iter()
        .map(|p| match p {
            Property::Simple(s) => {
                let nullable = if s.facets.nullable == Some(false) { "" } else { "?" };
                format!("{}: {}{}", s.name, s.edm_type.qualified_name(), nullable)
            }
            Property::Complex(c) => format!("{}: {}", c.name, c.type_name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn association_table(associations: &[Association]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Association", "End 1", "End 2", "Constraint"]);

    for association in associations {
        let constraint = association
            .referential_constraint
            .as_ref()
            .map(|c| format!("{} <- {}", role(&c.principal), role(&c.dependent)))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&association.name),
            Cell::new(end(&association.end1)),
            Cell::new(end(&association.end2)),
            Cell::new(constraint),
        ]);
    }
    table
}

fn end(end: &AssociationEnd) -> String {
    if end.role == end.entity_type {
        format!("{} [{}]", end.role, end.multiplicity)
    } else {
        format!("{} ({}) [{}]", end.role, end.entity_type, end.multiplicity)
    }
}

fn role(role: &ReferentialConstraintRole) -> String {
    let refs: Vec<&str> = role.property_refs.iter().map(|r| r.name.as_str()).collect();
    format!("{}({})", role.role, refs.join(", "))
}

fn function_table(functions: &[FunctionImport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Function", "Method", "Returns", "Entity Set", "Parameters"]);

    for function in functions {
        let parameters = function
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.edm_type.qualified_name()))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(&function.name),
            Cell::new(&function.http_method),
            Cell::new(format!(
                "{} [{}]",
                function.return_type.type_name, function.return_type.multiplicity
            )),
            Cell::new(function.entity_set.as_deref().unwrap_or("")),
            Cell::new(parameters),
        ]);
    }
    table
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_schema(&self, schema: &EdmSchema) -> String {
        serde_json::to_string_pretty(schema).unwrap_or_else(|_| "{}".to_string())
    }
}
