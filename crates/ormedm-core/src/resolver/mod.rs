//! Metamodel to EDM resolution.
//!
//! A build walks every visible entity once, in the order the introspector
//! reports them. Relationship attributes declared on both sides of one
//! relationship are merged into a single association. Referential
//! constraints are queued while entity types are still being built and
//! resolved in one bounded pass at the end; an association whose constraint
//! cannot be resolved in that pass is dropped from the schema.

mod association;
mod association_end;
mod complex_type;
mod container;
mod context;
mod entity_type;
mod function_import;
mod join_column;
mod naming;
mod navigation;
mod property;
mod referential_constraint;
mod type_map;

use crate::config::BuildConfig;
use crate::edm::EdmSchema;
use crate::error::Result;
use crate::metamodel::{EntityDescriptor, SchemaIntrospector};
use context::BuildContext;
use std::collections::HashSet;
use tracing::{info, instrument};

/// Incremental schema build over one persistence unit.
///
/// [`build_schema`] drives this for the common case. Driving it by hand
/// allows the constraint pass to run before every entity has been visited.
pub struct SchemaBuilder<'a> {
    ctx: BuildContext<'a>,
}

impl<'a> SchemaBuilder<'a> {
    /// Start a build.
    pub fn new(introspector: &'a dyn SchemaIntrospector, config: &'a BuildConfig) -> Self {
        Self {
            ctx: BuildContext::new(introspector, config),
        }
    }

    /// Namespace the schema is built into.
    pub fn namespace(&self) -> &str {
        &self.ctx.namespace
    }

    /// Build the entity type for one entity.
    ///
    /// Returns the entity type name, or `None` if the entity is excluded.
    pub fn visit_entity(&mut self, entity: &EntityDescriptor) -> Result<Option<String>> {
        entity_type::resolve(&mut self.ctx, entity)
    }

    /// Run one bounded pass over the queued referential constraints.
    ///
    /// Every queued constraint gets exactly one attempt. The association of
    /// a constraint that stays unresolved is removed; the constraint itself
    /// stays queued. Returns the number still queued.
    pub fn resolve_pending(&mut self) -> usize {
        association::drain_pending(&mut self.ctx)
    }

    /// Number of queued referential constraints.
    pub fn pending_constraints(&self) -> usize {
        self.ctx.pending.len()
    }

    /// Number of live associations.
    pub fn association_count(&self) -> usize {
        self.ctx.associations.len()
    }

    /// Assemble the schema.
    ///
    /// Navigation properties whose association was dropped are pruned.
    pub fn finish(self) -> Result<EdmSchema> {
        let mut ctx = self.ctx;
        association::collect_consistent(&mut ctx);
        let associations = std::mem::take(&mut ctx.consistent);

        let live: HashSet<&str> = associations.iter().map(|a| a.name.as_str()).collect();
        for entity_type in ctx.entity_types.values_mut() {
            entity_type
                .navigation_properties
                .retain(|n| live.contains(n.relationship.as_str()));
        }

        let function_imports = function_import::resolve_all(&ctx)?;
        let container = container::resolve(&ctx, &associations, function_imports);

        info!(
            namespace = %ctx.namespace,
            entity_types = ctx.entity_types.len(),
            complex_types = ctx.complex_types.len(),
            associations = associations.len(),
            function_imports = container.function_imports.len(),
            "Schema build completed"
        );

        Ok(EdmSchema {
            namespace: ctx.namespace,
            entity_types: ctx.entity_types.into_values().collect(),
            complex_types: ctx.complex_types.into_values().collect(),
            associations,
            container,
        })
    }
}

/// Build the EDM schema for a persistence unit.
#[instrument(skip_all, fields(persistence_unit = introspector.persistence_unit()))]
pub fn build_schema(introspector: &dyn SchemaIntrospector, config: &BuildConfig) -> Result<EdmSchema> {
    info!(entities = introspector.entities().len(), "Schema build started");

    let mut builder = SchemaBuilder::new(introspector, config);
    for entity in introspector.entities() {
        builder.visit_entity(entity)?;
    }
    builder.resolve_pending();
    builder.finish()
}
