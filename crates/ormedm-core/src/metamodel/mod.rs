//! Persistence-layer metamodel consumed by the resolver.
//!
//! Attribute discovery happens outside this crate; an introspector hands the
//! resolver fully loaded descriptors through [`SchemaIntrospector`].

mod attribute;
mod entity;
mod memory;
mod operation;

pub use attribute::{
    AttributeDescriptor, AttributeKind, ColumnInfo, JoinColumnInfo, RelationshipInfo, TemporalKind,
};
pub use entity::{EmbeddableDescriptor, EntityDescriptor};
pub use memory::Metamodel;
pub use operation::{
    FunctionInfo, HttpMethod, MethodDescriptor, MethodParameter, OperationHolder, ParameterInfo,
    ReturnCardinality, ReturnKind, ReturnTypeInfo,
};

/// Source of persistence metadata for one persistence unit.
pub trait SchemaIntrospector {
    /// Name of the persistence unit.
    fn persistence_unit(&self) -> &str;

    /// Entities in the order they should be visited.
    fn entities(&self) -> &[EntityDescriptor];

    /// Look up an entity by its java type.
    fn entity_by_type(&self, java_type: &str) -> Option<&EntityDescriptor>;

    /// Look up an embeddable by its java type.
    fn embeddable(&self, java_type: &str) -> Option<&EmbeddableDescriptor>;

    /// Whether an entity (or one of its attributes) is hidden from the model.
    fn is_excluded(&self, entity: &str, attribute: Option<&str>) -> bool;

    /// Registered operation holders.
    fn operation_holders(&self) -> &[OperationHolder];
}
