//! ORMEDM Core - Entity data model resolution for object-relational metamodels.
//!
//! This crate turns the entities, embeddables and relationship annotations of
//! a persistence unit into an EDM graph: entity and complex types,
//! associations with end multiplicities and referential constraints,
//! navigation properties and function imports.

pub mod cache;
pub mod config;
pub mod edm;
pub mod error;
pub mod metamodel;
pub mod resolver;

pub use cache::SchemaCache;
pub use config::{BuildConfig, NameMapping};
pub use edm::{
    Association, AssociationEnd, AssociationSet, AssociationSetEnd, ComplexProperty, ComplexType,
    EdmSchema, EdmSimpleType, EntityContainer, EntitySet, EntityType, Facets, FunctionImport,
    FunctionImportParameter, FunctionReturnType, Mapping, Multiplicity, NavigationProperty,
    Property, PropertyRef, ReferentialConstraint, ReferentialConstraintRole, SimpleProperty,
};
pub use error::{ModelBuildError, Result};
pub use metamodel::{
    AttributeDescriptor, AttributeKind, ColumnInfo, EmbeddableDescriptor, EntityDescriptor,
    FunctionInfo, HttpMethod, JoinColumnInfo, Metamodel, MethodDescriptor, MethodParameter,
    OperationHolder, ParameterInfo, RelationshipInfo, ReturnCardinality, ReturnKind,
    ReturnTypeInfo, SchemaIntrospector, TemporalKind,
};
pub use resolver::{build_schema, SchemaBuilder};
