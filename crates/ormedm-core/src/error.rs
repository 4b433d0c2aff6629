//! Model build error types.

use thiserror::Error;

/// Errors raised while resolving a metamodel into an EDM schema.
///
/// Every resolver fails fast with one of these; the build is aborted and no
/// partial schema is produced.
#[derive(Debug, Error)]
pub enum ModelBuildError {
    /// An entity, embeddable, attribute or operation has no usable name.
    #[error("missing name for {kind}")]
    MissingName {
        /// What kind of member was unnamed.
        kind: &'static str,
    },

    /// Two properties of one structural type resolved to the same EDM name.
    #[error("duplicate property {property} on {owner}")]
    DuplicateProperty {
        /// Owning entity or complex type.
        owner: String,
        /// Conflicting property name.
        property: String,
    },

    /// Two types of the same kind resolved to the same EDM name.
    #[error("duplicate {kind} {name}")]
    DuplicateType {
        /// Kind of type ("entity type", "complex type").
        kind: &'static str,
        /// Conflicting name.
        name: String,
    },

    /// A join column references a column that the referenced entity does not map.
    #[error("referenced column {column} not found on {entity} (join column of {attribute})")]
    ReferenceAttributeNotFound {
        /// Referenced entity.
        entity: String,
        /// Relationship attribute carrying the join column.
        attribute: String,
        /// Column that could not be matched.
        column: String,
    },

    /// A function parameter descriptor has no name.
    #[error("parameter {position} of function {function} has no name")]
    FunctionParameterNameMissing {
        /// Function import name.
        function: String,
        /// Zero-based parameter position.
        position: usize,
    },

    /// An entity-returning function does not name its entity set.
    #[error("function {function} returns entities but declares no entity set")]
    FunctionEntitySetMissing {
        /// Function import name.
        function: String,
    },

    /// A function descriptor carries no return kind.
    #[error("function {function} declares no return type")]
    FunctionReturnTypeMissing {
        /// Function import name.
        function: String,
    },

    /// The return type of a function could not be matched to a built type.
    #[error("return type {java_type} of function {function} not found in the model")]
    FunctionReturnTypeNotFound {
        /// Function import name.
        function: String,
        /// Declared java return type.
        java_type: String,
    },

    /// A java type has no EDM scalar counterpart.
    #[error("unsupported java type {java_type} for {member}")]
    UnsupportedType {
        /// Member being mapped.
        member: String,
        /// Declared java type.
        java_type: String,
    },

    /// The metamodel is incomplete or inconsistent.
    #[error("metamodel introspection failed: {0}")]
    GeneralReflectionFailure(String),

    /// Schema snapshot serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Schema snapshot deserialization failed.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Result alias for model building.
pub type Result<T> = std::result::Result<T, ModelBuildError>;
