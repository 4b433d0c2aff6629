//! Entity data model descriptors.
//!
//! These are the immutable outputs of a schema build, shared read-only once
//! the build completes.

mod association;
mod container;
mod navigation;
mod property;
mod schema;
mod structural;
mod types;

pub use association::{Association, AssociationEnd, ReferentialConstraint, ReferentialConstraintRole};
pub use container::{
    AssociationSet, AssociationSetEnd, EntityContainer, EntitySet, FunctionImport,
    FunctionImportParameter, FunctionReturnType,
};
pub use navigation::NavigationProperty;
pub use property::{ComplexProperty, Property, PropertyRef, SimpleProperty};
pub use schema::EdmSchema;
pub use structural::{ComplexType, EntityType};
pub use types::{EdmSimpleType, Facets, Mapping, Multiplicity};
