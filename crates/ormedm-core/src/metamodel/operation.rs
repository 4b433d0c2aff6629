//! Operation holders exposed as function imports.

use super::attribute::ColumnInfo;
use serde::{Deserialize, Serialize};

/// Kind of value a function returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnKind {
    /// Entity instances of an already-built entity type.
    Entity,
    /// EDM scalar values.
    Simple,
    /// Instances of an already-built complex type.
    Complex,
}

/// Cardinality of a function result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnCardinality {
    /// A single value.
    One,
    /// A collection of values.
    Many,
}

/// HTTP method a function import is bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read-only invocation.
    #[default]
    Get,
    /// Side-effecting invocation.
    Post,
    /// Replace invocation.
    Put,
    /// Delete invocation.
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Declared return type of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnTypeInfo {
    /// Return kind.
    pub kind: ReturnKind,
    /// Return cardinality.
    pub cardinality: ReturnCardinality,
}

/// Function annotation carried by an exposed method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    /// EDM name; defaults to the method name.
    #[serde(default)]
    pub name: Option<String>,
    /// Return kind and cardinality.
    #[serde(default)]
    pub return_type: Option<ReturnTypeInfo>,
    /// Entity set for entity-returning functions.
    #[serde(default)]
    pub entity_set: Option<String>,
    /// HTTP method.
    #[serde(default)]
    pub http_method: HttpMethod,
}

/// Parameter annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name (mandatory for exposure).
    #[serde(default)]
    pub name: Option<String>,
    /// Optional facets.
    #[serde(default)]
    pub facets: Option<ColumnInfo>,
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodParameter {
    /// Declared java type.
    pub java_type: String,
    /// Parameter annotation; unannotated parameters are not exposed.
    #[serde(default)]
    pub annotation: Option<ParameterInfo>,
}

/// One method of an operation holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name.
    pub name: String,
    /// Declared java return type.
    pub return_type: String,
    /// Element type when the method returns a collection.
    #[serde(default)]
    pub return_element_type: Option<String>,
    /// Function annotation; methods without one are ignored.
    #[serde(default)]
    pub function: Option<FunctionInfo>,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<MethodParameter>,
}

impl MethodDescriptor {
    /// Create an unannotated method.
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            return_element_type: None,
            function: None,
            parameters: Vec::new(),
        }
    }

    /// Set the collection element type of the return value.
    pub fn returning_collection_of(mut self, element_type: impl Into<String>) -> Self {
        self.return_element_type = Some(element_type.into());
        self
    }

    /// Attach a function annotation.
    pub fn with_function(mut self, function: FunctionInfo) -> Self {
        self.function = Some(function);
        self
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, java_type: impl Into<String>, name: Option<&str>) -> Self {
        self.parameters.push(MethodParameter {
            java_type: java_type.into(),
            annotation: Some(ParameterInfo {
                name: name.map(String::from),
                facets: None,
            }),
        });
        self
    }

    /// The returned type with collections unwrapped.
    pub fn returned_type(&self) -> &str {
        self.return_element_type.as_deref().unwrap_or(&self.return_type)
    }
}

impl FunctionInfo {
    /// Create a function annotation with a return type.
    pub fn returning(kind: ReturnKind, cardinality: ReturnCardinality) -> Self {
        Self {
            return_type: Some(ReturnTypeInfo { kind, cardinality }),
            ..Self::default()
        }
    }

    /// Set the entity set.
    pub fn with_entity_set(mut self, entity_set: impl Into<String>) -> Self {
        self.entity_set = Some(entity_set.into());
        self
    }

    /// Set the EDM name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A class registered as a source of custom operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationHolder {
    /// Fully qualified class name.
    pub class_name: String,
    /// Restrict exposure to these method names.
    #[serde(default)]
    pub allowlist: Option<Vec<String>>,
    /// Methods of the class.
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl OperationHolder {
    /// Create a holder without methods.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            allowlist: None,
            methods: Vec::new(),
        }
    }

    /// Add a method.
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Restrict to the given method names.
    pub fn with_allowlist(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.allowlist = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Methods that pass the allowlist.
    pub fn exposed_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter().filter(move |m| match &self.allowlist {
            Some(names) => names.iter().any(|n| n == &m.name),
            None => true,
        })
    }
}
