//! Attribute descriptors of persistent types.

use serde::{Deserialize, Serialize};

/// Persistence kind of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeKind {
    /// Plain column-mapped value.
    Basic,
    /// Embeddable value type (also used for embedded identifiers).
    Embedded,
    /// Single-valued relationship, unique on both sides.
    OneToOne,
    /// Collection-valued relationship whose foreign key lives on the other side.
    OneToMany,
    /// Single-valued relationship holding the foreign key.
    ManyToOne,
    /// Collection-valued relationship through a join table.
    ManyToMany,
}

impl AttributeKind {
    /// Check if this attribute describes a relationship to another entity.
    pub fn is_relationship(&self) -> bool {
        !matches!(self, AttributeKind::Basic | AttributeKind::Embedded)
    }

    /// Check if the referenced end is single-valued.
    pub fn is_to_one(&self) -> bool {
        matches!(self, AttributeKind::OneToOne | AttributeKind::ManyToOne)
    }
}

/// Temporal precision of a date/time attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemporalKind {
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    Timestamp,
}

fn default_true() -> bool {
    true
}

/// Column annotation of a basic attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name; defaults to the attribute name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the column accepts nulls.
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Maximum length for character data.
    #[serde(default)]
    pub length: Option<u32>,
    /// Decimal precision.
    #[serde(default)]
    pub precision: Option<u8>,
    /// Decimal scale.
    #[serde(default)]
    pub scale: Option<u8>,
}

impl ColumnInfo {
    /// Create a nullable column with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Mark the column as not nullable.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Set the maximum length.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set decimal precision and scale.
    pub fn with_precision(mut self, precision: u8, scale: u8) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }
}

impl Default for ColumnInfo {
    fn default() -> Self {
        Self {
            name: None,
            nullable: true,
            length: None,
            precision: None,
            scale: None,
        }
    }
}

/// Join column annotation of a single-valued relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinColumnInfo {
    /// Local foreign-key column; defaults to the attribute name.
    #[serde(default)]
    pub name: Option<String>,
    /// Referenced column; defaults to the referenced identifier column.
    #[serde(default)]
    pub referenced_column_name: Option<String>,
    /// Whether the foreign key accepts nulls.
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Whether the column is written on insert.
    #[serde(default = "default_true")]
    pub insertable: bool,
    /// Whether the column is written on update.
    #[serde(default = "default_true")]
    pub updatable: bool,
}

impl JoinColumnInfo {
    /// Create a join column with the given local name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the referenced column name.
    pub fn references(mut self, column: impl Into<String>) -> Self {
        self.referenced_column_name = Some(column.into());
        self
    }

    /// Mark the foreign key as not nullable.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark the column as read-only (neither insertable nor updatable).
    pub fn read_only(mut self) -> Self {
        self.insertable = false;
        self.updatable = false;
        self
    }

    /// Whether the foreign key is writable and gets a mirrored property.
    pub fn is_writable(&self) -> bool {
        self.insertable && self.updatable
    }
}

impl Default for JoinColumnInfo {
    fn default() -> Self {
        Self {
            name: None,
            referenced_column_name: None,
            nullable: true,
            insertable: true,
            updatable: true,
        }
    }
}

/// Relationship annotation data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipInfo {
    /// Owning attribute on the other side, for inverse declarations.
    #[serde(default)]
    pub mapped_by: Option<String>,
    /// Whether the referenced end may be absent.
    #[serde(default)]
    pub optional: bool,
}

/// One attribute of an entity or embeddable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Attribute name as declared on the persistent class.
    pub name: String,
    /// Persistence kind.
    pub kind: AttributeKind,
    /// Declared java type (fully qualified).
    pub java_type: String,
    /// Element type of collection-valued attributes.
    #[serde(default)]
    pub element_type: Option<String>,
    /// Whether the attribute is (part of) the identifier.
    #[serde(default)]
    pub identifier: bool,
    /// Column annotation.
    #[serde(default)]
    pub column: Option<ColumnInfo>,
    /// Relationship annotation.
    #[serde(default)]
    pub relationship: Option<RelationshipInfo>,
    /// Join columns of single-valued relationships.
    #[serde(default)]
    pub join_columns: Vec<JoinColumnInfo>,
    /// Temporal precision.
    #[serde(default)]
    pub temporal: Option<TemporalKind>,
    /// Whether the attribute is a java enum.
    #[serde(default)]
    pub enumerated: bool,
}

impl AttributeDescriptor {
    fn new(name: impl Into<String>, kind: AttributeKind, java_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            java_type: java_type.into(),
            element_type: None,
            identifier: false,
            column: None,
            relationship: None,
            join_columns: Vec::new(),
            temporal: None,
            enumerated: false,
        }
    }

    /// Create a basic attribute.
    pub fn basic(name: impl Into<String>, java_type: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Basic, java_type)
    }

    /// Create a basic identifier attribute.
    pub fn id(name: impl Into<String>, java_type: impl Into<String>) -> Self {
        Self::basic(name, java_type).identifier()
    }

    /// Create an embedded attribute.
    pub fn embedded(name: impl Into<String>, java_type: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Embedded, java_type)
    }

    /// Create an embedded identifier attribute.
    pub fn embedded_id(name: impl Into<String>, java_type: impl Into<String>) -> Self {
        Self::embedded(name, java_type).identifier()
    }

    /// Create a many-to-one relationship to `target`.
    pub fn many_to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::ManyToOne, target).with_relationship()
    }

    /// Create a one-to-one relationship to `target`.
    pub fn one_to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::OneToOne, target).with_relationship()
    }

    /// Create a one-to-many relationship to a collection of `target`.
    pub fn one_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::collection(name, AttributeKind::OneToMany, target)
    }

    /// Create a many-to-many relationship to a collection of `target`.
    pub fn many_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::collection(name, AttributeKind::ManyToMany, target)
    }

    fn collection(name: impl Into<String>, kind: AttributeKind, target: impl Into<String>) -> Self {
        let mut attribute = Self::new(name, kind, "java.util.List").with_relationship();
        attribute.element_type = Some(target.into());
        attribute
    }

    fn with_relationship(mut self) -> Self {
        self.relationship = Some(RelationshipInfo::default());
        self
    }

    /// Mark as identifier.
    pub fn identifier(mut self) -> Self {
        self.identifier = true;
        self
    }

    /// Set the column annotation.
    pub fn with_column(mut self, column: ColumnInfo) -> Self {
        self.column = Some(column);
        self
    }

    /// Add a join column.
    pub fn with_join_column(mut self, join_column: JoinColumnInfo) -> Self {
        self.join_columns.push(join_column);
        self
    }

    /// Declare this side as the inverse of `owner`.
    pub fn mapped_by(mut self, owner: impl Into<String>) -> Self {
        self.relationship.get_or_insert_with(Default::default).mapped_by = Some(owner.into());
        self
    }

    /// Declare the referenced end as optional.
    pub fn optional(mut self) -> Self {
        self.relationship.get_or_insert_with(Default::default).optional = true;
        self
    }

    /// Set the temporal precision.
    pub fn with_temporal(mut self, temporal: TemporalKind) -> Self {
        self.temporal = Some(temporal);
        self
    }

    /// Mark as an enum-typed attribute.
    pub fn enumerated(mut self) -> Self {
        self.enumerated = true;
        self
    }

    /// The referenced type: element type for collections, declared type otherwise.
    pub fn target_type(&self) -> &str {
        self.element_type.as_deref().unwrap_or(&self.java_type)
    }

    /// The mapped column name, falling back to the attribute name.
    pub fn column_name(&self) -> &str {
        self.column
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or(&self.name)
    }

    /// The inverse-side pointer, if any.
    pub fn mapped_by_name(&self) -> Option<&str> {
        self.relationship.as_ref().and_then(|r| r.mapped_by.as_deref())
    }

    /// Whether the referenced end is declared optional.
    pub fn is_optional(&self) -> bool {
        self.relationship.as_ref().is_some_and(|r| r.optional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert!(!AttributeKind::Basic.is_relationship());
        assert!(!AttributeKind::Embedded.is_relationship());
        assert!(AttributeKind::OneToMany.is_relationship());
        assert!(AttributeKind::ManyToOne.is_to_one());
        assert!(AttributeKind::OneToOne.is_to_one());
        assert!(!AttributeKind::ManyToMany.is_to_one());
    }

    #[test]
    fn test_collection_target_type() {
        let items = AttributeDescriptor::one_to_many("items", "shop.Item").mapped_by("order");

        assert_eq!(items.java_type, "java.util.List");
        assert_eq!(items.target_type(), "shop.Item");
        assert_eq!(items.mapped_by_name(), Some("order"));
        assert!(!items.is_optional());
    }

    #[test]
    fn test_column_name_defaults_to_attribute() {
        let plain = AttributeDescriptor::basic("name", "java.lang.String");
        assert_eq!(plain.column_name(), "name");

        let mapped = AttributeDescriptor::basic("name", "java.lang.String")
            .with_column(ColumnInfo::named("CUSTOMER_NAME"));
        assert_eq!(mapped.column_name(), "CUSTOMER_NAME");
    }

    #[test]
    fn test_join_column_defaults_deserialize() {
        let jc: JoinColumnInfo = serde_json::from_str(r#"{"name":"ORDER_ID"}"#).unwrap();

        assert_eq!(jc.name.as_deref(), Some("ORDER_ID"));
        assert!(jc.nullable);
        assert!(jc.is_writable());
        assert!(!JoinColumnInfo::named("X").read_only().is_writable());
    }
}
