//! Scalar kinds, multiplicities, facets and mapping records.

use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::fmt;

/// EDM primitive types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub enum EdmSimpleType {
    /// Binary data.
    Binary,
    /// Boolean value.
    Boolean,
    /// Unsigned 8-bit integer.
    Byte,
    /// Date and time.
    DateTime,
    /// Fixed-precision decimal.
    Decimal,
    /// 64-bit floating point.
    Double,
    /// 128-bit identifier.
    Guid,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point.
    Single,
    /// Character data.
    String,
    /// Time of day.
    Time,
}

impl EdmSimpleType {
    /// Fully qualified EDM type name.
    pub fn qualified_name(&self) -> &'static str {
        match self {
            EdmSimpleType::Binary => "Edm.Binary",
            EdmSimpleType::Boolean => "Edm.Boolean",
            EdmSimpleType::Byte => "Edm.Byte",
            EdmSimpleType::DateTime => "Edm.DateTime",
            EdmSimpleType::Decimal => "Edm.Decimal",
            EdmSimpleType::Double => "Edm.Double",
            EdmSimpleType::Guid => "Edm.Guid",
            EdmSimpleType::Int16 => "Edm.Int16",
            EdmSimpleType::Int32 => "Edm.Int32",
            EdmSimpleType::Int64 => "Edm.Int64",
            EdmSimpleType::Single => "Edm.Single",
            EdmSimpleType::String => "Edm.String",
            EdmSimpleType::Time => "Edm.Time",
        }
    }

    /// Whether a max-length facet applies.
    pub fn has_length(&self) -> bool {
        matches!(self, EdmSimpleType::String | EdmSimpleType::Binary)
    }
}

impl fmt::Display for EdmSimpleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

/// Cardinality of an association end.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub enum Multiplicity {
    /// Zero or one instance.
    ZeroToOne,
    /// Exactly one instance.
    One,
    /// Any number of instances.
    Many,
}

impl Multiplicity {
    /// True when the two multiplicities differ only in optionality (ONE vs ZERO_TO_ONE).
    pub fn is_optional_variant_of(&self, other: Multiplicity) -> bool {
        matches!(
            (self, other),
            (Multiplicity::One, Multiplicity::ZeroToOne)
                | (Multiplicity::ZeroToOne, Multiplicity::One)
        )
    }

    /// Relax ONE to ZERO_TO_ONE when `other` is the optional variant.
    ///
    /// Never tightens: ZERO_TO_ONE and MANY are left unchanged.
    pub fn widened_by(&self, other: Multiplicity) -> Multiplicity {
        match (self, other) {
            (Multiplicity::One, Multiplicity::ZeroToOne) => Multiplicity::ZeroToOne,
            (current, _) => *current,
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplicity::ZeroToOne => write!(f, "0..1"),
            Multiplicity::One => write!(f, "1"),
            Multiplicity::Many => write!(f, "*"),
        }
    }
}

/// Property facets.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct Facets {
    /// Whether the value may be null; `None` means unspecified.
    pub nullable: Option<bool>,
    /// Maximum length of character or binary data.
    pub max_length: Option<u32>,
    /// Decimal precision.
    pub precision: Option<u8>,
    /// Decimal scale.
    pub scale: Option<u8>,
}

impl Facets {
    /// Facets with only the nullability set.
    pub fn nullable(nullable: bool) -> Self {
        Self {
            nullable: Some(nullable),
            ..Self::default()
        }
    }
}

/// Link from an EDM member back to its persistence-layer origin.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct Mapping {
    /// Persistence member name; dotted for members of flattened embeddables.
    pub internal_name: String,
    /// Java type of the member.
    pub java_type: String,
    /// Source column, for column-mapped members.
    pub column_name: Option<String>,
}

impl Mapping {
    /// Create a mapping without a column.
    pub fn new(internal_name: impl Into<String>, java_type: impl Into<String>) -> Self {
        Self {
            internal_name: internal_name.into(),
            java_type: java_type.into(),
            column_name: None,
        }
    }

    /// Set the source column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column_name = Some(column.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_variant() {
        assert!(Multiplicity::One.is_optional_variant_of(Multiplicity::ZeroToOne));
        assert!(Multiplicity::ZeroToOne.is_optional_variant_of(Multiplicity::One));
        assert!(!Multiplicity::One.is_optional_variant_of(Multiplicity::One));
        assert!(!Multiplicity::Many.is_optional_variant_of(Multiplicity::One));
    }

    #[test]
    fn test_widening_is_monotonic() {
        assert_eq!(
            Multiplicity::One.widened_by(Multiplicity::ZeroToOne),
            Multiplicity::ZeroToOne
        );
        assert_eq!(
            Multiplicity::ZeroToOne.widened_by(Multiplicity::One),
            Multiplicity::ZeroToOne
        );
        assert_eq!(Multiplicity::Many.widened_by(Multiplicity::ZeroToOne), Multiplicity::Many);
        assert_eq!(Multiplicity::One.widened_by(Multiplicity::Many), Multiplicity::One);
    }

    #[test]
    fn test_display() {
        assert_eq!(EdmSimpleType::Int64.to_string(), "Edm.Int64");
        assert_eq!(Multiplicity::ZeroToOne.to_string(), "0..1");
        assert_eq!(Multiplicity::Many.to_string(), "*");
        assert!(EdmSimpleType::String.has_length());
        assert!(!EdmSimpleType::Int32.has_length());
    }
}
