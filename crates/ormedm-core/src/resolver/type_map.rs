//! Java type to EDM scalar mapping.

use crate::edm::EdmSimpleType;
use crate::error::{ModelBuildError, Result};
use crate::metamodel::TemporalKind;

/// Map a java type to an EDM scalar kind.
///
/// `member` is only used for the error message.
pub(crate) fn edm_simple_type(
    member: &str,
    java_type: &str,
    temporal: Option<TemporalKind>,
    enumerated: bool,
) -> Result<EdmSimpleType> {
    if enumerated {
        return Ok(EdmSimpleType::String);
    }
    let kind = match java_type {
        "java.lang.String" | "String" | "char" | "java.lang.Character" | "Character" | "char[]"
        | "java.lang.Character[]" | "java.sql.Clob" => EdmSimpleType::String,
        "long" | "java.lang.Long" | "Long" => EdmSimpleType::Int64,
        "int" | "java.lang.Integer" | "Integer" => EdmSimpleType::Int32,
        "short" | "java.lang.Short" | "Short" => EdmSimpleType::Int16,
        "byte" | "java.lang.Byte" | "Byte" => EdmSimpleType::Byte,
        "boolean" | "java.lang.Boolean" | "Boolean" => EdmSimpleType::Boolean,
        "double" | "java.lang.Double" | "Double" => EdmSimpleType::Double,
        "float" | "java.lang.Float" | "Float" => EdmSimpleType::Single,
        "java.math.BigDecimal" | "java.math.BigInteger" => EdmSimpleType::Decimal,
        "byte[]" | "java.lang.Byte[]" | "java.sql.Blob" => EdmSimpleType::Binary,
        "java.util.UUID" => EdmSimpleType::Guid,
        "java.sql.Time" => EdmSimpleType::Time,
        "java.sql.Date" | "java.sql.Timestamp" | "java.util.Date" | "java.util.Calendar" => {
            match temporal {
                Some(TemporalKind::Time) => EdmSimpleType::Time,
                _ => EdmSimpleType::DateTime,
            }
        }
        _ => {
            return Err(ModelBuildError::UnsupportedType {
                member: member.to_string(),
                java_type: java_type.to_string(),
            })
        }
    };
    Ok(kind)
}

/// Whether a java type is a primitive that cannot hold null.
pub(crate) fn is_primitive(java_type: &str) -> bool {
    matches!(
        java_type,
        "long" | "int" | "short" | "byte" | "boolean" | "double" | "float" | "char"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(java_type: &str) -> Result<EdmSimpleType> {
        edm_simple_type("x", java_type, None, false)
    }

    #[test]
    fn test_common_types() {
        assert_eq!(map("java.lang.String").unwrap(), EdmSimpleType::String);
        assert_eq!(map("long").unwrap(), EdmSimpleType::Int64);
        assert_eq!(map("java.lang.Integer").unwrap(), EdmSimpleType::Int32);
        assert_eq!(map("java.math.BigDecimal").unwrap(), EdmSimpleType::Decimal);
        assert_eq!(map("byte[]").unwrap(), EdmSimpleType::Binary);
        assert_eq!(map("java.util.UUID").unwrap(), EdmSimpleType::Guid);
    }

    #[test]
    fn test_temporal_and_enum() {
        assert_eq!(map("java.util.Date").unwrap(), EdmSimpleType::DateTime);
        assert_eq!(
            edm_simple_type("x", "java.util.Date", Some(TemporalKind::Time), false).unwrap(),
            EdmSimpleType::Time
        );
        assert_eq!(
            edm_simple_type("status", "shop.Status", None, true).unwrap(),
            EdmSimpleType::String
        );
    }

    #[test]
    fn test_unsupported_type() {
        let err = map("java.lang.Object").unwrap_err();
        assert!(matches!(err, ModelBuildError::UnsupportedType { .. }));
    }

    #[test]
    fn test_primitives() {
        assert!(is_primitive("long"));
        assert!(!is_primitive("java.lang.Long"));
    }
}
