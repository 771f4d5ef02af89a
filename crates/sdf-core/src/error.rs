//! Error types for document parsing
//!
//! Every failure aborts parsing of the whole document. There is no
//! partial-result mode; callers decide how to report.

use thiserror::Error;

/// Errors raised while validating and parsing an mc-sdf-1 document
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SdfError {
    #[error("Bad document: {reason}")]
    BadDocument { reason: String },

    #[error("Expecting version \"{expected}\" but got \"{found}\"")]
    BadVersion { expected: String, found: String },

    #[error("The key \"{key}\" is not recognized in {scope}")]
    InvalidKey { scope: &'static str, key: String },

    #[error("Unsecure key \"{key}\": keys must not start with '_'")]
    UnsecureKey { key: String },

    #[error("Unexpected suffix: {reason}")]
    UnexpectedSuffix { reason: String },

    #[error(
        "Item suffix field \"{field}\" is not one of: {}",
        crate::item::SuffixField::expected_names()
    )]
    InvalidSuffixField { field: String },

    #[error("Unknown operation \"{name}\" (expected Destroy, Keep or Replace)")]
    UnknownOperation { name: String },

    #[error("Unknown facing \"{name}\"")]
    UnknownFacing { name: String },

    #[error("Malformed structure: {reason}")]
    MalformedStructure { reason: String },

    #[error("Item \"{record}\": component {component} is not an integer")]
    InvalidCoordinate { record: String, component: String },

    #[error("Coordinate overflow on the {axis} axis")]
    CoordinateOverflow { axis: &'static str },

    #[error("Field \"{field}\" must be {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, SdfError>;

impl SdfError {
    pub(crate) fn wrong_type(
        field: impl Into<String>,
        expected: &'static str,
        found: &serde_yaml::Value,
    ) -> Self {
        SdfError::WrongType {
            field: field.into(),
            expected,
            found: crate::value::kind_name(found),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        SdfError::MalformedStructure {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = SdfError::InvalidKey {
            scope: "cell",
            key: "colour".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The key \"colour\" is not recognized in cell"
        );

        let err = SdfError::BadVersion {
            expected: "1.0".to_string(),
            found: "1.1".to_string(),
        };
        assert!(err.to_string().contains("\"1.1\""));

        let err = SdfError::InvalidSuffixField {
            field: "colour".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Item suffix field \"colour\" is not one of: facing, material"
        );
    }

    #[test]
    fn test_wrong_type_reports_kind() {
        let err = SdfError::wrong_type("x", "an integer", &serde_yaml::Value::from("a"));
        assert_eq!(
            err,
            SdfError::WrongType {
                field: "x".to_string(),
                expected: "an integer",
                found: "a string",
            }
        );
    }
}
