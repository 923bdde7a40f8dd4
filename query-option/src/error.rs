//! Error type for filter compilation.

use thiserror::Error;

/// Errors raised while interpreting or compiling a filter.
///
/// Any error aborts the whole compile call; no partial fragment is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompileError {
    /// Input text is not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// A filter (or nested group member) is not a JSON object.
    #[error("Expected JSON object")]
    ExpectedObject,

    /// Operand cannot be bound for this operator (e.g. `$in` with a scalar).
    #[error("Operator '{operator}' on field '{field}' does not accept {found} operand")]
    UnsupportedOperandShape {
        /// Field the operator was applied to.
        field: String,
        /// Canonical operator key, e.g. `$in`.
        operator: &'static str,
        /// Shape of the rejected operand.
        found: &'static str,
    },

    /// Unrecognized operator key inside an operator clause (strict mode).
    #[error("Unknown operator '{operator}' on field '{field}'")]
    UnknownOperator {
        /// Field the clause belongs to.
        field: String,
        /// Operator key as written in the input.
        operator: String,
    },

    /// `$`-prefixed key that is neither a field nor a logical operator (strict mode).
    #[error("Unknown key '{key}'")]
    UnknownKey {
        /// Key as written in the input.
        key: String,
    },

    /// Logical group whose operand is not an array of objects (strict mode).
    #[error("Operator '{operator}' expects an array of filter objects")]
    MalformedGroup {
        /// `$and` or `$or`.
        operator: &'static str,
    },

    /// Logical groups nested deeper than the configured limit.
    #[error("Filter nesting exceeds maximum depth of {max}")]
    MaxDepthExceeded {
        /// Configured limit.
        max: usize,
    },

    /// Field not present in the configured whitelist.
    #[error("Field '{field}' is not allowed")]
    FieldNotAllowed {
        /// Rejected field name.
        field: String,
    },

    /// Field name is not a plain SQL identifier (identifier validation enabled).
    #[error("Invalid field name '{field}': must be a SQL identifier")]
    InvalidIdentifier {
        /// Rejected field name.
        field: String,
    },
}

impl From<serde_json::Error> for CompileError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_operand_display() {
        let err = CompileError::UnsupportedOperandShape {
            field: "id".to_string(),
            operator: "$in",
            found: "integer",
        };
        assert_eq!(
            err.to_string(),
            "Operator '$in' on field 'id' does not accept integer operand"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CompileError = json_err.into();
        assert!(matches!(err, CompileError::InvalidJson(_)));
        assert!(err.to_string().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_error_debug() {
        let err = CompileError::MaxDepthExceeded { max: 3 };
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("MaxDepthExceeded"));
        assert!(debug_str.contains("max: 3"));
    }
}
