//! Field-name policy checks applied before a condition is emitted.
//!
//! Field names are interpolated into SQL verbatim. With the default
//! configuration nothing here rejects anything; callers that accept
//! filters from untrusted input should configure a whitelist
//! ([`CompilerConfig::allow_fields`]) or identifier validation.

mod column;

pub use column::{is_valid_field_name, is_valid_sql_identifier};

use crate::config::CompilerConfig;
use crate::error::CompileError;

/// Check a field name against the configured whitelist and identifier rule.
pub(crate) fn check_field(config: &CompilerConfig, field: &str) -> Result<(), CompileError> {
    if config.validate_identifiers && !is_valid_field_name(field) {
        return Err(CompileError::InvalidIdentifier {
            field: field.to_string(),
        });
    }

    if !config.allowed_fields.is_empty() && !config.allowed_fields.iter().any(|f| f == field) {
        return Err(CompileError::FieldNotAllowed {
            field: field.to_string(),
        });
    }

    Ok(())
}
