//! Compiler configuration.
//!
//! The defaults keep the permissive behavior: unknown operator keys and
//! malformed groups are skipped, and field names pass through unchecked.
//! `CompilerConfig` deserializes with every key optional, so it can sit
//! inside an application's own config file:
//!
//! ```
//! use query_option::CompilerConfig;
//!
//! let config: CompilerConfig = serde_json::from_str(
//!     r#"{"strict": true, "allowed_fields": ["name", "age"]}"#,
//! ).unwrap();
//! assert!(config.strict);
//! assert_eq!(config.max_depth, 8);
//! ```

use serde::{Deserialize, Serialize};

/// Default maximum nesting of logical groups.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Settings for [`FilterCompiler`](crate::FilterCompiler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct CompilerConfig {
    /// Turn silently skipped input into errors.
    pub strict: bool,
    /// Maximum nesting depth of `$and`/`$or` groups.
    pub max_depth: usize,
    /// Allowed field names (whitelist). Empty = allow all fields.
    pub allowed_fields: Vec<String>,
    /// Reject field names that are not plain (optionally dotted) SQL identifiers.
    pub validate_identifiers: bool,
    /// Emit `ORDER` instead of `ORDER BY` for callers that depend on it.
    pub legacy_order_keyword: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            allowed_fields: Vec::new(),
            validate_identifiers: false,
            legacy_order_keyword: false,
        }
    }
}

impl CompilerConfig {
    /// Permissive defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict mode.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set maximum nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set allowed fields (whitelist).
    ///
    /// Only fields in this list can appear in a filter.
    /// If empty, all fields are allowed.
    #[must_use]
    pub fn allow_fields(mut self, fields: &[&str]) -> Self {
        self.allowed_fields = fields.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Require field names to be SQL identifiers.
    #[must_use]
    pub const fn validate_identifiers(mut self, validate: bool) -> Self {
        self.validate_identifiers = validate;
        self
    }

    /// Use the single-token `ORDER` keyword in sort clauses.
    #[must_use]
    pub const fn legacy_order_keyword(mut self, legacy: bool) -> Self {
        self.legacy_order_keyword = legacy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_permissive() {
        let config = CompilerConfig::default();
        assert!(!config.strict);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.allowed_fields.is_empty());
        assert!(!config.validate_identifiers);
        assert!(!config.legacy_order_keyword);
    }

    #[test]
    fn test_builder() {
        let config = CompilerConfig::new()
            .strict(true)
            .max_depth(2)
            .allow_fields(&["name", "email"])
            .validate_identifiers(true)
            .legacy_order_keyword(true);

        assert!(config.strict);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.allowed_fields, vec!["name", "email"]);
        assert!(config.validate_identifiers);
        assert!(config.legacy_order_keyword);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CompilerConfig = serde_json::from_str(r#"{"max_depth": 3}"#).unwrap();
        assert_eq!(config, CompilerConfig::new().max_depth(3));

        let empty: CompilerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, CompilerConfig::default());
    }
}
