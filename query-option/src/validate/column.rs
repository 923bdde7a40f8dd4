//! Field-name checks for SQL injection prevention.

/// Maximum length for one identifier segment (`PostgreSQL` limit is 63).
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Validate that a string is a safe SQL identifier.
///
/// A valid SQL identifier:
/// - Starts with a letter (a-z, A-Z) or underscore
/// - Contains only letters, digits (0-9), and underscores
/// - Is not empty and not longer than 63 characters
///
/// # Examples
///
/// ```
/// use query_option::is_valid_sql_identifier;
///
/// assert!(is_valid_sql_identifier("users"));
/// assert!(is_valid_sql_identifier("user_id"));
/// assert!(is_valid_sql_identifier("_private"));
///
/// assert!(!is_valid_sql_identifier(""));
/// assert!(!is_valid_sql_identifier("123abc"));
/// assert!(!is_valid_sql_identifier("user-name"));
/// assert!(!is_valid_sql_identifier("user; DROP"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_sql_identifier(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_IDENTIFIER_LENGTH {
        return false;
    }

    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a possibly table-qualified column name such as `u.created_at`.
///
/// Every dot-separated segment must be a valid identifier.
///
/// ```
/// use query_option::is_valid_field_name;
///
/// assert!(is_valid_field_name("u.created_at"));
/// assert!(!is_valid_field_name("u..id"));
/// assert!(!is_valid_field_name("id)--"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_field_name(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_valid_sql_identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sql_identifiers() {
        assert!(is_valid_sql_identifier("users"));
        assert!(is_valid_sql_identifier("user_id"));
        assert!(is_valid_sql_identifier("_private"));
        assert!(is_valid_sql_identifier("Table123"));
        assert!(is_valid_sql_identifier("a"));
        assert!(is_valid_sql_identifier("_"));
    }

    #[test]
    fn test_invalid_sql_identifiers() {
        assert!(!is_valid_sql_identifier(""));
        assert!(!is_valid_sql_identifier("123abc"));
        assert!(!is_valid_sql_identifier("user-name"));
        assert!(!is_valid_sql_identifier("user.id"));
        assert!(!is_valid_sql_identifier("user name"));
        assert!(!is_valid_sql_identifier("table'"));
        assert!(!is_valid_sql_identifier("users--"));
        assert!(!is_valid_sql_identifier("(SELECT 1)"));
        assert!(!is_valid_sql_identifier("1 OR 1=1"));
        assert!(!is_valid_sql_identifier("usërs"));
        assert!(!is_valid_sql_identifier("users\u{200B}"));
    }

    #[test]
    fn test_sql_identifier_length_limit() {
        assert!(is_valid_sql_identifier(&"a".repeat(63)));
        assert!(!is_valid_sql_identifier(&"a".repeat(64)));
    }

    #[test]
    fn test_qualified_field_names() {
        assert!(is_valid_field_name("id"));
        assert!(is_valid_field_name("orders.total"));
        assert!(is_valid_field_name("s.t.c"));
        assert!(!is_valid_field_name(""));
        assert!(!is_valid_field_name("."));
        assert!(!is_valid_field_name("orders."));
        assert!(!is_valid_field_name(".total"));
        assert!(!is_valid_field_name("orders.total; DROP TABLE x"));
    }
}
