//! Structural interpretation of decoded JSON filters.
//!
//! Turns a `serde_json::Value` (typically the `filter_conditions` member
//! of a request body) into [`FilterConditions`].
//!
//! # Supported Syntax
//!
//! | Syntax | Example | SQL |
//! |--------|---------|-----|
//! | Implicit `$eq` | `{"name": "Alice"}` | `name = ?` |
//! | Explicit operator | `{"age": {"$gte": 18}}` | `age >= ?` |
//! | Several operators | `{"age": {"$gte": 18, "$lt": 65}}` | `age >= ? AND age < ?` |
//! | Multiple fields | `{"a": 1, "b": 2}` | `a = ? AND b = ?` |
//! | `$and` | `{"$and": [{...}, {...}]}` | `(... AND ...)` |
//! | `$or` | `{"$or": [{...}, {...}]}` | `(... OR ...)` |
//! | `$in` | `{"status": {"$in": ["a", "b"]}}` | `status IN (?, ?)` |
//! | `$q` | `{"name": {"$q": "jo"}}` | `name ILIKE ?` bound to `%jo%` |
//!
//! Operator and logical keys may omit the `$` prefix.
//!
//! # Lenient input
//!
//! Outside strict mode, unknown operator keys inside a clause are dropped
//! without an error. So are unknown `$`-prefixed keys and `$and`/`$or`
//! groups whose operand is not an array of objects. The result matches
//! more rows than the caller asked for; use [`CompilerConfig::strict`]
//! for user-facing endpoints.

use super::types::{CompoundFilter, Filter, FilterConditions, FilterExpr, LogicalOp, Operator, Value};
use crate::config::CompilerConfig;
use crate::error::CompileError;
use serde_json::{Map, Value as JsonValue};

/// Parse a filter from a JSON string with the default (lenient) settings.
///
/// # Example
///
/// ```
/// use query_option::parse_filter;
///
/// let filter = parse_filter(r#"{
///     "status": {"$in": ["active", "pending"]},
///     "age": {"$gte": 18}
/// }"#).unwrap();
/// assert_eq!(filter.len(), 2);
/// ```
pub fn parse_filter(json_str: &str) -> Result<FilterConditions, CompileError> {
    FilterConditions::parse(json_str)
}

/// Parse a filter from raw request bytes with the default settings.
pub fn parse_filter_bytes(bytes: &[u8]) -> Result<FilterConditions, CompileError> {
    FilterConditions::parse_bytes(bytes)
}

impl Value {
    /// Convert from a decoded JSON value.
    ///
    /// Returns `None` for objects and for arrays nested inside arrays.
    /// Integers that fit `i64` become `Int`; other numbers become `Float`.
    ///
    /// ```
    /// use query_option::Value;
    /// use serde_json::json;
    ///
    /// assert_eq!(Value::from_json(&json!(42)), Some(Value::Int(42)));
    /// assert_eq!(Value::from_json(&json!("hi")), Some(Value::String("hi".into())));
    /// assert_eq!(Value::from_json(&json!({"a": 1})), None);
    /// assert_eq!(Value::from_json(&json!([[1]])), None);
    /// ```
    #[must_use]
    pub fn from_json(json: &JsonValue) -> Option<Self> {
        match json {
            JsonValue::Array(arr) => {
                let values: Option<Vec<Self>> = arr.iter().map(Self::scalar_from_json).collect();
                values.map(Self::Array)
            },
            other => Self::scalar_from_json(other),
        }
    }

    fn scalar_from_json(json: &JsonValue) -> Option<Self> {
        match json {
            JsonValue::Null => Some(Self::Null),
            JsonValue::Bool(b) => Some(Self::Bool(*b)),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            JsonValue::String(s) => Some(Self::String(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }
}

impl FilterConditions {
    /// Parse from a JSON string with the default settings.
    pub fn parse(json_str: &str) -> Result<Self, CompileError> {
        let json: JsonValue = serde_json::from_str(json_str)?;
        Self::from_json(&json)
    }

    /// Parse from JSON bytes with the default settings.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, CompileError> {
        let json: JsonValue = serde_json::from_slice(bytes)?;
        Self::from_json(&json)
    }

    /// Interpret an already-decoded JSON value with the default settings.
    pub fn from_json(json: &JsonValue) -> Result<Self, CompileError> {
        parse_conditions(json, &CompilerConfig::default())
    }
}

/// Interpret a decoded JSON value under `config`'s strictness.
pub(crate) fn parse_conditions(
    json: &JsonValue,
    config: &CompilerConfig,
) -> Result<FilterConditions, CompileError> {
    match json {
        JsonValue::Object(obj) => parse_object(obj, config).map(FilterConditions::from),
        _ => Err(CompileError::ExpectedObject),
    }
}

/// Interpret every entry of one top-level object, in map order.
pub(crate) fn parse_object(
    obj: &Map<String, JsonValue>,
    config: &CompilerConfig,
) -> Result<Vec<FilterExpr>, CompileError> {
    parse_object_at(obj, config, 0)
}

/// `depth` is the nesting of the group `obj` is a member of (0 at top level).
fn parse_object_at(
    obj: &Map<String, JsonValue>,
    config: &CompilerConfig,
    depth: usize,
) -> Result<Vec<FilterExpr>, CompileError> {
    let mut exprs = Vec::new();
    for (key, value) in obj {
        parse_entry(key, value, config, depth, &mut exprs)?;
    }
    Ok(exprs)
}

fn parse_entry(
    key: &str,
    value: &JsonValue,
    config: &CompilerConfig,
    depth: usize,
    out: &mut Vec<FilterExpr>,
) -> Result<(), CompileError> {
    if let Some(op) = LogicalOp::from_key(key) {
        if let Some(filters) = parse_group(op, value, config, depth + 1)? {
            out.push(FilterExpr::Compound(CompoundFilter { op, filters }));
        }
        return Ok(());
    }

    if key.starts_with('$') {
        if config.strict {
            return Err(CompileError::UnknownKey {
                key: key.to_string(),
            });
        }
        tracing::debug!(key, "unknown key skipped");
        return Ok(());
    }

    match value {
        JsonValue::Object(clause) => parse_clause(key, clause, config, out),
        // Implicit $eq
        other => {
            let value = operand(key, Operator::Eq, other)?;
            out.push(field_filter(key, Operator::Eq, value));
            Ok(())
        },
    }
}

/// Parse `{"$op": operand, ...}` for one field. Every recognized entry
/// becomes its own condition.
fn parse_clause(
    field: &str,
    clause: &Map<String, JsonValue>,
    config: &CompilerConfig,
    out: &mut Vec<FilterExpr>,
) -> Result<(), CompileError> {
    for (op_key, op_value) in clause {
        match Operator::from_key(op_key) {
            Some(op) => {
                let value = operand(field, op, op_value)?;
                out.push(field_filter(field, op, value));
            },
            None if config.strict => {
                return Err(CompileError::UnknownOperator {
                    field: field.to_string(),
                    operator: op_key.clone(),
                });
            },
            None => tracing::debug!(field, operator = %op_key, "unknown operator skipped"),
        }
    }
    Ok(())
}

/// Parse the operand of `$and`/`$or`.
///
/// Every member must be an object before any of them is interpreted;
/// otherwise the whole group is malformed. Members' entries are
/// flattened into one list joined by the group's connective.
///
/// Nesting is limited here, before members are visited, so input deeper
/// than `max_depth` is rejected without walking the rest of it.
fn parse_group(
    op: LogicalOp,
    value: &JsonValue,
    config: &CompilerConfig,
    depth: usize,
) -> Result<Option<Vec<FilterExpr>>, CompileError> {
    let members: Option<Vec<&Map<String, JsonValue>>> = match value {
        JsonValue::Array(items) => items.iter().map(JsonValue::as_object).collect(),
        _ => None,
    };

    let Some(members) = members else {
        if config.strict {
            return Err(CompileError::MalformedGroup {
                operator: op.as_key(),
            });
        }
        tracing::debug!(operator = op.as_key(), "malformed logical group skipped");
        return Ok(None);
    };

    if depth > config.max_depth {
        return Err(CompileError::MaxDepthExceeded {
            max: config.max_depth,
        });
    }

    let mut filters = Vec::new();
    for member in members {
        filters.extend(parse_object_at(member, config, depth)?);
    }
    Ok(Some(filters))
}

fn operand(field: &str, op: Operator, json: &JsonValue) -> Result<Value, CompileError> {
    Value::from_json(json).ok_or_else(|| CompileError::UnsupportedOperandShape {
        field: field.to_string(),
        operator: op.as_key(),
        found: rejected_shape(json),
    })
}

/// Shape named in the error when [`Value::from_json`] rejects `json`.
fn rejected_shape(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Array(items) if !items.iter().any(JsonValue::is_object) => "array",
        _ => "object",
    }
}

fn field_filter(field: &str, op: Operator, value: Value) -> FilterExpr {
    FilterExpr::Simple(Filter {
        field: field.to_string(),
        op,
        value,
    })
}
