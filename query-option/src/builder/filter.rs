//! WHERE clause compilation.
//!
//! Walks the expression tree depth-first. Each condition appends its
//! arguments in the order its placeholders appear in the text, so the
//! Nth `?` in the output always binds the Nth argument.

use super::types::{
    CompiledFragment, CompoundFilter, Filter, FilterConditions, FilterExpr, Operator, Value,
};
use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::validate::check_field;

/// Compile top-level expressions into `WHERE cond1 AND cond2 ...`.
///
/// Returns an empty fragment when nothing is emitted.
pub(crate) fn build_where_impl(
    config: &CompilerConfig,
    filters: &FilterConditions,
) -> Result<CompiledFragment, CompileError> {
    let mut conditions = Vec::new();
    let mut args = Vec::new();

    for expr in filters.exprs() {
        if let Some((condition, params)) = build_filter_expr_impl(config, expr, 0)? {
            conditions.push(condition);
            args.extend(params);
        }
    }

    if conditions.is_empty() {
        return Ok(CompiledFragment::default());
    }

    let sql = format!("WHERE {}", conditions.join(" AND "));
    tracing::trace!(
        conditions = conditions.len(),
        placeholders = args.len(),
        "compiled where clause"
    );

    Ok(CompiledFragment { sql, args })
}

/// Build a filter expression (simple or compound).
///
/// `None` means the expression emits nothing (an empty group).
pub(super) fn build_filter_expr_impl(
    config: &CompilerConfig,
    expr: &FilterExpr,
    depth: usize,
) -> Result<Option<(String, Vec<Value>)>, CompileError> {
    match expr {
        FilterExpr::Simple(filter) => build_condition_impl(config, filter).map(Some),
        FilterExpr::Compound(compound) => build_compound_filter_impl(config, compound, depth + 1),
    }
}

/// Build a logical group: `(cond1 AND cond2 ...)` or `(cond1 OR cond2 ...)`.
///
/// Members that emit nothing are dropped; a group left with no members
/// emits nothing. A single member is still parenthesized.
pub(super) fn build_compound_filter_impl(
    config: &CompilerConfig,
    compound: &CompoundFilter,
    depth: usize,
) -> Result<Option<(String, Vec<Value>)>, CompileError> {
    if depth > config.max_depth {
        return Err(CompileError::MaxDepthExceeded {
            max: config.max_depth,
        });
    }

    let mut all_params = Vec::new();
    let mut conditions = Vec::new();

    for filter_expr in &compound.filters {
        if let Some((condition, params)) = build_filter_expr_impl(config, filter_expr, depth)? {
            conditions.push(condition);
            all_params.extend(params);
        }
    }

    if conditions.is_empty() {
        tracing::debug!(operator = compound.op.as_key(), "empty logical group skipped");
        return Ok(None);
    }

    let sql = format!("({})", conditions.join(compound.op.connective()));
    Ok(Some((sql, all_params)))
}

/// Build a single condition per the operator table.
pub(super) fn build_condition_impl(
    config: &CompilerConfig,
    filter: &Filter,
) -> Result<(String, Vec<Value>), CompileError> {
    check_field(config, &filter.field)?;

    let field = &filter.field;

    match (filter.op, &filter.value) {
        // One placeholder per element, in sequence order
        (Operator::In, Value::Array(values)) => {
            if let Some(nested) = values.iter().find(|v| !v.is_scalar()) {
                return Err(unsupported(filter, nested));
            }
            let placeholders = vec!["?"; values.len()].join(", ");
            Ok((format!("{field} IN ({placeholders})"), values.clone()))
        },
        (Operator::In, value) => Err(unsupported(filter, value)),

        // Substring search: the argument is wrapped, the placeholder is not.
        // Floats are rejected: `1.0` would be searched as `%1%`.
        (Operator::Q, value) => {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Int(i) => i.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Float(_) | Value::Null | Value::Array(_) => {
                    return Err(unsupported(filter, value));
                },
            };
            Ok((
                format!("{field} ILIKE ?"),
                vec![Value::String(format!("%{text}%"))],
            ))
        },

        // Standard comparisons
        (op, value) => {
            if !value.is_scalar() {
                return Err(unsupported(filter, value));
            }
            Ok((format!("{field} {} ?", op.sql_op()), vec![value.clone()]))
        },
    }
}

fn unsupported(filter: &Filter, found: &Value) -> CompileError {
    CompileError::UnsupportedOperandShape {
        field: filter.field.clone(),
        operator: filter.op.as_key(),
        found: found.kind(),
    }
}
