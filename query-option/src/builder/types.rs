//! Core types for the filter compiler.

use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize, Serializer};

/// Comparison operators accepted inside an operator clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Equal: `=`
    Eq,
    /// Case-insensitive substring search: `ILIKE '%value%'`
    Q,
    /// Greater than: `>`
    Gt,
    /// Greater than or equal: `>=`
    Gte,
    /// Less than: `<`
    Lt,
    /// Less than or equal: `<=`
    Lte,
    /// Set membership: `IN (?, ?, ...)`
    In,
}

impl Operator {
    /// Parse an operator key (e.g., `"$eq"`, `"gte"`).
    ///
    /// Accepts both with and without the `$` prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use query_option::Operator;
    ///
    /// assert_eq!(Operator::from_key("$eq"), Some(Operator::Eq));
    /// assert_eq!(Operator::from_key("gte"), Some(Operator::Gte));
    /// assert_eq!(Operator::from_key("$ne"), None);
    /// ```
    #[must_use]
    pub fn from_key(s: &str) -> Option<Self> {
        let s = s.strip_prefix('$').unwrap_or(s);

        match s {
            "eq" => Some(Self::Eq),
            "q" => Some(Self::Q),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    /// Canonical key for this operator, used in errors and logs.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Q => "$q",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::In => "$in",
        }
    }

    /// SQL comparison token placed between the field and its placeholder.
    pub(crate) const fn sql_op(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Q => "ILIKE",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::In => "IN",
        }
    }
}

/// Logical operators for grouping filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// All conditions must match: `AND`
    And,
    /// At least one condition must match: `OR`
    Or,
}

impl LogicalOp {
    /// Parse a logical key. `$and`/`$or` and the bare `and`/`or` are accepted.
    #[must_use]
    pub fn from_key(s: &str) -> Option<Self> {
        match s.strip_prefix('$').unwrap_or(s) {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }

    /// Canonical key for this operator.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::And => "$and",
            Self::Or => "$or",
        }
    }

    pub(crate) const fn connective(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// SQL parameter values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text.
    String(String),
    /// Operand of `$in`; expanded to one argument per element.
    Array(Vec<Value>),
}

impl Value {
    /// Whether this value can be bound to a single placeholder.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Array(_))
    }

    /// Short name of the value's shape, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

/// Single field condition: `field <op> value`.
///
/// The field name is interpolated into SQL verbatim unless the compiler
/// is configured with a whitelist or identifier validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Column name, copied into the SQL text.
    pub field: String,
    /// Comparison operator.
    pub op: Operator,
    /// Operand bound to the placeholder(s).
    pub value: Value,
}

/// A filter expression that can be simple or compound.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// A simple field comparison.
    Simple(Filter),
    /// A parenthesized group joined by a logical operator.
    Compound(CompoundFilter),
}

/// A group of expressions joined by one connective.
///
/// Always rendered in parentheses, even with a single member.
/// A group that renders no conditions is dropped entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundFilter {
    /// Connective joining the members.
    pub op: LogicalOp,
    /// Members, in emission order.
    pub filters: Vec<FilterExpr>,
}

impl CompoundFilter {
    /// Create an AND group.
    #[must_use]
    pub const fn and(filters: Vec<FilterExpr>) -> Self {
        Self {
            op: LogicalOp::And,
            filters,
        }
    }

    /// Create an OR group.
    #[must_use]
    pub const fn or(filters: Vec<FilterExpr>) -> Self {
        Self {
            op: LogicalOp::Or,
            filters,
        }
    }
}

/// Top-level filter: expressions joined with `AND` in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterConditions {
    exprs: Vec<FilterExpr>,
}

impl FilterConditions {
    /// Create an empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self { exprs: Vec::new() }
    }

    /// Append an expression.
    pub fn push(&mut self, expr: FilterExpr) {
        self.exprs.push(expr);
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, expr: FilterExpr) -> Self {
        self.exprs.push(expr);
        self
    }

    /// Expressions in emission order.
    #[must_use]
    pub fn exprs(&self) -> &[FilterExpr] {
        &self.exprs
    }

    /// Number of top-level expressions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// True when there are no top-level expressions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

impl From<Vec<FilterExpr>> for FilterConditions {
    fn from(exprs: Vec<FilterExpr>) -> Self {
        Self { exprs }
    }
}

impl FromIterator<FilterExpr> for FilterConditions {
    fn from_iter<I: IntoIterator<Item = FilterExpr>>(iter: I) -> Self {
        Self {
            exprs: iter.into_iter().collect(),
        }
    }
}

/// SQL text plus the arguments bound to its `?` placeholders, in order.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "CompiledFragment must be used to execute the query"]
pub struct CompiledFragment {
    /// `WHERE ...` text, or empty when no condition was emitted.
    pub sql: String,
    /// One argument per `?`, in text order.
    pub args: Vec<Value>,
}

impl CompiledFragment {
    /// True when no condition was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Number of `?` markers in the SQL text.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

/// Sort direction.
///
/// Deserializes from the integer encoding (`>= 0` ascending, `< 0`
/// descending) or from `"asc"`/`"desc"`. Serializes as `1`/`-1`.
/// Defaults to ascending, the meaning of code `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    /// `ASC`
    #[default]
    Asc,
    /// `DESC`
    Desc,
}

impl SortDir {
    /// Map the integer encoding to a direction.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        if code >= 0 { Self::Asc } else { Self::Desc }
    }

    /// Integer encoding used on the wire: `1` or `-1`.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }

    pub(crate) const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSortDir {
    Code(i64),
    Name(String),
}

impl<'de> Deserialize<'de> for SortDir {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawSortDir::deserialize(deserializer)? {
            RawSortDir::Code(code) => Ok(Self::from_code(code)),
            RawSortDir::Name(name) => match name.to_ascii_lowercase().as_str() {
                "asc" | "ascending" => Ok(Self::Asc),
                "desc" | "descending" => Ok(Self::Desc),
                _ => Err(de::Error::invalid_value(
                    Unexpected::Str(&name),
                    &"an integer, \"asc\" or \"desc\"",
                )),
            },
        }
    }
}

impl Serialize for SortDir {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

/// Sort field with direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Column name, copied into the SQL text.
    pub field: String,
    /// Direction; a missing `direction` member means ascending.
    #[serde(rename = "direction", default)]
    pub dir: SortDir,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, dir: SortDir) -> Self {
        Self {
            field: field.into(),
            dir,
        }
    }

    /// Parse a sort string like "name,-created_at" into sort fields.
    ///
    /// Fields prefixed with `-` are sorted descending. Empty segments are skipped.
    #[must_use]
    pub fn parse_sort_string(sort: &str) -> Vec<Self> {
        sort.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| match part.strip_prefix('-') {
                Some(stripped) => Self::new(stripped, SortDir::Desc),
                None => Self::new(part, SortDir::Asc),
            })
            .collect()
    }
}

/// Page-number pagination (1-indexed page, page size).
///
/// Values are not validated: a page below 1 yields a negative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// 1-indexed page number.
    pub page: i64,
    /// Rows per page; rendered as `LIMIT`.
    pub per_page: i64,
}

impl PageSpec {
    /// Create page settings. Neither value is validated.
    #[must_use]
    pub const fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    /// `(page - 1) * per_page`, saturating at the `i64` bounds.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Helper function to create a simple filter expression.
pub fn simple(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> FilterExpr {
    FilterExpr::Simple(Filter {
        field: field.into(),
        op,
        value: value.into(),
    })
}

/// Helper function to create an AND group.
#[must_use]
pub const fn and(filters: Vec<FilterExpr>) -> FilterExpr {
    FilterExpr::Compound(CompoundFilter::and(filters))
}

/// Helper function to create an OR group.
#[must_use]
pub const fn or(filters: Vec<FilterExpr>) -> FilterExpr {
    FilterExpr::Compound(CompoundFilter::or(filters))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_from_key_with_and_without_prefix() {
        assert_eq!(Operator::from_key("$eq"), Some(Operator::Eq));
        assert_eq!(Operator::from_key("$q"), Some(Operator::Q));
        assert_eq!(Operator::from_key("$gt"), Some(Operator::Gt));
        assert_eq!(Operator::from_key("$gte"), Some(Operator::Gte));
        assert_eq!(Operator::from_key("$lt"), Some(Operator::Lt));
        assert_eq!(Operator::from_key("$lte"), Some(Operator::Lte));
        assert_eq!(Operator::from_key("$in"), Some(Operator::In));
        assert_eq!(Operator::from_key("lte"), Some(Operator::Lte));
        assert_eq!(Operator::from_key("in"), Some(Operator::In));
    }

    #[test]
    fn test_operator_from_key_unknown() {
        assert_eq!(Operator::from_key("$ne"), None);
        assert_eq!(Operator::from_key("$between"), None);
        assert_eq!(Operator::from_key(""), None);
        assert_eq!(Operator::from_key("$"), None);
    }

    #[test]
    fn test_logical_from_key() {
        assert_eq!(LogicalOp::from_key("$and"), Some(LogicalOp::And));
        assert_eq!(LogicalOp::from_key("or"), Some(LogicalOp::Or));
        assert_eq!(LogicalOp::from_key("$not"), None);
        assert_eq!(LogicalOp::from_key("status"), None);
    }

    #[test]
    fn test_sort_dir_codes() {
        assert_eq!(SortDir::from_code(1), SortDir::Asc);
        assert_eq!(SortDir::from_code(0), SortDir::Asc);
        assert_eq!(SortDir::from_code(-1), SortDir::Desc);
        assert_eq!(SortDir::from_code(i64::MIN), SortDir::Desc);
    }

    #[test]
    fn test_sort_field_deserialize() {
        let asc: SortField = serde_json::from_str(r#"{"field": "name", "direction": 1}"#).unwrap();
        assert_eq!(asc, SortField::new("name", SortDir::Asc));

        let desc: SortField =
            serde_json::from_str(r#"{"field": "name", "direction": -1}"#).unwrap();
        assert_eq!(desc.dir, SortDir::Desc);

        let named: SortField =
            serde_json::from_str(r#"{"field": "name", "direction": "DESC"}"#).unwrap();
        assert_eq!(named.dir, SortDir::Desc);

        let bad = serde_json::from_str::<SortField>(r#"{"field": "name", "direction": "up"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_sort_field_missing_direction_is_ascending() {
        let sort: SortField = serde_json::from_str(r#"{"field": "name"}"#).unwrap();
        assert_eq!(sort, SortField::new("name", SortDir::Asc));
        assert_eq!(SortDir::default(), SortDir::from_code(0));
    }

    #[test]
    fn test_sort_field_serialize() {
        let json = serde_json::to_string(&SortField::new("created_at", SortDir::Desc)).unwrap();
        assert_eq!(json, r#"{"field":"created_at","direction":-1}"#);
    }

    #[test]
    fn test_parse_sort_string() {
        let sorts = SortField::parse_sort_string("name, -created_at,,");
        assert_eq!(
            sorts,
            vec![
                SortField::new("name", SortDir::Asc),
                SortField::new("created_at", SortDir::Desc),
            ]
        );
        assert!(SortField::parse_sort_string("").is_empty());
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(PageSpec::new(1, 20).offset(), 0);
        assert_eq!(PageSpec::new(2, 20).offset(), 20);
        assert_eq!(PageSpec::new(0, 20).offset(), -20);
        assert_eq!(PageSpec::new(-1, 10).offset(), -20);
        assert_eq!(PageSpec::new(i64::MAX, i64::MAX).offset(), i64::MAX);
    }

    #[test]
    fn test_value_from_conversions() {
        assert_eq!(Value::from(3), Value::Int(3));
        assert_eq!(Value::from("x"), Value::String("x".into()));
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::Array(vec![Value::Int(1), Value::Int(2)])
        );
        assert!(Value::Null.is_scalar());
        assert!(!Value::Array(vec![]).is_scalar());
    }

    #[test]
    fn test_fragment_placeholder_count() {
        let fragment = CompiledFragment {
            sql: "WHERE a = ? AND b IN (?, ?)".into(),
            args: vec![Value::Int(1), Value::Int(2), Value::Int(3)],
        };
        assert_eq!(fragment.placeholder_count(), 3);
        assert!(!fragment.is_empty());
        assert!(CompiledFragment::default().is_empty());
    }
}
