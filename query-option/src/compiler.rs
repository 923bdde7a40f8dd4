//! The stateless compiler entry point.

use serde_json::Value as JsonValue;

use crate::builder::{
    CompiledFragment, FilterConditions, OrderKeyword, SortField, build_where_impl,
    parse_conditions, render_sort,
};
use crate::config::CompilerConfig;
use crate::error::CompileError;

/// Compiles filters into `WHERE` fragments and sort fields into `ORDER BY`.
///
/// Holds only its configuration, so one instance can be shared across
/// threads and reused for every request.
///
/// # Example
///
/// ```
/// use query_option::FilterCompiler;
/// use serde_json::json;
///
/// let compiler = FilterCompiler::new();
/// let fragment = compiler
///     .compile_json(&json!({"and": [{"a": {"eq": 1}}, {"b": {"lt": 2}}]}))
///     .unwrap();
///
/// assert_eq!(fragment.sql, "WHERE (a = ? AND b < ?)");
/// assert_eq!(fragment.args.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterCompiler {
    config: CompilerConfig,
}

impl FilterCompiler {
    /// Compiler with permissive defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiler with explicit settings.
    #[must_use]
    pub const fn with_config(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Settings this compiler applies.
    #[must_use]
    pub const fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile a typed filter.
    pub fn compile(&self, filters: &FilterConditions) -> Result<CompiledFragment, CompileError> {
        build_where_impl(&self.config, filters)
    }

    /// Interpret and compile a decoded JSON filter object.
    pub fn compile_json(&self, json: &JsonValue) -> Result<CompiledFragment, CompileError> {
        let filters = parse_conditions(json, &self.config)?;
        self.compile(&filters)
    }

    /// Decode, interpret and compile a JSON filter string.
    pub fn compile_str(&self, json_str: &str) -> Result<CompiledFragment, CompileError> {
        let json: JsonValue = serde_json::from_str(json_str)?;
        self.compile_json(&json)
    }

    /// Render sort fields using the configured order keyword.
    #[must_use]
    pub fn render_sort(&self, sorts: &[SortField]) -> String {
        render_sort(sorts, self.order_keyword())
    }

    const fn order_keyword(&self) -> OrderKeyword {
        if self.config.legacy_order_keyword {
            OrderKeyword::Order
        } else {
            OrderKeyword::OrderBy
        }
    }
}

impl From<CompilerConfig> for FilterCompiler {
    fn from(config: CompilerConfig) -> Self {
        Self::with_config(config)
    }
}
