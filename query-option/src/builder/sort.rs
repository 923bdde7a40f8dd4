//! ORDER BY rendering.

use super::types::SortField;

/// Keyword that introduces the sort clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderKeyword {
    /// Standard `ORDER BY`.
    #[default]
    OrderBy,
    /// Bare `ORDER`, for consumers written against the older output.
    Order,
}

impl OrderKeyword {
    /// SQL text of the keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrderBy => "ORDER BY",
            Self::Order => "ORDER",
        }
    }
}

/// Render sort fields as `ORDER BY a ASC, b DESC`.
///
/// Fields are emitted in input order; duplicates are passed through.
/// Returns an empty string for an empty slice.
///
/// ```
/// use query_option::{OrderKeyword, SortDir, SortField, render_sort};
///
/// let sorts = [SortField::new("name", SortDir::Asc)];
/// assert_eq!(render_sort(&sorts, OrderKeyword::OrderBy), "ORDER BY name ASC");
/// assert_eq!(render_sort(&sorts, OrderKeyword::Order), "ORDER name ASC");
/// ```
#[must_use]
pub fn render_sort(sorts: &[SortField], keyword: OrderKeyword) -> String {
    if sorts.is_empty() {
        return String::new();
    }

    let sort_parts: Vec<String> = sorts
        .iter()
        .map(|s| format!("{} {}", s.field, s.dir.as_sql()))
        .collect();

    format!("{} {}", keyword.as_str(), sort_parts.join(", "))
}
