//! LIMIT/OFFSET rendering.

use super::types::PageSpec;

/// Render `LIMIT`/`OFFSET` lines for page-number pagination.
///
/// The layout is fixed: a newline before each line and after the last.
/// Inputs are not validated, so `page < 1` produces a negative offset.
///
/// ```
/// use query_option::{PageSpec, render_pagination};
///
/// assert_eq!(render_pagination(PageSpec::new(2, 20)), "\nLIMIT 20\nOFFSET 20\n");
/// ```
#[must_use]
pub fn render_pagination(page: PageSpec) -> String {
    format!("\nLIMIT {}\nOFFSET {}\n", page.per_page, page.offset())
}
