//! Detection rules producing located diagnostics.

mod duplicate_override;
mod runner;
mod types;
mod unique_filter;

pub use duplicate_override::{check_override_redundancy, DEFAULT_MAX_BODY_STATEMENTS};
pub use runner::Runner;
pub use types::{Diagnostic, LintResult, RuleId, Severity};
pub use unique_filter::check_unique_filter_calls;
