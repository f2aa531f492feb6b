//! Derived views over the record sets: spend aggregation and budget health.
//!
//! Everything here is a pure projection of the slices passed in; nothing is
//! cached or incrementally maintained, and recomputation is idempotent.

pub mod budget;
pub mod summary;

pub use budget::{budget_alerts, evaluate_budgets, BudgetState, BudgetStatus};
pub use summary::{summarize, CategorySpend, SpendSummary, RECENT_LIMIT};

/// Share of `part` in `whole`, in percent. Defined as 0 when `whole` is not
/// positive so zero month totals and zero limits never divide by zero.
pub(crate) fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole) * 100.0
    } else {
        0.0
    }
}
