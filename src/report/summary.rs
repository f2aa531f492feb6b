use chrono::{Datelike, NaiveDate};

use crate::catalog::{Category, CategoryCatalog};
use crate::records::Expense;

use super::percentage_of;

/// How many expenses the dashboard shows as "recent".
pub const RECENT_LIMIT: usize = 5;

/// Derived monthly total and share-of-total for one category.
#[derive(Debug, Clone)]
pub struct CategorySpend {
    pub category: Category,
    pub amount: f64,
    pub percentage: f64,
}

/// Aggregated spending for one reference date.
#[derive(Debug, Clone)]
pub struct SpendSummary {
    pub today_total: f64,
    pub month_total: f64,
    /// Per-category month spend, zero-spend categories omitted, sorted
    /// descending by amount (catalog order breaks ties).
    pub category_spends: Vec<CategorySpend>,
    /// The most recently added expenses in list order, capped at
    /// [`RECENT_LIMIT`]. List order is insertion order, not date order.
    pub recent: Vec<Expense>,
}

fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// Aggregate expenses around a reference "today" date.
///
/// Expenses referencing category ids the catalog does not know still count
/// toward the day and month totals but are excluded from the per-category
/// breakdown.
pub fn summarize(
    expenses: &[Expense],
    reference: NaiveDate,
    catalog: &CategoryCatalog,
) -> SpendSummary {
    let today_total = expenses
        .iter()
        .filter(|expense| expense.date == reference)
        .map(|expense| expense.amount)
        .sum();

    let month_expenses: Vec<&Expense> = expenses
        .iter()
        .filter(|expense| same_month(expense.date, reference))
        .collect();
    let month_total: f64 = month_expenses.iter().map(|expense| expense.amount).sum();

    let mut category_spends: Vec<CategorySpend> = catalog
        .iter()
        .map(|category| {
            let amount = month_expenses
                .iter()
                .filter(|expense| expense.category_id == category.id)
                .map(|expense| expense.amount)
                .sum();
            CategorySpend {
                category: category.clone(),
                amount,
                percentage: percentage_of(amount, month_total),
            }
        })
        .filter(|spend| spend.amount > 0.0)
        .collect();
    category_spends.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    let recent = expenses.iter().take(RECENT_LIMIT).cloned().collect();

    SpendSummary {
        today_total,
        month_total,
        category_spends,
        recent,
    }
}
