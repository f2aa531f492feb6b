use crate::catalog::{Category, CategoryCatalog};
use crate::records::Budget;

use super::{percentage_of, summary::CategorySpend};

/// Health classification of one budget against the month's spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetState {
    Ok,
    /// Spend above 80% of the limit, up to and including 100%.
    NearLimit,
    /// Spend above 100% of the limit.
    OverLimit,
}

impl BudgetState {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 100.0 {
            BudgetState::OverLimit
        } else if percentage > 80.0 {
            BudgetState::NearLimit
        } else {
            BudgetState::Ok
        }
    }

    /// Whether this state should surface in the alert view.
    pub fn is_alert(&self) -> bool {
        !matches!(self, BudgetState::Ok)
    }
}

/// Per-budget evaluation row. The same computation backs both the
/// budget-management view (all rows) and the alert view (non-Ok rows).
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub budget: Budget,
    /// Resolved category; `None` when the budget references an id the
    /// catalog does not know.
    pub category: Option<Category>,
    pub spent: f64,
    pub percentage: f64,
    /// `monthly_limit - spent`; negative signals overspend by the magnitude.
    pub remaining: f64,
    pub state: BudgetState,
}

/// Evaluate every budget against the aggregated category spends.
///
/// A category absent from `category_spends` means no spend this month.
pub fn evaluate_budgets(
    budgets: &[Budget],
    category_spends: &[CategorySpend],
    catalog: &CategoryCatalog,
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|budget| {
            let spent = category_spends
                .iter()
                .find(|spend| spend.category.id == budget.category_id)
                .map(|spend| spend.amount)
                .unwrap_or(0.0);
            let percentage = percentage_of(spent, budget.monthly_limit);
            BudgetStatus {
                budget: budget.clone(),
                category: catalog.get(&budget.category_id).cloned(),
                spent,
                percentage,
                remaining: budget.monthly_limit - spent,
                state: BudgetState::from_percentage(percentage),
            }
        })
        .collect()
}

/// The alert view: only budgets that are near or over their limit.
pub fn budget_alerts(
    budgets: &[Budget],
    category_spends: &[CategorySpend],
    catalog: &CategoryCatalog,
) -> Vec<BudgetStatus> {
    evaluate_budgets(budgets, category_spends, catalog)
        .into_iter()
        .filter(|status| status.state.is_alert())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_catalog, CategoryId};
    use uuid::Uuid;

    fn spend(category: &str, amount: f64) -> CategorySpend {
        let category = default_catalog()
            .get(&CategoryId::from(category))
            .unwrap()
            .clone();
        CategorySpend {
            category,
            amount,
            percentage: 0.0,
        }
    }

    fn budget(category: &str, limit: f64) -> Budget {
        Budget::new(Uuid::nil(), CategoryId::from(category), limit)
    }

    #[test]
    fn over_limit_budget_reports_negative_remaining() {
        let statuses = evaluate_budgets(
            &[budget("2", 250.0)],
            &[spend("2", 300.0)],
            default_catalog(),
        );
        assert_eq!(statuses.len(), 1);
        let status = &statuses[0];
        assert_eq!(status.percentage, 120.0);
        assert_eq!(status.state, BudgetState::OverLimit);
        assert_eq!(status.remaining, -50.0);
    }

    #[test]
    fn zero_limit_is_defined_as_ok() {
        let statuses = evaluate_budgets(
            &[budget("2", 0.0)],
            &[spend("2", 300.0)],
            default_catalog(),
        );
        assert_eq!(statuses[0].percentage, 0.0);
        assert_eq!(statuses[0].state, BudgetState::Ok);
    }

    #[test]
    fn absent_category_spend_counts_as_zero() {
        let statuses = evaluate_budgets(&[budget("7", 400.0)], &[], default_catalog());
        assert_eq!(statuses[0].spent, 0.0);
        assert_eq!(statuses[0].remaining, 400.0);
        assert_eq!(statuses[0].state, BudgetState::Ok);
    }

    #[test]
    fn near_limit_boundaries() {
        assert_eq!(BudgetState::from_percentage(80.0), BudgetState::Ok);
        assert_eq!(BudgetState::from_percentage(80.1), BudgetState::NearLimit);
        assert_eq!(BudgetState::from_percentage(100.0), BudgetState::NearLimit);
        assert_eq!(BudgetState::from_percentage(100.1), BudgetState::OverLimit);
    }

    #[test]
    fn alerts_drop_ok_rows_but_keep_both_alert_kinds() {
        let budgets = vec![budget("1", 1000.0), budget("2", 250.0), budget("4", 110.0)];
        let spends = vec![spend("1", 100.0), spend("2", 300.0), spend("4", 100.0)];
        let alerts = budget_alerts(&budgets, &spends, default_catalog());
        let states: Vec<BudgetState> = alerts.iter().map(|alert| alert.state).collect();
        assert_eq!(states, vec![BudgetState::OverLimit, BudgetState::NearLimit]);
    }

    #[test]
    fn unknown_category_id_degrades_to_none() {
        let statuses = evaluate_budgets(&[budget("99", 100.0)], &[], default_catalog());
        assert!(statuses[0].category.is_none());
        assert_eq!(statuses[0].state, BudgetState::Ok);
    }
}
