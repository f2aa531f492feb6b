use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use colored::Colorize;

use crate::catalog::CategoryCatalog;
use crate::records::Expense;
use crate::report::{BudgetState, BudgetStatus, SpendSummary};

use super::output;

pub fn render_help(commands: &[(&str, &str)]) {
    output::section("Commands");
    for (name, description) in commands {
        output::line(format!("  {:<12} {}", name, description));
    }
}

pub fn render_catalog(catalog: &CategoryCatalog) {
    output::section("Categories");
    for category in catalog.iter() {
        output::line(format!("  {:>2}  {}", category.id, category.name));
    }
}

pub fn render_dashboard(
    summary: &SpendSummary,
    alerts: &[BudgetStatus],
    reference: NaiveDate,
    symbol: &str,
) {
    if !alerts.is_empty() {
        output::section("Budget Alerts");
        for alert in alerts {
            let name = alert
                .category
                .as_ref()
                .map(|category| category.name.as_str())
                .unwrap_or("(unknown category)");
            let line = format!(
                "{}: {} / {} ({:.0}%)",
                name,
                format_amount(symbol, alert.spent),
                format_amount(symbol, alert.budget.monthly_limit),
                alert.percentage
            );
            if alert.state == BudgetState::OverLimit {
                output::error(line);
            } else {
                output::warning(line);
            }
        }
    }

    output::section(format!("Today ({})", reference));
    output::line(format!("  {}", format_amount(symbol, summary.today_total)));
    output::section(month_label(reference));
    output::line(format!("  {}", format_amount(symbol, summary.month_total)));

    if !summary.category_spends.is_empty() {
        output::section("Category Breakdown");
        for spend in summary.category_spends.iter().take(5) {
            output::line(format!(
                "  {:<16} {:>12}  {}",
                spend.category.name,
                format_amount(symbol, spend.amount),
                format!("{:.1}%", spend.percentage).dimmed()
            ));
        }
    }

    if !summary.recent.is_empty() {
        output::section("Recent Transactions");
        for expense in &summary.recent {
            output::line(format!(
                "  {:>12}  {:<6} {}",
                format_amount(symbol, expense.amount),
                expense.payment_method,
                expense.note.as_deref().unwrap_or("")
            ));
        }
    }
}

pub fn render_expense_list(
    expenses: &[Expense],
    reference: NaiveDate,
    catalog: &CategoryCatalog,
    symbol: &str,
) {
    if expenses.is_empty() {
        output::info("No expenses found.");
        return;
    }

    let mut by_day: BTreeMap<NaiveDate, Vec<&Expense>> = BTreeMap::new();
    for expense in expenses {
        by_day.entry(expense.date).or_default().push(expense);
    }

    for (date, day_expenses) in by_day.iter().rev() {
        output::section(day_label(*date, reference));
        for expense in day_expenses {
            let category = catalog
                .get(&expense.category_id)
                .map(|category| category.name.as_str())
                .unwrap_or("(unknown category)");
            let short_id: String = expense.id.to_string().chars().take(8).collect();
            let mut line = format!(
                "  [{}] {:>12}  {:<6} {}",
                short_id.dimmed(),
                format_amount(symbol, expense.amount),
                expense.payment_method,
                category
            );
            if let Some(note) = &expense.note {
                line.push_str(&format!(" • {note}"));
            }
            output::line(line);
        }
    }
}

pub fn render_budgets(statuses: &[BudgetStatus], catalog: &CategoryCatalog, symbol: &str) {
    output::section("Budget Manager");
    if statuses.is_empty() {
        output::info("No budgets set. Use `budget <category> <limit>`.");
    }

    for status in statuses {
        let name = status
            .category
            .as_ref()
            .map(|category| category.name.as_str())
            .unwrap_or("(unknown category)");
        let position = if status.remaining < 0.0 {
            format!("Over by {}", format_amount(symbol, status.remaining.abs()))
        } else {
            format!("Remaining: {}", format_amount(symbol, status.remaining))
        };
        let line = format!(
            "  {:<16} spent {} of {} ({:.0}% used) | {}",
            name,
            format_amount(symbol, status.spent),
            format_amount(symbol, status.budget.monthly_limit),
            status.percentage,
            position
        );
        match status.state {
            BudgetState::OverLimit => output::error(line),
            BudgetState::NearLimit => output::warning(line),
            BudgetState::Ok => output::line(line),
        }
    }

    let unset: Vec<&str> = catalog
        .iter()
        .filter(|category| {
            !statuses
                .iter()
                .any(|status| status.budget.category_id == category.id)
        })
        .map(|category| category.name.as_str())
        .collect();
    if !unset.is_empty() {
        output::separator();
        output::line(format!("No budget set: {}", unset.join(", ")));
    }
}

/// Render an amount with the currency symbol and en-IN digit grouping
/// (1,23,456.50). Whole amounts drop the decimal part.
pub fn format_amount(symbol: &str, amount: f64) -> String {
    let negative = amount < 0.0;
    let mut text = format!("{:.2}", amount.abs());
    if let Some(stripped) = text.strip_suffix(".00") {
        text = stripped.to_string();
    }
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part.to_string())),
        None => (text, None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(symbol);
    out.push_str(&group_indian(&int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

// Last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Human label for a day relative to the reference date.
pub fn day_label(date: NaiveDate, reference: NaiveDate) -> String {
    if date == reference {
        return "Today".to_string();
    }
    if reference.pred_opt() == Some(date) {
        return "Yesterday".to_string();
    }
    if date.year() == reference.year() {
        date.format("%-d %b").to_string()
    } else {
        date.format("%-d %b %Y").to_string()
    }
}

fn month_label(reference: NaiveDate) -> String {
    reference.format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_group_indian_style() {
        assert_eq!(format_amount("₹", 0.0), "₹0");
        assert_eq!(format_amount("₹", 300.0), "₹300");
        assert_eq!(format_amount("₹", 1000.0), "₹1,000");
        assert_eq!(format_amount("₹", 123456.0), "₹1,23,456");
        assert_eq!(format_amount("₹", 1234567.5), "₹12,34,567.50");
        assert_eq!(format_amount("₹", -50.0), "-₹50");
    }

    #[test]
    fn day_labels_are_relative() {
        let reference = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        assert_eq!(day_label(reference, reference), "Today");
        assert_eq!(
            day_label(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), reference),
            "Yesterday"
        );
        assert_eq!(
            day_label(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(), reference),
            "20 May"
        );
        assert_eq!(
            day_label(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(), reference),
            "31 Dec 2023"
        );
    }
}
