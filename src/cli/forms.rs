//! Interactive prompt flows and argument parsing for the shell commands.

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::catalog::{CategoryCatalog, CategoryId};
use crate::records::{Expense, ExpensePatch, PaymentMethod};
use crate::suggest::suggest_category;

use super::context::{parse_payment_method, CommandError};

/// Validated expense fields collected from a form or from command arguments.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub category_id: CategoryId,
    pub note: Option<String>,
}

pub fn login_form(theme: &ColorfulTheme) -> Result<String, CommandError> {
    let email: String = Input::with_theme(theme)
        .with_prompt("Email")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Email is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(email.trim().to_string())
}

/// Prompt for all expense fields. The note is asked first so the suggestion
/// engine can preselect a category; an explicit choice always wins.
pub fn expense_form(
    theme: &ColorfulTheme,
    catalog: &CategoryCatalog,
    existing: Option<&Expense>,
) -> Result<ExpenseDraft, CommandError> {
    let mut note_input = Input::<String>::with_theme(theme)
        .with_prompt("Note (optional)")
        .allow_empty(true);
    if let Some(note) = existing.and_then(|expense| expense.note.as_deref()) {
        note_input = note_input.with_initial_text(note);
    }
    let note = note_input.interact_text()?;
    let note = note.trim().to_string();

    let names: Vec<&str> = catalog.iter().map(|category| category.name.as_str()).collect();
    let preselected = existing
        .map(|expense| expense.category_id.clone())
        .or_else(|| suggest_category(&note));
    let default_index = preselected
        .and_then(|id| catalog.iter().position(|category| category.id == id))
        .unwrap_or(0);
    let chosen = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&names)
        .default(default_index)
        .interact()?;
    let category_id = catalog
        .iter()
        .nth(chosen)
        .map(|category| category.id.clone())
        .ok_or_else(|| CommandError::Invalid("Category selection out of range.".to_string()))?;

    let mut amount_input = Input::<f64>::with_theme(theme)
        .with_prompt("Amount")
        .validate_with(|value: &f64| -> Result<(), &str> {
            if value.is_finite() && *value >= 0.0 {
                Ok(())
            } else {
                Err("Amount must be a non-negative number")
            }
        });
    if let Some(expense) = existing {
        amount_input = amount_input.default(expense.amount);
    }
    let amount = amount_input.interact_text()?;

    let method_names: Vec<&str> = PaymentMethod::ALL
        .iter()
        .map(|method| method.as_str())
        .collect();
    let method_default = existing
        .and_then(|expense| {
            PaymentMethod::ALL
                .iter()
                .position(|method| *method == expense.payment_method)
        })
        .unwrap_or(0);
    let method_index = Select::with_theme(theme)
        .with_prompt("Payment method")
        .items(&method_names)
        .default(method_default)
        .interact()?;
    let payment_method = PaymentMethod::ALL[method_index];

    let date_default = existing
        .map(|expense| expense.date)
        .unwrap_or_else(|| Local::now().date_naive());
    let date_text: String = Input::with_theme(theme)
        .with_prompt("Date")
        .default(date_default.to_string())
        .validate_with(|input: &String| -> Result<(), &str> {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| "Dates use YYYY-MM-DD")
        })
        .interact_text()?;
    let date = parse_date(&date_text)?;

    Ok(ExpenseDraft {
        amount,
        date,
        payment_method,
        category_id,
        note: if note.is_empty() { None } else { Some(note) },
    })
}

pub fn budget_form(
    theme: &ColorfulTheme,
    catalog: &CategoryCatalog,
) -> Result<(CategoryId, f64), CommandError> {
    let names: Vec<&str> = catalog.iter().map(|category| category.name.as_str()).collect();
    let chosen = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&names)
        .default(0)
        .interact()?;
    let category_id = catalog
        .iter()
        .nth(chosen)
        .map(|category| category.id.clone())
        .ok_or_else(|| CommandError::Invalid("Category selection out of range.".to_string()))?;

    let limit = Input::<f64>::with_theme(theme)
        .with_prompt("Monthly limit")
        .validate_with(|value: &f64| -> Result<(), &str> {
            if value.is_finite() && *value >= 0.0 {
                Ok(())
            } else {
                Err("Limit must be a non-negative number")
            }
        })
        .interact_text()?;

    Ok((category_id, limit))
}

/// `add <amount> <category> <method> [date] [note..]`.
pub fn parse_expense_args(
    catalog: &CategoryCatalog,
    args: &[&str],
) -> Result<ExpenseDraft, CommandError> {
    let [amount, category, method, rest @ ..] = args else {
        return Err(CommandError::Invalid(
            "Usage: add <amount> <category> <method> [date] [note..]".to_string(),
        ));
    };

    let amount = parse_amount(amount)?;
    let category_id = catalog
        .resolve(category)
        .map(|category| category.id.clone())
        .ok_or_else(|| CommandError::Invalid(format!("Unknown category `{category}`.")))?;
    let payment_method = parse_payment_method(method)?;

    let (date, note_words) = match rest {
        [first, others @ ..] if parse_date(first).is_ok() => (parse_date(first)?, others),
        _ => (Local::now().date_naive(), rest),
    };
    let note = note_words.join(" ");

    Ok(ExpenseDraft {
        amount,
        date,
        payment_method,
        category_id,
        note: if note.is_empty() { None } else { Some(note) },
    })
}

/// `<field> <value>` pairs for `edit`: amount, date, category, method, note
/// (`note -` clears it).
pub fn parse_patch_args(
    catalog: &CategoryCatalog,
    args: &[&str],
) -> Result<ExpensePatch, CommandError> {
    if args.len() % 2 != 0 {
        return Err(CommandError::Invalid(
            "Fields come in <field> <value> pairs.".to_string(),
        ));
    }

    let mut patch = ExpensePatch::default();
    for pair in args.chunks(2) {
        let (field, value) = (pair[0], pair[1]);
        match field.to_lowercase().as_str() {
            "amount" => patch.amount = Some(parse_amount(value)?),
            "date" => patch.date = Some(parse_date(value)?),
            "category" => {
                let matched = catalog.resolve(value).ok_or_else(|| {
                    CommandError::Invalid(format!("Unknown category `{value}`."))
                })?;
                patch.category_id = Some(matched.id.clone());
            }
            "method" => patch.payment_method = Some(parse_payment_method(value)?),
            "note" => {
                patch.note = if value == "-" {
                    Some(None)
                } else {
                    Some(Some(value.to_string()))
                };
            }
            other => {
                return Err(CommandError::Invalid(format!(
                    "Unknown field `{other}` (expected amount, date, category, method, or note)."
                )))
            }
        }
    }
    Ok(patch)
}

pub fn parse_amount(value: &str) -> Result<f64, CommandError> {
    let amount: f64 = value.parse().map_err(|_| {
        CommandError::Invalid(format!("`{value}` is not a number."))
    })?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(CommandError::Invalid(
            "Amount must be a non-negative number.".to_string(),
        ));
    }
    Ok(amount)
}

fn parse_date(value: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CommandError::Invalid("Dates use YYYY-MM-DD.".to_string()))
}
