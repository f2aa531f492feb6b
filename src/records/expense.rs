use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CategoryId;

/// A single recorded spending transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        user_id: Uuid,
        date: NaiveDate,
        amount: f64,
        payment_method: PaymentMethod,
        category_id: CategoryId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            amount,
            payment_method,
            category_id,
            note: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.is_empty() { None } else { Some(note) };
        self
    }

    /// Case-insensitive free-text match over the note and the amount rendered
    /// as text. An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let lower = term.to_lowercase();
        self.note
            .as_deref()
            .is_some_and(|note| note.to_lowercase().contains(&lower))
            || self.amount.to_string().contains(&lower)
    }
}

/// How an expense was paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "UPI")]
    Upi,
    Wallet,
    Cash,
    Card,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Upi,
        PaymentMethod::Wallet,
        PaymentMethod::Cash,
        PaymentMethod::Card,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Wallet => "Wallet",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|method| method.as_str().eq_ignore_ascii_case(value))
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Partial field update applied to an existing expense. `None` leaves the
/// field untouched; `note: Some(None)` clears the note.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
    pub category_id: Option<CategoryId>,
    pub note: Option<Option<String>>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.payment_method.is_none()
            && self.category_id.is_none()
            && self.note.is_none()
    }

    pub fn apply(&self, expense: &mut Expense) {
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(method) = self.payment_method {
            expense.payment_method = method;
        }
        if let Some(category_id) = &self.category_id {
            expense.category_id = category_id.clone();
        }
        if let Some(note) = &self.note {
            expense.note = note.clone();
        }
    }
}
