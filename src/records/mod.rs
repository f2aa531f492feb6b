//! Persisted record types and patch helpers.

pub mod budget;
pub mod expense;
pub mod user;

pub use budget::Budget;
pub use expense::{Expense, ExpensePatch, PaymentMethod};
pub use user::User;
