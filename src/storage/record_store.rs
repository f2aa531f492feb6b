use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::CategoryId;
use crate::records::{Budget, Expense, ExpensePatch, User};

use super::{KeyValueStore, Result, BUDGETS_KEY, EXPENSES_KEY, USER_KEY};

/// Repository over a key-value backend exposing the record operations the
/// application needs.
///
/// Every mutation is a whole-collection read-modify-write: load the full
/// list, change it in memory, write it back. Last writer wins; the single
/// active session is the only writer.
pub struct RecordStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    pub fn load_user(&self) -> Result<Option<User>> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                tracing::warn!("Discarding malformed user record: {err}");
                Ok(None)
            }
        }
    }

    pub fn save_user(&self, user: &User) -> Result<()> {
        self.write(USER_KEY, user)
    }

    /// Expenses owned by the user, in stored (insertion) order.
    pub fn expenses_for_user(&self, user_id: Uuid) -> Result<Vec<Expense>> {
        let mut expenses = self.load_list::<Expense>(EXPENSES_KEY)?;
        expenses.retain(|expense| expense.user_id == user_id);
        Ok(expenses)
    }

    /// Prepends the expense so the stored list stays newest-first.
    pub fn add_expense(&self, expense: Expense) -> Result<()> {
        let mut expenses = self.load_list::<Expense>(EXPENSES_KEY)?;
        expenses.insert(0, expense);
        self.write(EXPENSES_KEY, &expenses)
    }

    /// Applies the patch to the expense with the given id. Returns `false`
    /// (without touching storage) when no such expense exists.
    pub fn update_expense(&self, id: Uuid, patch: &ExpensePatch) -> Result<bool> {
        let mut expenses = self.load_list::<Expense>(EXPENSES_KEY)?;
        let Some(expense) = expenses.iter_mut().find(|expense| expense.id == id) else {
            return Ok(false);
        };
        patch.apply(expense);
        self.write(EXPENSES_KEY, &expenses)?;
        Ok(true)
    }

    /// Removes the expense with the given id. Removing a missing id is a
    /// no-op, not an error.
    pub fn remove_expense(&self, id: Uuid) -> Result<bool> {
        let mut expenses = self.load_list::<Expense>(EXPENSES_KEY)?;
        let before = expenses.len();
        expenses.retain(|expense| expense.id != id);
        if expenses.len() == before {
            return Ok(false);
        }
        self.write(EXPENSES_KEY, &expenses)?;
        Ok(true)
    }

    pub fn budgets_for_user(&self, user_id: Uuid) -> Result<Vec<Budget>> {
        let mut budgets = self.load_list::<Budget>(BUDGETS_KEY)?;
        budgets.retain(|budget| budget.user_id == user_id);
        Ok(budgets)
    }

    /// Upserts the budget for (user, category): an existing record keeps its
    /// identity and gets the new limit, otherwise a fresh record is appended.
    pub fn set_budget(
        &self,
        user_id: Uuid,
        category_id: CategoryId,
        monthly_limit: f64,
    ) -> Result<Budget> {
        let mut budgets = self.load_list::<Budget>(BUDGETS_KEY)?;
        let updated = match budgets
            .iter_mut()
            .find(|budget| budget.user_id == user_id && budget.category_id == category_id)
        {
            Some(existing) => {
                existing.monthly_limit = monthly_limit;
                existing.clone()
            }
            None => {
                let budget = Budget::new(user_id, category_id, monthly_limit);
                budgets.push(budget.clone());
                budget
            }
        };
        self.write(BUDGETS_KEY, &budgets)?;
        Ok(updated)
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(list) => Ok(list),
            Err(err) => {
                tracing::warn!("Discarding malformed `{key}` collection: {err}");
                Ok(Vec::new())
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.store.set(key, &json)
    }
}
