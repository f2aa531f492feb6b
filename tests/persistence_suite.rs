use std::fs;

use chrono::NaiveDate;
use tempfile::TempDir;
use uuid::Uuid;

use expense_core::catalog::CategoryId;
use expense_core::records::{Expense, ExpensePatch, PaymentMethod, User};
use expense_core::storage::{JsonFileStore, KeyValueStore, RecordStore};

fn record_store(temp: &TempDir) -> RecordStore<JsonFileStore> {
    let backend =
        JsonFileStore::new(Some(temp.path().to_path_buf())).expect("json store in temp dir");
    RecordStore::new(backend)
}

fn expense(user_id: Uuid, date: &str, amount: f64) -> Expense {
    Expense::new(
        user_id,
        date.parse().expect("valid date"),
        amount,
        PaymentMethod::Card,
        CategoryId::from("2"),
    )
}

#[test]
fn records_survive_a_fresh_store_over_the_same_directory() {
    let temp = TempDir::new().expect("temp dir");
    let user = User::new("tester@example.com");

    {
        let store = record_store(&temp);
        store.save_user(&user).expect("save user");
        store
            .add_expense(expense(user.id, "2024-06-01", 100.0).with_note("swiggy order"))
            .expect("add expense");
        store
            .set_budget(user.id, CategoryId::from("2"), 250.0)
            .expect("set budget");
    }

    let reopened = record_store(&temp);
    assert_eq!(reopened.load_user().expect("load user"), Some(user.clone()));
    let expenses = reopened
        .expenses_for_user(user.id)
        .expect("load expenses");
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, 100.0);
    assert_eq!(expenses[0].note.as_deref(), Some("swiggy order"));
    let budgets = reopened.budgets_for_user(user.id).expect("load budgets");
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].monthly_limit, 250.0);
}

#[test]
fn stored_expense_order_is_newest_first() {
    let temp = TempDir::new().expect("temp dir");
    let store = record_store(&temp);
    let user = User::new("tester@example.com");

    store
        .add_expense(expense(user.id, "2024-06-01", 1.0))
        .expect("add");
    store
        .add_expense(expense(user.id, "2024-05-15", 2.0))
        .expect("add");

    let expenses = store.expenses_for_user(user.id).expect("load");
    // Insertion order, not date order: the later add comes first.
    assert_eq!(expenses[0].amount, 2.0);
    assert_eq!(expenses[1].amount, 1.0);
}

#[test]
fn patch_updates_keep_record_identity() {
    let temp = TempDir::new().expect("temp dir");
    let store = record_store(&temp);
    let user = User::new("tester@example.com");
    let original = expense(user.id, "2024-06-01", 100.0);
    let id = original.id;
    store.add_expense(original).expect("add");

    let patch = ExpensePatch {
        amount: Some(140.0),
        date: Some(NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date")),
        ..ExpensePatch::default()
    };
    assert!(store.update_expense(id, &patch).expect("update"));

    let expenses = store.expenses_for_user(user.id).expect("load");
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, id);
    assert_eq!(expenses[0].amount, 140.0);
    assert_eq!(
        expenses[0].date,
        NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date")
    );
}

#[test]
fn removing_and_re_removing_an_expense() {
    let temp = TempDir::new().expect("temp dir");
    let store = record_store(&temp);
    let user = User::new("tester@example.com");
    let recorded = expense(user.id, "2024-06-01", 100.0);
    let id = recorded.id;
    store.add_expense(recorded).expect("add");

    assert!(store.remove_expense(id).expect("remove"));
    assert!(!store.remove_expense(id).expect("second remove is a no-op"));
    assert!(store.expenses_for_user(user.id).expect("load").is_empty());
}

#[test]
fn budget_upsert_leaves_a_single_record_per_category() {
    let temp = TempDir::new().expect("temp dir");
    let store = record_store(&temp);
    let user = User::new("tester@example.com");

    let first = store
        .set_budget(user.id, CategoryId::from("2"), 250.0)
        .expect("set");
    let second = store
        .set_budget(user.id, CategoryId::from("2"), 400.0)
        .expect("update");
    store
        .set_budget(user.id, CategoryId::from("4"), 100.0)
        .expect("other category");

    assert_eq!(first.id, second.id);
    let budgets = store.budgets_for_user(user.id).expect("load");
    assert_eq!(budgets.len(), 2);
    let food = budgets
        .iter()
        .find(|budget| budget.category_id == CategoryId::from("2"))
        .expect("food budget");
    assert_eq!(food.monthly_limit, 400.0);
}

#[test]
fn malformed_files_degrade_to_empty_collections() {
    let temp = TempDir::new().expect("temp dir");
    fs::write(temp.path().join("expenses.json"), "{not json").expect("write garbage");
    fs::write(temp.path().join("user.json"), "[]").expect("write wrong shape");

    let store = record_store(&temp);
    assert!(store
        .expenses_for_user(Uuid::new_v4())
        .expect("expenses never fail on malformed data")
        .is_empty());
    assert!(store
        .load_user()
        .expect("user never fails on malformed data")
        .is_none());
}

#[test]
fn backend_keys_are_stable_file_names() {
    let temp = TempDir::new().expect("temp dir");
    let store = record_store(&temp);
    let user = User::new("tester@example.com");
    store.save_user(&user).expect("save user");
    store
        .add_expense(expense(user.id, "2024-06-01", 10.0))
        .expect("add");
    store
        .set_budget(user.id, CategoryId::from("1"), 50.0)
        .expect("budget");

    assert!(temp.path().join("user.json").exists());
    assert!(temp.path().join("expenses.json").exists());
    assert!(temp.path().join("budgets.json").exists());

    // The raw values are ordinary JSON documents.
    let raw = store
        .backend()
        .get("expenses")
        .expect("get")
        .expect("present");
    assert!(raw.trim_start().starts_with('['));
}
