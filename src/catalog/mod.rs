//! Static reference data: the fixed set of spending categories.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Identifier of a catalog category, referenced by expenses and budgets.
///
/// Referential integrity is not enforced; records may carry ids the catalog
/// no longer knows, and consumers degrade gracefully when lookup fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed spending bucket used to classify expenses and budgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Symbolic icon identifier; rendering is up to the presentation layer.
    pub icon: String,
}

impl Category {
    fn new(id: &str, name: &str, icon: &str) -> Self {
        Self {
            id: CategoryId::from(id),
            name: name.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Ordered lookup over the category set.
///
/// Passed explicitly into the aggregation and budget code so the core never
/// depends on a hidden global catalog.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    /// Find a category by id or case-insensitive name.
    pub fn resolve(&self, key: &str) -> Option<&Category> {
        let lower = key.to_lowercase();
        self.categories
            .iter()
            .find(|category| category.id.as_str() == key || category.name.to_lowercase() == lower)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

static DEFAULT_CATALOG: Lazy<CategoryCatalog> = Lazy::new(|| {
    CategoryCatalog::new(vec![
        Category::new("1", "Rent", "Home"),
        Category::new("2", "Mess/Food", "UtensilsCrossed"),
        Category::new("3", "Tiffin", "Coffee"),
        Category::new("4", "Groceries", "ShoppingCart"),
        Category::new("5", "UPI/Wallet", "Wallet"),
        Category::new("6", "Commute", "Car"),
        Category::new("7", "Mobile/Data", "Smartphone"),
        Category::new("8", "Utilities", "Zap"),
        Category::new("9", "Entertainment", "Gamepad2"),
        Category::new("10", "Health/Pharmacy", "Heart"),
        Category::new("11", "Shopping", "ShoppingBag"),
        Category::new("12", "Travel", "MapPin"),
    ])
});

/// The built-in twelve-category catalog.
pub fn default_catalog() -> &'static CategoryCatalog {
    &DEFAULT_CATALOG
}
