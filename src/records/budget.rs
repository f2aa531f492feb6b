use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CategoryId;

/// A monthly spending ceiling for one category.
///
/// Invariant: at most one budget per (user, category) pair; updates go
/// through the record store's upsert and keep the record identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: CategoryId,
    pub monthly_limit: f64,
}

impl Budget {
    pub fn new(user_id: Uuid, category_id: CategoryId, monthly_limit: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category_id,
            monthly_limit,
        }
    }
}
