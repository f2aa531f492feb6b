use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single local user record. Overwritten on each sign-in; expenses and
/// budgets stay scoped to the id they were created under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
        }
    }
}
