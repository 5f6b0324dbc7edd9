use serde::{Deserialize, Serialize};

/// An account holding a balance, owned by one user.
///
/// The balance changes only through payment ingestion (atomic credit) or an
/// explicit admin override. Nothing enforces non-negativity: a negative
/// webhook amount or an admin edit can drive it below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub balance: f64,
    pub user_id: i64,
    pub created_at: i64,
}
