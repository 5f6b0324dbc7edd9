use serde::{Deserialize, Serialize};

/// User identity. `display_name` doubles as the login handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub is_admin: bool,
    pub created_at: i64,
}

/// Data required to create a user at the store level.
/// The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub is_admin: bool,
}

/// Admin edit of a user's identity fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub is_admin: bool,
}
