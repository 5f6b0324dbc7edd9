pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{issue_token, validate_token, SESSION_TTL_SECS};
