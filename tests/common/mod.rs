//! Test utilities and fixtures for Tillbox integration tests

#![allow(dead_code)]

use rusqlite::Connection;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

pub use tillbox::auth;
pub use tillbox::config::Config;
pub use tillbox::db::{create_pool, init_db, queries, AppState, DbPool};
pub use tillbox::ledger::{self, IngestOutcome};
pub use tillbox::models::*;
pub use tillbox::signature::{canonical_amount, SignatureVerifier};

pub const TEST_WEBHOOK_SECRET: &str = "test-webhook-secret";
pub const TEST_TOKEN_SECRET: &str = "test-token-secret";

/// Test configuration with fixed secrets
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_path: ":memory:".to_string(),
        webhook_secret: TEST_WEBHOOK_SECRET.to_string(),
        token_secret: TEST_TOKEN_SECRET.to_string(),
        enforce_account_ownership: false,
        dev_mode: true,
    }
}

/// Create an in-memory test database with schema initialized
pub fn setup_test_db() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    init_db(&conn).expect("Failed to initialize schema");
    conn
}

/// Create a file-backed database pool for tests that need shared
/// connections (router tests, concurrency tests). The returned temp file
/// must outlive the pool.
pub fn setup_test_pool() -> (DbPool, NamedTempFile) {
    let file = NamedTempFile::new().expect("Failed to create temp database file");
    let path = file.path().to_str().expect("Temp path is not UTF-8");
    let pool = create_pool(path).expect("Failed to create test pool");
    {
        let conn = pool.get().expect("Failed to get test connection");
        init_db(&conn).expect("Failed to initialize schema");
    }
    (pool, file)
}

/// Application state over a file-backed pool
pub fn setup_test_state() -> (AppState, NamedTempFile) {
    let (pool, file) = setup_test_pool();
    let state = AppState {
        db: pool,
        config: test_config(),
    };
    (state, file)
}

/// Create a test user with a hashed password
pub fn create_test_user(
    conn: &Connection,
    email: &str,
    display_name: &str,
    password: &str,
    is_admin: bool,
) -> User {
    let password_hash = auth::hash_password(password).expect("Failed to hash test password");
    queries::create_user(
        conn,
        &NewUser {
            email: email.to_string(),
            password_hash,
            display_name: display_name.to_string(),
            is_admin,
        },
    )
    .expect("Failed to create test user")
}

/// Compute a webhook signature the way the provider does:
/// sha256(account_id + amount + transaction_id + user_id + secret), hex.
pub fn compute_signature(
    account_id: i64,
    amount: f64,
    transaction_id: &str,
    user_id: i64,
    secret: &str,
) -> String {
    let message = format!(
        "{}{}{}{}{}",
        account_id,
        canonical_amount(amount),
        transaction_id,
        user_id,
        secret
    );
    hex::encode(Sha256::digest(message.as_bytes()))
}

/// Build a correctly signed webhook payload for the test secret
pub fn signed_payload(
    transaction_id: &str,
    account_id: i64,
    user_id: i64,
    amount: f64,
) -> PaymentWebhook {
    PaymentWebhook {
        transaction_id: transaction_id.to_string(),
        account_id,
        user_id,
        amount,
        signature: compute_signature(
            account_id,
            amount,
            transaction_id,
            user_id,
            TEST_WEBHOOK_SECRET,
        ),
    }
}
