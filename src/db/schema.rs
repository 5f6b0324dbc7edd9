use rusqlite::Connection;

/// Initialize the ledger database schema.
///
/// Cascade deletes are declared here rather than implemented at call sites:
/// deleting a user removes their accounts, and deleting an account removes
/// its payments.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        -- Users (identity; display_name is the login handle)
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            display_name TEXT NOT NULL,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_users_display_name ON users(display_name);

        -- Accounts (balance mutated only by payment credit or admin override)
        CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY,
            balance REAL NOT NULL DEFAULT 0,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_accounts_user ON accounts(user_id);

        -- Payments (immutable facts, one row per provider transaction id)
        -- The UNIQUE constraint on transaction_id is the dedupe safety net;
        -- the application-level existence check is only an optimization.
        CREATE TABLE IF NOT EXISTS payments (
            id INTEGER PRIMARY KEY,
            transaction_id TEXT NOT NULL UNIQUE,
            account_id INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            amount REAL NOT NULL,
            created_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_payments_account ON payments(account_id);
        CREATE INDEX IF NOT EXISTS idx_payments_user ON payments(user_id);
        "#,
    )?;
    Ok(())
}
