use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode};

use crate::error::Result;
use crate::models::{Account, NewPayment, NewUser, Payment, UpdateUser, User};

use super::from_row::{query_all, query_one, FromRow, ACCOUNT_COLS, PAYMENT_COLS, USER_COLS};

fn now() -> i64 {
    Utc::now().timestamp()
}

// ============ Users ============

/// Create a user. The password must already be hashed.
pub fn create_user(conn: &Connection, input: &NewUser) -> Result<User> {
    let email = input.email.trim().to_lowercase();
    let user = conn.query_row(
        &format!(
            "INSERT INTO users (email, password_hash, display_name, is_admin, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {}",
            USER_COLS
        ),
        params![
            &email,
            &input.password_hash,
            &input.display_name,
            input.is_admin as i32,
            now()
        ],
        User::from_row,
    )?;
    Ok(user)
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    query_one(
        conn,
        &format!("SELECT {} FROM users WHERE id = ?1", USER_COLS),
        &[&id],
    )
}

/// Look up a user by display name (the login handle).
pub fn get_user_by_display_name(conn: &Connection, display_name: &str) -> Result<Option<User>> {
    query_one(
        conn,
        &format!("SELECT {} FROM users WHERE display_name = ?1", USER_COLS),
        &[&display_name],
    )
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    query_all(
        conn,
        &format!("SELECT {} FROM users ORDER BY id", USER_COLS),
        &[],
    )
}

pub fn count_users(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    Ok(count)
}

/// Update a user's identity fields. Returns the updated user, or None if not found.
pub fn update_user(conn: &Connection, id: i64, input: &UpdateUser) -> Result<Option<User>> {
    let email = input.email.trim().to_lowercase();
    query_one(
        conn,
        &format!(
            "UPDATE users SET email = ?1, display_name = ?2, is_admin = ?3
             WHERE id = ?4 RETURNING {}",
            USER_COLS
        ),
        &[&email, &input.display_name, &(input.is_admin as i32), &id],
    )
}

/// Delete a user. Owned accounts and payments go with it via the schema's
/// cascade rules. Returns true if the user existed.
pub fn delete_user(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

// ============ Accounts ============

/// Create an account with a server-assigned id.
pub fn create_account(conn: &Connection, user_id: i64, balance: f64) -> Result<Account> {
    let account = conn.query_row(
        &format!(
            "INSERT INTO accounts (balance, user_id, created_at)
             VALUES (?1, ?2, ?3) RETURNING {}",
            ACCOUNT_COLS
        ),
        params![balance, user_id, now()],
        Account::from_row,
    )?;
    Ok(account)
}

/// Create an account with the provider-referenced id if no such account
/// exists yet, then return the row.
///
/// `ON CONFLICT DO NOTHING` makes creation races safe: when two webhooks
/// reference the same unknown account id concurrently, the loser of the
/// insert falls through to fetching the existing row.
pub fn ensure_account(conn: &Connection, account_id: i64, user_id: i64) -> Result<Account> {
    conn.execute(
        "INSERT INTO accounts (id, balance, user_id, created_at)
         VALUES (?1, 0, ?2, ?3) ON CONFLICT(id) DO NOTHING",
        params![account_id, user_id, now()],
    )?;
    let account = conn.query_row(
        &format!("SELECT {} FROM accounts WHERE id = ?1", ACCOUNT_COLS),
        params![account_id],
        Account::from_row,
    )?;
    Ok(account)
}

pub fn get_account(conn: &Connection, id: i64) -> Result<Option<Account>> {
    query_one(
        conn,
        &format!("SELECT {} FROM accounts WHERE id = ?1", ACCOUNT_COLS),
        &[&id],
    )
}

pub fn list_accounts_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Account>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM accounts WHERE user_id = ?1 ORDER BY id",
            ACCOUNT_COLS
        ),
        &[&user_id],
    )
}

/// Admin override: set an account's balance outright.
/// Returns the updated account, or None if not found.
pub fn update_account_balance(conn: &Connection, id: i64, balance: f64) -> Result<Option<Account>> {
    query_one(
        conn,
        &format!(
            "UPDATE accounts SET balance = ?1 WHERE id = ?2 RETURNING {}",
            ACCOUNT_COLS
        ),
        &[&balance, &id],
    )
}

/// Credit an amount to an account as a single atomic increment.
///
/// The increment happens inside the UPDATE so concurrent payments to the
/// same account never lose updates to a read-modify-write race.
/// Returns the updated account, or None if not found.
pub fn credit_account(conn: &Connection, id: i64, amount: f64) -> Result<Option<Account>> {
    query_one(
        conn,
        &format!(
            "UPDATE accounts SET balance = balance + ?1 WHERE id = ?2 RETURNING {}",
            ACCOUNT_COLS
        ),
        &[&amount, &id],
    )
}

// ============ Payments ============

/// Outcome of a payment insert attempt.
#[derive(Debug)]
pub enum PaymentInsert {
    Inserted(Payment),
    /// A payment with this transaction id already exists. Not an error:
    /// replayed webhook deliveries are expected.
    DuplicateTransaction,
}

/// True if a payment with this transaction id exists.
///
/// This is an optimization for the common replay case; the UNIQUE
/// constraint caught by `insert_payment` is the actual guarantee.
pub fn exists_payment(conn: &Connection, transaction_id: &str) -> Result<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM payments WHERE transaction_id = ?1)",
        params![transaction_id],
        |row| row.get(0),
    )?;
    Ok(exists != 0)
}

/// Insert a payment row.
///
/// A UNIQUE-constraint violation on transaction_id is reinterpreted as
/// `DuplicateTransaction` rather than surfaced as a database error - two
/// concurrent deliveries of the same webhook may both pass the existence
/// check, and the second insert must degrade to the idempotent outcome.
pub fn insert_payment(conn: &Connection, input: &NewPayment) -> Result<PaymentInsert> {
    let result = conn.query_row(
        &format!(
            "INSERT INTO payments (transaction_id, account_id, user_id, amount, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {}",
            PAYMENT_COLS
        ),
        params![
            &input.transaction_id,
            input.account_id,
            input.user_id,
            input.amount,
            now()
        ],
        Payment::from_row,
    );

    match result {
        Ok(payment) => Ok(PaymentInsert::Inserted(payment)),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Ok(PaymentInsert::DuplicateTransaction)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn list_payments_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Payment>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM payments WHERE user_id = ?1 ORDER BY id",
            PAYMENT_COLS
        ),
        &[&user_id],
    )
}

pub fn list_payments_for_account(conn: &Connection, account_id: i64) -> Result<Vec<Payment>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM payments WHERE account_id = ?1 ORDER BY id",
            PAYMENT_COLS
        ),
        &[&account_id],
    )
}
