//! Ledger store tests: queries, constraints, cascade rules

mod common;

use common::*;

#[test]
fn test_create_and_fetch_user() {
    let conn = setup_test_db();
    let user = create_test_user(&conn, "User1@Example.com", "Dark", "123456", false);

    assert_eq!(user.email, "user1@example.com", "Email is normalized");
    assert!(!user.is_admin);

    let fetched = queries::get_user(&conn, user.id).unwrap().unwrap();
    assert_eq!(fetched.display_name, "Dark");

    let by_name = queries::get_user_by_display_name(&conn, "Dark").unwrap().unwrap();
    assert_eq!(by_name.id, user.id);

    assert!(queries::get_user(&conn, 999).unwrap().is_none());
    assert!(queries::get_user_by_display_name(&conn, "Nobody").unwrap().is_none());
}

#[test]
fn test_update_user() {
    let conn = setup_test_db();
    let user = create_test_user(&conn, "user1@example.com", "Dark", "123456", false);

    let updated = queries::update_user(
        &conn,
        user.id,
        &UpdateUser {
            email: "new@example.com".to_string(),
            display_name: "Darker".to_string(),
            is_admin: true,
        },
    )
    .unwrap()
    .unwrap();

    assert_eq!(updated.email, "new@example.com");
    assert_eq!(updated.display_name, "Darker");
    assert!(updated.is_admin);

    assert!(queries::update_user(
        &conn,
        999,
        &UpdateUser {
            email: "x@example.com".to_string(),
            display_name: "X".to_string(),
            is_admin: false,
        }
    )
    .unwrap()
    .is_none());
}

#[test]
fn test_ensure_account_is_create_or_fetch() {
    let conn = setup_test_db();
    let user = create_test_user(&conn, "user1@example.com", "Dark", "123456", false);

    let created = queries::ensure_account(&conn, 42, user.id).unwrap();
    assert_eq!(created.id, 42);
    assert_eq!(created.balance, 0.0);
    assert_eq!(created.user_id, user.id);

    // A second attempt for the same id fetches the existing row.
    let fetched = queries::ensure_account(&conn, 42, user.id).unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.created_at, created.created_at);

    let accounts = queries::list_accounts_for_user(&conn, user.id).unwrap();
    assert_eq!(accounts.len(), 1);
}

#[test]
fn test_ensure_account_keeps_existing_owner() {
    let conn = setup_test_db();
    let owner = create_test_user(&conn, "owner@example.com", "Owner", "123456", false);
    let other = create_test_user(&conn, "other@example.com", "Other", "123456", false);

    queries::ensure_account(&conn, 7, owner.id).unwrap();
    let account = queries::ensure_account(&conn, 7, other.id).unwrap();

    assert_eq!(account.user_id, owner.id, "Conflict insert must not reassign ownership");
}

#[test]
fn test_credit_account_increments_in_place() {
    let conn = setup_test_db();
    let user = create_test_user(&conn, "user1@example.com", "Dark", "123456", false);
    let account = queries::create_account(&conn, user.id, 100.0).unwrap();

    let credited = queries::credit_account(&conn, account.id, 25.5).unwrap().unwrap();
    assert_eq!(credited.balance, 125.5);

    let credited = queries::credit_account(&conn, account.id, -25.5).unwrap().unwrap();
    assert_eq!(credited.balance, 100.0);

    assert!(queries::credit_account(&conn, 999, 1.0).unwrap().is_none());
}

#[test]
fn test_update_account_balance_override() {
    let conn = setup_test_db();
    let user = create_test_user(&conn, "user1@example.com", "Dark", "123456", false);
    let account = queries::create_account(&conn, user.id, 100.0).unwrap();

    let updated = queries::update_account_balance(&conn, account.id, 5.0).unwrap().unwrap();
    assert_eq!(updated.balance, 5.0);

    assert!(queries::update_account_balance(&conn, 999, 5.0).unwrap().is_none());
}

#[test]
fn test_exists_payment() {
    let conn = setup_test_db();
    let user = create_test_user(&conn, "user1@example.com", "Dark", "123456", false);
    let account = queries::create_account(&conn, user.id, 0.0).unwrap();

    assert!(!queries::exists_payment(&conn, "tx-1").unwrap());

    queries::insert_payment(
        &conn,
        &NewPayment {
            transaction_id: "tx-1".to_string(),
            account_id: account.id,
            user_id: user.id,
            amount: 1.0,
        },
    )
    .unwrap();

    assert!(queries::exists_payment(&conn, "tx-1").unwrap());
    assert!(!queries::exists_payment(&conn, "tx-2").unwrap());
}

#[test]
fn test_delete_user_cascades_to_accounts_and_payments() {
    let conn = setup_test_db();
    let user = create_test_user(&conn, "user1@example.com", "Dark", "123456", false);
    let account = queries::create_account(&conn, user.id, 0.0).unwrap();
    queries::insert_payment(
        &conn,
        &NewPayment {
            transaction_id: "tx-cascade".to_string(),
            account_id: account.id,
            user_id: user.id,
            amount: 1.0,
        },
    )
    .unwrap();

    assert!(queries::delete_user(&conn, user.id).unwrap());

    assert!(queries::get_user(&conn, user.id).unwrap().is_none());
    assert!(queries::get_account(&conn, account.id).unwrap().is_none());
    assert!(!queries::exists_payment(&conn, "tx-cascade").unwrap());

    // Deleting again reports not found
    assert!(!queries::delete_user(&conn, user.id).unwrap());
}
