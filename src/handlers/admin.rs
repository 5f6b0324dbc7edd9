//! Admin user/account management.
//!
//! Every handler requires the `is_admin` flag on top of the session gate;
//! a logged-in regular user gets Forbidden.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension,
};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::db::{queries, AppState};
use crate::error::{AppError, Result};
use crate::extractors::{Form, Json};
use crate::middleware::CurrentUser;
use crate::models::{Account, NewUser, Payment, UpdateUser, User};

fn require_admin(user: &User) -> Result<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".into()))
    }
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<User>>> {
    require_admin(&user)?;
    let conn = state.db.get()?;
    Ok(Json(queries::list_users(&conn)?))
}

#[derive(Debug, Serialize)]
pub struct AccountDetail {
    pub account: Account,
    pub payments: Vec<Payment>,
}

#[derive(Debug, Serialize)]
pub struct UserDetail {
    pub user: User,
    pub accounts: Vec<AccountDetail>,
}

/// GET /admin/user/{user_id} - one user with accounts and their payments.
pub async fn show_user(
    State(state): State<AppState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserDetail>> {
    require_admin(&admin)?;
    let conn = state.db.get()?;

    let user = queries::get_user(&conn, user_id)?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let mut accounts = Vec::new();
    for account in queries::list_accounts_for_user(&conn, user.id)? {
        let payments = queries::list_payments_for_account(&conn, account.id)?;
        accounts.push(AccountDetail { account, payments });
    }

    Ok(Json(UserDetail { user, accounts }))
}

#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    pub email: String,
    pub display_name: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// POST /admin/create/user - creates the user plus a zero-balance account.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Form(form): Form<CreateUserForm>,
) -> Result<Redirect> {
    require_admin(&admin)?;

    if form.email.trim().is_empty() || form.display_name.trim().is_empty() {
        return Err(AppError::BadRequest("email and display_name are required".into()));
    }

    let password_hash = auth::hash_password(&form.password)?;

    let mut conn = state.db.get()?;
    let tx = conn.transaction()?;
    let user = queries::create_user(
        &tx,
        &NewUser {
            email: form.email,
            password_hash,
            display_name: form.display_name,
            is_admin: form.is_admin,
        },
    )?;
    queries::create_account(&tx, user.id, 0.0)?;
    tx.commit()?;

    Ok(Redirect::to("/admin/users"))
}

/// POST /admin/edit/user/{user_id}
pub async fn edit_user(
    State(state): State<AppState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(user_id): Path<i64>,
    Form(form): Form<UpdateUser>,
) -> Result<Redirect> {
    require_admin(&admin)?;
    let conn = state.db.get()?;

    queries::update_user(&conn, user_id, &form)?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Redirect::to("/admin/users"))
}

/// POST /admin/delete/user/{user_id} - cascades to accounts and payments.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(user_id): Path<i64>,
) -> Result<Redirect> {
    require_admin(&admin)?;
    let conn = state.db.get()?;

    if !queries::delete_user(&conn, user_id)? {
        return Err(AppError::NotFound("User not found".into()));
    }

    Ok(Redirect::to("/admin/users"))
}

#[derive(Debug, Deserialize)]
pub struct EditAccountForm {
    pub balance: f64,
}

/// POST /admin/edit/account/{account_id} - balance override.
pub async fn edit_account(
    State(state): State<AppState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(account_id): Path<i64>,
    Form(form): Form<EditAccountForm>,
) -> Result<Redirect> {
    require_admin(&admin)?;
    let conn = state.db.get()?;

    let account = queries::update_account_balance(&conn, account_id, form.balance)?
        .ok_or_else(|| AppError::NotFound("Account not found".into()))?;

    Ok(Redirect::to(&format!("/admin/user/{}", account.user_id)))
}
