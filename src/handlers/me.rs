//! Current-user views.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use serde::Serialize;

use crate::db::{queries, AppState};
use crate::error::Result;
use crate::extractors::Json;
use crate::middleware::CurrentUser;
use crate::models::{Account, Payment, User};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
    pub accounts: Vec<Account>,
    pub payments: Vec<Payment>,
}

/// GET / - authenticated users land on their overview.
pub async fn root() -> Redirect {
    Redirect::to("/me")
}

/// GET /me - the user's accounts and payments. Admins are sent to the
/// user management view instead.
pub async fn me(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response> {
    if user.is_admin {
        return Ok(Redirect::to("/admin/users").into_response());
    }

    let conn = state.db.get()?;
    let accounts = queries::list_accounts_for_user(&conn, user.id)?;
    let payments = queries::list_payments_for_user(&conn, user.id)?;

    Ok(Json(MeResponse {
        user,
        accounts,
        payments,
    })
    .into_response())
}
