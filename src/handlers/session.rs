//! Login and logout.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::auth;
use crate::db::{queries, AppState};
use crate::error::{AppError, Result};
use crate::extractors::Form;
use crate::middleware::SESSION_COOKIE;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Display name, not email.
    pub username: String,
    pub password: String,
}

/// GET /login - the login entry point (template rendering lives elsewhere).
pub async fn login_page() -> &'static str {
    "login"
}

/// POST /login
///
/// Verifies credentials, issues a session token, and sets it as an
/// HttpOnly cookie. Unknown user and wrong password produce the same
/// response - no user enumeration.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let conn = state.db.get()?;

    let user = match queries::get_user_by_display_name(&conn, &form.username)? {
        Some(user) if auth::verify_password(&form.password, &user.password_hash) => user,
        _ => {
            tracing::debug!(username = %form.username, "login rejected");
            return Err(AppError::Unauthorized);
        }
    };

    let token = auth::issue_token(&state.config.token_secret, &user.display_name)?;
    let cookie = format!("{}={}; HttpOnly; Path=/", SESSION_COOKIE, token);

    let mut response = Redirect::to("/me").into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(format!("Invalid cookie value: {}", e)))?,
    );
    Ok(response)
}

/// POST /logout
///
/// Clears the cookie and redirects to login. The token itself stays valid
/// until natural expiry - there is no server-side revocation.
pub async fn logout() -> Response {
    let cookie = format!("{}=; Max-Age=0; HttpOnly; Path=/", SESSION_COOKIE);

    let mut response = Redirect::to("/login").into_response();
    // Static value, always a valid header
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}
