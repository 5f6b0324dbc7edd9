//! Process-wide session gate.
//!
//! Every request outside the allow-list must carry a valid session cookie;
//! anonymous requests are redirected to the login entry point before
//! reaching any handler. The webhook endpoint is on the allow-list because
//! its caller is the payment provider, which authenticates by signature
//! rather than by session.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth;
use crate::db::{queries, AppState};
use crate::models::User;

/// Cookie carrying the bearer token.
pub const SESSION_COOKIE: &str = "Authorization";

/// Paths reachable without a session.
const PUBLIC_PATHS: &[&str] = &["/login", "/favicon.ico", "/webhook/payment"];

/// The authenticated user for this request, inserted by the gate.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if PUBLIC_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    match lookup_current_user(&state, request.headers()) {
        Some(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// Resolve the request's identity from the session cookie.
///
/// Every failure mode - missing cookie, bad or expired token, unknown user,
/// store trouble - degrades to "no identity" rather than an error.
fn lookup_current_user(state: &AppState, headers: &HeaderMap) -> Option<User> {
    let token = session_cookie(headers)?;
    let display_name = auth::validate_token(&state.config.token_secret, &token)?;

    let conn = match state.db.get() {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!("Session lookup failed to get db connection: {}", e);
            return None;
        }
    };

    match queries::get_user_by_display_name(&conn, &display_name) {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Session lookup query failed: {}", e);
            None
        }
    }
}

/// Extract the session token from the Cookie header.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
