pub mod admin;
pub mod me;
pub mod session;
pub mod webhook;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::db::AppState;
use crate::middleware::session_gate;

/// Build the full application router with the session gate applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(me::root))
        .route("/login", get(session::login_page).post(session::login))
        .route("/logout", post(session::logout))
        .route("/me", get(me::me))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/user/{user_id}", get(admin::show_user))
        .route("/admin/create/user", post(admin::create_user))
        .route("/admin/edit/user/{user_id}", post(admin::edit_user))
        .route("/admin/delete/user/{user_id}", post(admin::delete_user))
        .route("/admin/edit/account/{account_id}", post(admin::edit_account))
        .route("/webhook/payment", post(webhook::handle_payment_webhook))
        .layer(from_fn_with_state(state.clone(), session_gate))
        .with_state(state)
}
