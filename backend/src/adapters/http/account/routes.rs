//! Axum routes for account endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    change_password, delete_my_profile, get_my_profile, login, logout, register, update_profile,
};

/// # Routes
///
/// - `POST /register`, `POST /login`, `POST /logout` - public
/// - `GET /me`, `DELETE /me` - Authenticated
/// - `PUT /changepassword`, `PUT /updateprofile` - Authenticated
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(get_my_profile).delete(delete_my_profile))
        .route("/changepassword", put(change_password))
        .route("/updateprofile", put(update_profile))
}
