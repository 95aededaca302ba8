use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{external_login, get_current_user, login_user, logout_user, register_user};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/external", post(external_login))
        .route("/logout", post(logout_user))
        .route("/user", get(get_current_user))
}
