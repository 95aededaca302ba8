use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{create_session, delete_session, get_session, list_sessions, update_session};
use crate::state::AppState;

/// Session routes. Mounted under `/courses` alongside the course routes.
pub fn init_sessions_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/sessions", get(list_sessions).post(create_session))
        .route("/{id}/sessions/{session_id}", get(get_session))
        .route(
            "/sessions/{session_id}",
            put(update_session).delete(delete_session),
        )
}
