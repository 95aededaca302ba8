use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{complete_session, get_student_dashboard, rate_session};
use crate::state::AppState;

pub fn init_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/student/{student_id}", get(get_student_dashboard))
        .route(
            "/student/{student_id}/sessions/{session_id}/complete",
            post(complete_session),
        )
        .route("/sessions/{session_id}/rate", post(rate_session))
}
