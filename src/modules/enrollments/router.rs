use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{enroll, list_student_enrollments};
use crate::state::AppState;

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(enroll))
        .route("/student/{student_id}", get(list_student_enrollments))
}
