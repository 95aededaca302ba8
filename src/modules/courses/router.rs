use axum::{
    Router,
    routing::{get, post, put},
};

use super::controller::{
    create_course, delete_course, list_instructor_courses, list_published_courses, update_course,
};
use crate::state::AppState;

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course))
        .route("/published", get(list_published_courses))
        .route("/instructor/{instructor_id}", get(list_instructor_courses))
        .route("/{id}", put(update_course).delete(delete_course))
}
