//! Feature modules. Each one is split into `controller` (HTTP handlers),
//! `service` (business rules), `model` (DTOs) and `router`.

pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod sessions;
