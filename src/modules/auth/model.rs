use serde::Serialize;
use utoipa::ToSchema;

pub use coursehub_models::{
    ExternalLoginRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, User,
};

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
