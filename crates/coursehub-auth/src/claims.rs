//! Token claims and the resolved caller identity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use coursehub_core::AppError;
use coursehub_models::{Role, UserId};

/// Claims embedded in a session token.
///
/// `sub` carries the user id as a string, per the JWT registered claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn identity(&self) -> Result<Identity, AppError> {
        let id = self
            .sub
            .parse::<UserId>()
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;
        Ok(Identity::new(id, self.role))
    }
}

/// The authenticated caller, decoded from the token and attached to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Identity {
    pub id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_instructor(&self) -> bool {
        self.role == Role::Instructor
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}
