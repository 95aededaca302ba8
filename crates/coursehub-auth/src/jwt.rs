//! Issuing and verifying session tokens (HS256).
//!
//! Verification uses zero leeway: a token is rejected as soon as `exp` has
//! passed.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use coursehub_config::JwtConfig;
use coursehub_core::AppError;

use crate::claims::{Claims, Identity};

/// Issues a token for `identity` that expires `ttl_seconds` from now.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn issue_token(
    identity: Identity,
    ttl_seconds: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + ttl_seconds).max(0) as usize;

    let claims = Claims {
        sub: identity.id.to_string(),
        role: identity.role,
        exp,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Issues a token with the configured access-token lifetime.
pub fn create_access_token(identity: Identity, jwt_config: &JwtConfig) -> Result<String, AppError> {
    issue_token(identity, jwt_config.access_token_expiry, jwt_config)
}

/// Verifies signature and expiry and returns the claims.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, signed with a
/// different key, or expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

/// Verifies a token and returns the identity it carries.
pub fn verify_identity(token: &str, jwt_config: &JwtConfig) -> Result<Identity, AppError> {
    verify_token(token, jwt_config)?.identity()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursehub_models::{Role, UserId};

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_round_trip_preserves_id_and_role() {
        let config = get_test_jwt_config();
        let identity = Identity::new(UserId::new(17), Role::Instructor);

        let token = create_access_token(identity, &config).unwrap();
        let decoded = verify_identity(&token, &config).unwrap();

        assert_eq!(decoded, identity);
    }

    #[test]
    fn test_claims_carry_lifetime() {
        let config = get_test_jwt_config();
        let token =
            create_access_token(Identity::new(UserId::new(1), Role::Student), &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = get_test_jwt_config();
        let token = issue_token(Identity::new(UserId::new(1), Role::Student), -1, &config).unwrap();

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = get_test_jwt_config();
        let token =
            create_access_token(Identity::new(UserId::new(1), Role::Student), &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            access_token_expiry: 3600,
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        let config = get_test_jwt_config();
        assert!(verify_token("invalid-token", &config).is_err());
        assert!(verify_token("", &config).is_err());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let config = get_test_jwt_config();
        let token =
            create_access_token(Identity::new(UserId::new(1), Role::Student), &config).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = "eyJzdWIiOiIxIiwicm9sZSI6Imluc3RydWN0b3IiLCJleHAiOjk5OTk5OTk5OTksImlhdCI6MH0";
        parts[1] = forged;
        let tampered = parts.join(".");

        assert!(verify_token(&tampered, &config).is_err());
    }
}
