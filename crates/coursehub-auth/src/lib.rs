//! # Coursehub Auth
//!
//! The session token codec.
//!
//! - [`claims`]: the signed payload ([`Claims`]) and the per-request [`Identity`]
//! - [`jwt`]: issuing and verifying tokens
//!
//! Tokens are stateless: there is no revocation list, so a token stays valid
//! until it expires even after the user logs out. Logout only clears the
//! client's cookie.
//!
//! # Example
//!
//! ```ignore
//! use coursehub_auth::{Identity, create_access_token, verify_identity};
//! use coursehub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(Identity::new(user_id, Role::Student), &config)?;
//! let identity = verify_identity(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, Identity};
pub use jwt::{create_access_token, issue_token, verify_identity, verify_token};
