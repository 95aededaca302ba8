//! # Coursehub Core
//!
//! Foundational types shared by every Coursehub crate:
//!
//! - [`errors`]: the application error type and its HTTP rendering
//! - [`password`]: salted one-way password hashing
//!
//! # Example
//!
//! ```ignore
//! use coursehub_core::{AppError, hash_password, verify_password};
//!
//! let digest = hash_password("correct horse battery staple")?;
//! if !verify_password("guess", &digest)? {
//!     return Err(AppError::unauthorized("Invalid email or password"));
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorKind};
pub use password::{hash_password, verify_password};
