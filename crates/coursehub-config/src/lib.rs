//! # Coursehub Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cookie`]: the HTTP-only cookie that carries the token
//! - [`cors`]: CORS origin allow-list
//! - [`server`]: bind address
//! - [`external`]: third-party identity verification
//!
//! [`AppConfig`] bundles them. It is built once at process start and handed to
//! the application state; nothing below `main` reads the environment.
//!
//! # Example
//!
//! ```ignore
//! use coursehub_config::AppConfig;
//!
//! let config = AppConfig::from_env();
//! let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
//! ```

pub mod cookie;
pub mod cors;
pub mod external;
pub mod jwt;
pub mod server;

pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use external::ExternalIdentityConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// All process-wide configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
    pub cors: CorsConfig,
    pub external: ExternalIdentityConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cookie: CookieConfig::from_env(),
            cors: CorsConfig::from_env(),
            external: ExternalIdentityConfig::from_env(),
        }
    }
}
