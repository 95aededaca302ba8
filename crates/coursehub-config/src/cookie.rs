use std::env;

/// Settings for the cookie that carries the auth token.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub name: String,
    /// Sets the `Secure` attribute. Defaults to on in production.
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "authToken".to_string(),
            secure: false,
        }
    }
}

impl CookieConfig {
    pub fn from_env() -> Self {
        let production = env::var("ENVIRONMENT")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Self {
            name: env::var("AUTH_COOKIE_NAME").unwrap_or_else(|_| "authToken".to_string()),
            secure: env::var("AUTH_COOKIE_SECURE")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(production),
        }
    }
}
