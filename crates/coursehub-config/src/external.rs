use std::env;

/// Third-party identity verification. Disabled when no client id is set.
#[derive(Clone, Debug, Default)]
pub struct ExternalIdentityConfig {
    pub google_client_id: Option<String>,
    pub google_tokeninfo_url: String,
}

impl ExternalIdentityConfig {
    pub fn from_env() -> Self {
        Self {
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            google_tokeninfo_url: env::var("GOOGLE_TOKENINFO_URL")
                .unwrap_or_else(|_| "https://oauth2.googleapis.com/tokeninfo".to_string()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.google_client_id.is_some()
    }
}
