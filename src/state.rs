use std::fmt;
use std::sync::Arc;

use coursehub_config::AppConfig;
use coursehub_db::Datastore;

use crate::modules::auth::identity::{GoogleIdentityVerifier, IdentityVerifier};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Datastore>,
    pub config: Arc<AppConfig>,
    /// `None` when external sign-in is not configured.
    pub identity_verifier: Option<Arc<dyn IdentityVerifier>>,
}

impl AppState {
    pub fn new(db: Arc<dyn Datastore>, config: AppConfig) -> Self {
        let identity_verifier = config
            .external
            .google_client_id
            .clone()
            .map(|client_id| {
                Arc::new(GoogleIdentityVerifier::new(
                    client_id,
                    config.external.google_tokeninfo_url.clone(),
                )) as Arc<dyn IdentityVerifier>
            });

        Self {
            db,
            config: Arc::new(config),
            identity_verifier,
        }
    }

    pub fn with_identity_verifier(mut self, verifier: Arc<dyn IdentityVerifier>) -> Self {
        self.identity_verifier = Some(verifier);
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("external_identity", &self.identity_verifier.is_some())
            .finish_non_exhaustive()
    }
}
