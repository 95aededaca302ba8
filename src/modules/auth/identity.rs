//! External identity verification.
//!
//! An [`IdentityVerifier`] turns an opaque credential issued by a third-party
//! provider into a verified email. The only production implementation checks
//! Google ID tokens against the tokeninfo endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{instrument, warn};

use coursehub_core::AppError;

/// A verified identity asserted by an external provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub email: String,
    pub external_id: String,
    pub name: Option<String>,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Fails with 401 when the provider rejects the credential.
    async fn verify(&self, credential: &str) -> Result<ExternalIdentity, AppError>;
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: Option<String>,
    // tokeninfo encodes booleans as strings
    email_verified: Option<String>,
    name: Option<String>,
}

pub struct GoogleIdentityVerifier {
    client: reqwest::Client,
    client_id: String,
    tokeninfo_url: String,
}

impl GoogleIdentityVerifier {
    pub fn new(client_id: String, tokeninfo_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
            tokeninfo_url,
        }
    }
}

fn rejected() -> AppError {
    AppError::unauthorized("Invalid external credential")
}

fn check_token_info(info: TokenInfo, client_id: &str) -> Result<ExternalIdentity, AppError> {
    if info.aud != client_id {
        warn!(aud = %info.aud, "External credential issued for another client");
        return Err(rejected());
    }
    if info.email_verified.as_deref() != Some("true") {
        return Err(rejected());
    }
    let email = info.email.ok_or_else(rejected)?;

    Ok(ExternalIdentity {
        email,
        external_id: info.sub,
        name: info.name,
    })
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    #[instrument(skip(self, credential))]
    async fn verify(&self, credential: &str) -> Result<ExternalIdentity, AppError> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(AppError::internal)?;

        if !response.status().is_success() {
            return Err(rejected());
        }

        let info: TokenInfo = response.json().await.map_err(|_| rejected())?;
        check_token_info(info, &self.client_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_info(aud: &str, verified: Option<&str>, email: Option<&str>) -> TokenInfo {
        TokenInfo {
            aud: aud.to_string(),
            sub: "1098".to_string(),
            email: email.map(str::to_string),
            email_verified: verified.map(str::to_string),
            name: Some("Ada".to_string()),
        }
    }

    #[test]
    fn test_accepts_verified_email_for_our_client() {
        let identity =
            check_token_info(token_info("client-1", Some("true"), Some("a@x.io")), "client-1")
                .unwrap();
        assert_eq!(identity.email, "a@x.io");
        assert_eq!(identity.external_id, "1098");
    }

    #[test]
    fn test_rejects_other_audience() {
        let err = check_token_info(token_info("other", Some("true"), Some("a@x.io")), "client-1")
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_rejects_unverified_or_missing_email() {
        assert!(
            check_token_info(token_info("client-1", Some("false"), Some("a@x.io")), "client-1")
                .is_err()
        );
        assert!(check_token_info(token_info("client-1", None, Some("a@x.io")), "client-1").is_err());
        assert!(check_token_info(token_info("client-1", Some("true"), None), "client-1").is_err());
    }
}
