use rand::{Rng, distributions::Alphanumeric};
use tracing::{info, instrument, warn};

use coursehub_auth::{Identity, create_access_token};
use coursehub_config::JwtConfig;
use coursehub_core::errors::ErrorKind;
use coursehub_core::{AppError, hash_password, verify_password};
use coursehub_db::Datastore;
use coursehub_models::{NewUser, User, UserCredentials};

use super::identity::IdentityVerifier;
use super::model::{ExternalLoginRequest, LoginRequest, LoginResponse, RegisterRequest};
use crate::metrics::{
    track_jwt_issued, track_user_created, track_user_login_failure, track_user_login_success,
};

const GENERATED_PASSWORD_LEN: usize = 32;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password")
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(role = %dto.role))]
    pub async fn register_user(db: &dyn Datastore, dto: RegisterRequest) -> Result<User, AppError> {
        let email = normalize_email(&dto.email);

        if db.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!("Email already exists")));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = db
            .create_user(NewUser {
                email,
                password_hash,
                role: dto.role,
            })
            .await?;

        track_user_created(user.role.as_str());
        info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &dyn Datastore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(credentials) = db.find_user_by_email(&normalize_email(&dto.email)).await? else {
            track_user_login_failure("unknown_email");
            return Err(invalid_credentials());
        };

        if !verify_password(&dto.password, &credentials.password_hash)? {
            track_user_login_failure("wrong_password");
            warn!(user_id = %credentials.id, "Failed login attempt");
            return Err(invalid_credentials());
        }

        let response = Self::issue_login(credentials.into_user(), jwt_config)?;
        track_user_login_success(response.user.role.as_str(), "password");
        Ok(response)
    }

    /// Signs in with an external credential.
    ///
    /// The verified email is treated like a local one. A user seen for the first
    /// time is provisioned with a random password and the requested role; an
    /// existing user keeps the role chosen at registration.
    #[instrument(skip(db, verifier, dto, jwt_config))]
    pub async fn external_login(
        db: &dyn Datastore,
        verifier: Option<&dyn IdentityVerifier>,
        dto: ExternalLoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let verifier = verifier.ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("External sign-in is not configured"))
        })?;

        let external = match verifier.verify(&dto.credential).await {
            Ok(external) => external,
            Err(e) => {
                track_user_login_failure("external_rejected");
                return Err(e);
            }
        };
        let email = normalize_email(&external.email);

        let user = match db.find_user_by_email(&email).await? {
            Some(existing) => existing.into_user(),
            None => Self::provision_external_user(db, email, dto).await?,
        };

        let response = Self::issue_login(user, jwt_config)?;
        track_user_login_success(response.user.role.as_str(), "external");
        Ok(response)
    }

    async fn provision_external_user(
        db: &dyn Datastore,
        email: String,
        dto: ExternalLoginRequest,
    ) -> Result<User, AppError> {
        let random_password: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_PASSWORD_LEN)
            .map(char::from)
            .collect();
        let password_hash = hash_password(&random_password)?;

        match db
            .create_user(NewUser {
                email: email.clone(),
                password_hash,
                role: dto.role,
            })
            .await
        {
            Ok(user) => {
                track_user_created(user.role.as_str());
                info!(user_id = %user.id, "Provisioned user from external identity");
                Ok(user)
            }
            // Concurrent first sign-in; the other request created the account.
            Err(e) if e.kind() == ErrorKind::Conflict => db
                .find_user_by_email(&email)
                .await?
                .map(UserCredentials::into_user)
                .ok_or_else(|| AppError::internal_error("User vanished after conflict")),
            Err(e) => Err(e),
        }
    }

    fn issue_login(user: User, jwt_config: &JwtConfig) -> Result<LoginResponse, AppError> {
        let token = create_access_token(Identity::new(user.id, user.role), jwt_config)?;
        track_jwt_issued();

        Ok(LoginResponse {
            message: "Logged in successfully".to_string(),
            token,
            user,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_current_user(db: &dyn Datastore, identity: Identity) -> Result<User, AppError> {
        db.find_user_by_id(identity.id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}
