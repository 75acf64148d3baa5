//! Authentication service: register, login and identity checks.

use chrono::Utc;
use tracing::{info, warn};
use wellspring_core::error::{WellspringError, WellspringResult};
use wellspring_core::models::user::{CreateUser, UpdateUser, User};
use wellspring_core::repository::UserRepository;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::gateway;
use crate::password;
use crate::token::{self, Identity};
use crate::validation;

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful register or login result.
#[derive(Debug)]
pub struct AuthOutput {
    /// Signed identity token.
    pub token: String,
    pub user: User,
}

/// Authentication service.
///
/// Generic over the repository implementation so that the auth layer
/// has no dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    fn require_fields(email: &str, password: &str) -> WellspringResult<()> {
        if email.is_empty() || password.is_empty() {
            return Err(WellspringError::validation(
                "Email and password are required",
            ));
        }
        if !validation::is_valid_email(email) {
            return Err(WellspringError::validation("Invalid email format"));
        }
        Ok(())
    }

    /// Create an account and issue a token for it.
    pub async fn register(&self, input: RegisterInput) -> WellspringResult<AuthOutput> {
        Self::require_fields(&input.email, &input.password)?;
        validation::check_password(&input.password, self.config.min_password_length)
            .map_err(WellspringError::validation)?;

        let email = input.email.to_lowercase();

        // Early duplicate check; the unique index still guards races.
        match self.user_repo.get_by_email(&email).await {
            Ok(_) => {
                return Err(WellspringError::AlreadyExists {
                    entity: "user".into(),
                });
            }
            Err(WellspringError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let user = self
            .user_repo
            .create(CreateUser {
                email,
                password: input.password,
            })
            .await?;

        let token = token::issue_token(user.id, &user.email, &self.config)?;
        info!(user_id = %user.id, "Registered user");

        Ok(AuthOutput { token, user })
    }

    /// Authenticate with email + password and issue a token.
    ///
    /// Unknown email and wrong password fail with the same
    /// `AuthenticationFailed` error.
    pub async fn login(&self, input: LoginInput) -> WellspringResult<AuthOutput> {
        Self::require_fields(&input.email, &input.password)?;

        // 1. Look up user.
        let user = match self.user_repo.get_by_email(&input.email).await {
            Ok(u) => u,
            Err(WellspringError::NotFound { .. }) => {
                warn!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        // 2. Verify password.
        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;

        if !valid {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Record the login.
        let user = self
            .user_repo
            .update(
                user.id,
                UpdateUser {
                    last_login: Some(Utc::now()),
                },
            )
            .await?;

        // 4. Issue token.
        let token = token::issue_token(user.id, &user.email, &self.config)?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthOutput { token, user })
    }

    /// Resolve the caller's identity from an `Authorization` header.
    pub fn authenticate(&self, authorization: Option<&str>) -> WellspringResult<Identity> {
        gateway::authenticate(authorization, &self.config)
    }

    /// Load the user behind a verified identity.
    ///
    /// Stricter than [`authenticate`](Self::authenticate): a token whose
    /// user has since disappeared is rejected.
    pub async fn current_user(&self, identity: &Identity) -> WellspringResult<User> {
        match self.user_repo.get_by_id(identity.user_id).await {
            Ok(user) => Ok(user),
            Err(WellspringError::NotFound { .. }) => {
                Err(WellspringError::unauthenticated("User not found"))
            }
            Err(e) => Err(e),
        }
    }
}
