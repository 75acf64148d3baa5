//! Authentication configuration.

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing identity tokens. Token issuance fails
    /// with a configuration error while this is unset.
    pub jwt_secret: Option<String>,
    /// Identity token lifetime in seconds (default: 604_800 = 7 days).
    pub token_lifetime_secs: u64,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Optional pepper prepended to passwords before Argon2id
    /// verification.
    pub pepper: Option<String>,
    /// Minimum password length accepted at registration.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_lifetime_secs: 604_800,
            jwt_issuer: "wellspring".into(),
            pepper: None,
            min_password_length: 6,
        }
    }
}

impl AuthConfig {
    /// Default configuration with the given signing secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Some(secret.into()),
            ..Self::default()
        }
    }
}
