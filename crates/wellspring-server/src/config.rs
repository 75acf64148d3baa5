//! Server configuration.

use serde::Deserialize;
use wellspring_auth::AuthConfig;
use wellspring_db::DbConfig;

/// Configuration loaded from environment variables prefixed with
/// `WELLSPRING_`:
/// - `WELLSPRING_HOST`: bind address (default: "0.0.0.0")
/// - `WELLSPRING_PORT`: port (default: 3000)
/// - `WELLSPRING_JWT_SECRET`: token signing secret (required to issue tokens)
/// - `WELLSPRING_TOKEN_LIFETIME_SECS`: token lifetime (default: 7 days)
/// - `WELLSPRING_PEPPER`: optional password pepper
/// - `WELLSPRING_DB_URL`: SurrealDB endpoint (default: "mem://")
/// - `WELLSPRING_DB_NAMESPACE`, `WELLSPRING_DB_DATABASE`
/// - `WELLSPRING_DB_USERNAME`, `WELLSPRING_DB_PASSWORD`: optional root credentials
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub jwt_secret: Option<String>,

    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_secs: u64,

    #[serde(default)]
    pub pepper: Option<String>,

    #[serde(default = "default_db_url")]
    pub db_url: String,

    #[serde(default = "default_db_namespace")]
    pub db_namespace: String,

    #[serde(default = "default_db_database")]
    pub db_database: String,

    #[serde(default)]
    pub db_username: Option<String>,

    #[serde(default)]
    pub db_password: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_token_lifetime() -> u64 {
    AuthConfig::default().token_lifetime_secs
}

fn default_db_url() -> String {
    DbConfig::default().url
}

fn default_db_namespace() -> String {
    DbConfig::default().namespace
}

fn default_db_database() -> String {
    DbConfig::default().database
}

impl ServerConfig {
    /// Load configuration from `WELLSPRING_*` environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from `(name, value)` pairs. A variable that
    /// fails to parse is an error; nothing falls back to defaults.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("WELLSPRING_").from_iter::<_, ServerConfig>(vars)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            token_lifetime_secs: self.token_lifetime_secs,
            pepper: self.pepper.clone(),
            ..AuthConfig::default()
        }
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.db_url.clone(),
            namespace: self.db_namespace.clone(),
            database: self.db_database.clone(),
            username: self.db_username.clone(),
            password: self.db_password.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            jwt_secret: None,
            token_lifetime_secs: default_token_lifetime(),
            pepper: None,
            db_url: default_db_url(),
            db_namespace: default_db_namespace(),
            db_database: default_db_database(),
            db_username: None,
            db_password: None,
        }
    }
}
