//! Wellspring Auth: identity token issuance/verification, password
//! verification, the bearer-token gateway, and the register / login
//! workflows.

pub mod config;
pub mod error;
pub mod gateway;
pub mod password;
pub mod service;
pub mod token;
pub mod validation;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthOutput, AuthService, LoginInput, RegisterInput};
pub use token::{Identity, IdentityClaims};
