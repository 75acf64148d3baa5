//! Registration, login and token verification endpoints.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wellspring_auth::{Identity, LoginInput, RegisterInput};
use wellspring_core::models::user::User;

use super::ApiJson;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of a user; never includes the password hash.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub user: UserProfile,
}

/// `POST /auth/register`
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CredentialsRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let out = state
        .auth
        .register(RegisterInput {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        success: true,
        token: out.token,
        user: out.user.into(),
    }))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CredentialsRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let out = state
        .auth
        .login(LoginInput {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        success: true,
        token: out.token,
        user: out.user.into(),
    }))
}

/// `GET /auth/verify`
///
/// Unlike the other protected routes, this re-checks that the user
/// still exists.
pub async fn verify(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<VerifyResponse>> {
    let user = state.auth.current_user(&identity).await?;
    Ok(Json(VerifyResponse {
        success: true,
        user: user.into(),
    }))
}
