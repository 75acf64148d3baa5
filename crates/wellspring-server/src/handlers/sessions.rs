//! Session endpoints: the public catalog and the caller's own sessions.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use wellspring_auth::Identity;
use wellspring_core::error::WellspringError;
use wellspring_core::models::session::{Session, SessionView, UpdateSession};
use wellspring_sessions::{SaveDraftInput, parse_session_id};

use super::ApiJson;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub json_file_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub json_file_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse<T> {
    pub success: bool,
    pub sessions: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub session: Session,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

fn session_response(session: Session) -> Json<SessionResponse> {
    Json(SessionResponse {
        success: true,
        session,
    })
}

/// `GET /sessions`: published sessions, no authentication.
pub async fn list_published(
    State(state): State<AppState>,
) -> ApiResult<Json<SessionListResponse<SessionView>>> {
    let sessions = state.catalog.list_published().await?;
    Ok(Json(SessionListResponse {
        success: true,
        sessions,
    }))
}

/// `GET /my-sessions`
pub async fn list_mine(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<SessionListResponse<Session>>> {
    let sessions = state.sessions.list_mine(identity.user_id).await?;
    Ok(Json(SessionListResponse {
        success: true,
        sessions,
    }))
}

/// `POST /my-sessions/save-draft`
///
/// Manual saves and client auto-saves both land here.
pub async fn save_draft(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ApiJson(request): ApiJson<SaveDraftRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let session_id = match request.session_id.as_deref() {
        Some(raw) if !raw.is_empty() => Some(parse_session_id(raw)?),
        _ => None,
    };

    let session = state
        .sessions
        .save_draft(
            identity.user_id,
            SaveDraftInput {
                session_id,
                title: request.title,
                tags: request.tags,
                json_file_url: request.json_file_url,
            },
        )
        .await?;

    Ok(session_response(session))
}

/// `POST /my-sessions/publish`
pub async fn publish(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ApiJson(request): ApiJson<PublishRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let raw = request
        .session_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| WellspringError::validation("Session ID is required"))?;

    let session = state
        .sessions
        .publish(identity.user_id, parse_session_id(&raw)?)
        .await?;

    Ok(session_response(session))
}

/// `GET /my-sessions/{id}`
pub async fn get_session(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state
        .sessions
        .get(identity.user_id, parse_session_id(&id)?)
        .await?;
    Ok(session_response(session))
}

/// `PUT /my-sessions/{id}`
pub async fn update_session(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateSessionRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state
        .sessions
        .update(
            identity.user_id,
            parse_session_id(&id)?,
            UpdateSession {
                title: request.title,
                tags: request.tags,
                json_file_url: request.json_file_url,
            },
        )
        .await?;
    Ok(session_response(session))
}

/// `DELETE /my-sessions/{id}`
pub async fn delete_session(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .sessions
        .delete(identity.user_id, parse_session_id(&id)?)
        .await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Session deleted successfully".into(),
    }))
}
