//! HTTP client for the Wellspring API.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wellspring_core::models::session::{Session, SessionView};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: AuthUser,
}

/// Body of `POST /my-sessions/save-draft`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SaveDraftRequest {
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    pub title: String,
    pub tags: Vec<String>,
    pub json_file_url: String,
}

/// Body of `PUT /my-sessions/{id}`. Unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_file_url: Option<String>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: AuthUser,
}

#[derive(Deserialize)]
struct SessionEnvelope {
    session: Session,
}

#[derive(Deserialize)]
struct SessionsEnvelope<T> {
    sessions: Vec<T>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Cloneable API client. Clones share the bearer token, so a login on
/// one handle authenticates all of them.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Fails only if the HTTP client cannot be built, e.g. when the TLS
    /// backend does not initialize.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Forget the bearer token (client-side logout).
    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.token.read().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            tracing::debug!(status = status.as_u16(), %message, "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn authenticate(&self, path: &str, email: &str, password: &str) -> ClientResult<AuthSession> {
        let session: AuthSession = self
            .send(
                self.request(Method::POST, path)
                    .json(&serde_json::json!({ "email": email, "password": password })),
            )
            .await?;
        self.set_token(session.token.clone());
        Ok(session)
    }

    /// `POST /auth/register`; keeps the returned token.
    pub async fn register(&self, email: &str, password: &str) -> ClientResult<AuthSession> {
        self.authenticate("/auth/register", email, password).await
    }

    /// `POST /auth/login`; keeps the returned token.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthSession> {
        self.authenticate("/auth/login", email, password).await
    }

    /// `GET /auth/verify`
    pub async fn verify(&self) -> ClientResult<AuthUser> {
        let envelope: UserEnvelope = self.send(self.request(Method::GET, "/auth/verify")).await?;
        Ok(envelope.user)
    }

    /// `GET /sessions`
    pub async fn list_published(&self) -> ClientResult<Vec<SessionView>> {
        let envelope: SessionsEnvelope<SessionView> =
            self.send(self.request(Method::GET, "/sessions")).await?;
        Ok(envelope.sessions)
    }

    /// `GET /my-sessions`
    pub async fn my_sessions(&self) -> ClientResult<Vec<Session>> {
        let envelope: SessionsEnvelope<Session> =
            self.send(self.request(Method::GET, "/my-sessions")).await?;
        Ok(envelope.sessions)
    }

    /// `POST /my-sessions/save-draft`
    pub async fn save_draft(&self, draft: &SaveDraftRequest) -> ClientResult<Session> {
        let envelope: SessionEnvelope = self
            .send(self.request(Method::POST, "/my-sessions/save-draft").json(draft))
            .await?;
        Ok(envelope.session)
    }

    /// `POST /my-sessions/publish`
    pub async fn publish(&self, session_id: Uuid) -> ClientResult<Session> {
        let envelope: SessionEnvelope = self
            .send(
                self.request(Method::POST, "/my-sessions/publish")
                    .json(&serde_json::json!({ "sessionId": session_id })),
            )
            .await?;
        Ok(envelope.session)
    }

    /// `GET /my-sessions/{id}`
    pub async fn get_session(&self, session_id: Uuid) -> ClientResult<Session> {
        let envelope: SessionEnvelope = self
            .send(self.request(Method::GET, &format!("/my-sessions/{session_id}")))
            .await?;
        Ok(envelope.session)
    }

    /// `PUT /my-sessions/{id}`
    pub async fn update_session(
        &self,
        session_id: Uuid,
        update: &UpdateSessionRequest,
    ) -> ClientResult<Session> {
        let envelope: SessionEnvelope = self
            .send(
                self.request(Method::PUT, &format!("/my-sessions/{session_id}"))
                    .json(update),
            )
            .await?;
        Ok(envelope.session)
    }

    /// `DELETE /my-sessions/{id}`
    pub async fn delete_session(&self, session_id: Uuid) -> ClientResult<()> {
        let _: serde_json::Value = self
            .send(self.request(Method::DELETE, &format!("/my-sessions/{session_id}")))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn token_is_shared_between_clones() {
        let client = ApiClient::new("http://localhost:3000").unwrap();
        let other = client.clone();
        client.set_token("abc");
        assert_eq!(other.token().as_deref(), Some("abc"));
        other.clear_token();
        assert!(client.token().is_none());
    }

    #[test]
    fn save_draft_request_omits_missing_id() {
        let body = serde_json::to_value(SaveDraftRequest {
            title: "Calm".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(body.get("sessionId").is_none());
        assert_eq!(body["tags"], serde_json::json!([]));

        let id = Uuid::new_v4();
        let body = serde_json::to_value(SaveDraftRequest {
            session_id: Some(id),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body["sessionId"], id.to_string());
    }

    #[test]
    fn update_request_skips_unset_fields() {
        let body = serde_json::to_value(UpdateSessionRequest {
            tags: Some(vec!["yoga".into()]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "tags": ["yoga"] }));
    }
}
