//! Wellness session domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a session. The only transition is
/// `Draft -> Published`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Draft,
    Published,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Draft => "draft",
            SessionStatus::Published => "published",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(SessionStatus::Draft),
            "published" => Ok(SessionStatus::Published),
            other => Err(format!("unknown session status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    /// Set at creation, never changed.
    pub owner_id: Uuid,
    pub title: String,
    pub tags: Vec<String>,
    pub json_file_url: String,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    pub owner_id: Uuid,
    pub title: String,
    pub tags: Vec<String>,
    pub json_file_url: String,
}

/// Partial update; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateSession {
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub json_file_url: Option<String>,
}

/// A published session as shown in the public catalog, joined with
/// the owner's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub id: Uuid,
    pub title: String,
    pub tags: Vec<String>,
    pub json_file_url: String,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub user_email: Option<String>,
}

impl SessionView {
    pub fn from_session(session: Session, user_email: Option<String>) -> Self {
        Self {
            id: session.id,
            title: session.title,
            tags: session.tags,
            json_file_url: session.json_file_url,
            status: session.status,
            created_at: session.created_at,
            updated_at: session.updated_at,
            published_at: session.published_at,
            user_email,
        }
    }
}
