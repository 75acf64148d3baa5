//! Session lifecycle manager.

use tracing::debug;
use uuid::Uuid;
use wellspring_core::error::{WellspringError, WellspringResult};
use wellspring_core::models::session::{CreateSession, Session, UpdateSession};
use wellspring_core::repository::SessionRepository;

use crate::validation;

/// Input for the save-draft flow. Without `session_id` a new draft is
/// created; with one, the owner's existing session is overwritten.
#[derive(Debug, Clone, Default)]
pub struct SaveDraftInput {
    pub session_id: Option<Uuid>,
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub json_file_url: Option<String>,
}

/// Parse a client-supplied session id. An id that is not a UUID cannot
/// name a stored session, so it is reported as not found.
pub fn parse_session_id(raw: &str) -> WellspringResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| WellspringError::not_found("session", raw))
}

/// Owner-scoped operations on wellness sessions.
pub struct SessionService<S: SessionRepository> {
    session_repo: S,
}

impl<S: SessionRepository> SessionService<S> {
    pub fn new(session_repo: S) -> Self {
        Self { session_repo }
    }

    /// Fetch `id` and check it belongs to `owner_id`.
    ///
    /// A session owned by someone else yields the same `NotFound` as a
    /// missing one.
    async fn owned(&self, owner_id: Uuid, id: Uuid) -> WellspringResult<Session> {
        let session = self.session_repo.get_by_id(id).await?;
        if session.owner_id != owner_id {
            debug!(session_id = %id, "Session belongs to another owner");
            return Err(WellspringError::not_found("session", id));
        }
        Ok(session)
    }

    /// Create a new draft, or overwrite the caller's existing session.
    pub async fn save_draft(
        &self,
        owner_id: Uuid,
        input: SaveDraftInput,
    ) -> WellspringResult<Session> {
        validation::validate_draft(
            input.title.as_deref(),
            input.tags.as_deref(),
            input.json_file_url.as_deref(),
        )?;

        let title = input.title.unwrap_or_default().trim().to_string();
        let tags = input.tags.unwrap_or_default();
        let json_file_url = input.json_file_url.unwrap_or_default();

        match input.session_id {
            Some(id) => {
                self.owned(owner_id, id).await?;
                let session = self
                    .session_repo
                    .update(
                        id,
                        UpdateSession {
                            title: Some(title),
                            tags: Some(tags),
                            json_file_url: Some(json_file_url),
                        },
                    )
                    .await?;
                debug!(session_id = %id, "Draft saved");
                Ok(session)
            }
            None => {
                let session = self
                    .session_repo
                    .create(CreateSession {
                        owner_id,
                        title,
                        tags,
                        json_file_url,
                    })
                    .await?;
                debug!(session_id = %session.id, "Draft created");
                Ok(session)
            }
        }
    }

    /// Publish the caller's session. Re-publishing only refreshes the
    /// timestamps.
    pub async fn publish(&self, owner_id: Uuid, id: Uuid) -> WellspringResult<Session> {
        self.owned(owner_id, id).await?;
        let session = self.session_repo.mark_published(id).await?;
        debug!(session_id = %id, "Session published");
        Ok(session)
    }

    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> WellspringResult<Session> {
        self.owned(owner_id, id).await
    }

    /// Partial edit. Unlike [`save_draft`](Self::save_draft) an empty
    /// title is accepted; only the supplied fields are written.
    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        mut input: UpdateSession,
    ) -> WellspringResult<Session> {
        validation::validate_update(&input)?;
        self.owned(owner_id, id).await?;

        input.title = input.title.map(|t| t.trim().to_string());
        self.session_repo.update(id, input).await
    }

    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> WellspringResult<()> {
        self.owned(owner_id, id).await?;
        self.session_repo.delete(id).await?;
        debug!(session_id = %id, "Session deleted");
        Ok(())
    }

    /// Every session of the caller, drafts included, most recently
    /// updated first.
    pub async fn list_mine(&self, owner_id: Uuid) -> WellspringResult<Vec<Session>> {
        self.session_repo.list_by_owner(owner_id).await
    }
}
