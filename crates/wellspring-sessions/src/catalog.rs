//! Public catalog of published sessions.

use std::collections::HashMap;

use uuid::Uuid;
use wellspring_core::error::{WellspringError, WellspringResult};
use wellspring_core::models::session::SessionView;
use wellspring_core::repository::{SessionRepository, UserRepository};

/// Read-only listing of published sessions, each joined with its
/// owner's email. No authentication or ownership applies.
pub struct CatalogService<S: SessionRepository, U: UserRepository> {
    session_repo: S,
    user_repo: U,
}

impl<S: SessionRepository, U: UserRepository> CatalogService<S, U> {
    pub fn new(session_repo: S, user_repo: U) -> Self {
        Self {
            session_repo,
            user_repo,
        }
    }

    /// Published sessions, newest first. A session whose owner no
    /// longer exists is listed without an email.
    pub async fn list_published(&self) -> WellspringResult<Vec<SessionView>> {
        let sessions = self.session_repo.list_published().await?;

        let mut emails: HashMap<Uuid, Option<String>> = HashMap::new();
        let mut views = Vec::with_capacity(sessions.len());

        for session in sessions {
            let email = match emails.get(&session.owner_id) {
                Some(cached) => cached.clone(),
                None => {
                    let email = match self.user_repo.get_by_id(session.owner_id).await {
                        Ok(user) => Some(user.email),
                        Err(WellspringError::NotFound { .. }) => None,
                        Err(e) => return Err(e),
                    };
                    emails.insert(session.owner_id, email.clone());
                    email
                }
            };
            views.push(SessionView::from_session(session, email));
        }

        Ok(views)
    }
}
