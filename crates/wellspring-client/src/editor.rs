//! In-progress draft with auto-save.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Mutex as SaveLock;
use uuid::Uuid;
use wellspring_core::models::session::Session;

use crate::autosave::AutoSave;
use crate::client::{ApiClient, SaveDraftRequest};
use crate::error::ClientResult;

/// Editable fields of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Unset until the first save creates the session.
    pub session_id: Option<Uuid>,
    pub title: String,
    pub tags: Vec<String>,
    pub json_file_url: String,
}

impl Draft {
    fn request(&self) -> SaveDraftRequest {
        SaveDraftRequest {
            session_id: self.session_id,
            title: self.title.clone(),
            tags: self.tags.clone(),
            json_file_url: self.json_file_url.clone(),
        }
    }
}

impl From<&Session> for Draft {
    fn from(session: &Session) -> Self {
        Self {
            session_id: Some(session.id),
            title: session.title.clone(),
            tags: session.tags.clone(),
            json_file_url: session.json_file_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Failed(String),
}

#[derive(Debug)]
struct EditorState {
    draft: Draft,
    status: SaveStatus,
}

/// Holds a draft and saves it after each pause in editing.
///
/// Manual and automatic saves both go through
/// [`ApiClient::save_draft`]. An edit that leaves the title blank
/// disarms the timer instead of arming it.
///
/// Saves run one at a time, so a save started while another is in
/// flight sends the session id the first one recorded.
pub struct DraftEditor {
    client: ApiClient,
    state: Arc<Mutex<EditorState>>,
    save_lock: Arc<SaveLock<()>>,
    autosave: AutoSave,
}

impl DraftEditor {
    /// Start a new, unsaved draft.
    pub fn new(client: ApiClient) -> Self {
        Self::with_delay(client, Draft::default(), crate::autosave::DEFAULT_DELAY)
    }

    /// Edit an existing session.
    pub fn open(client: ApiClient, session: &Session) -> Self {
        Self::with_delay(client, session.into(), crate::autosave::DEFAULT_DELAY)
    }

    pub fn with_delay(client: ApiClient, draft: Draft, delay: Duration) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(EditorState {
                draft,
                status: SaveStatus::Idle,
            })),
            save_lock: Arc::new(SaveLock::new(())),
            autosave: AutoSave::new(delay),
        }
    }

    pub fn draft(&self) -> Draft {
        self.state.lock().draft.clone()
    }

    pub fn status(&self) -> SaveStatus {
        self.state.lock().status.clone()
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.state.lock().draft.session_id
    }

    pub fn is_pending(&self) -> bool {
        self.autosave.is_armed()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.edit(|draft| draft.title = title.into());
    }

    pub fn set_tags(&self, tags: Vec<String>) {
        self.edit(|draft| draft.tags = tags);
    }

    pub fn set_json_file_url(&self, url: impl Into<String>) {
        self.edit(|draft| draft.json_file_url = url.into());
    }

    fn edit(&self, apply: impl FnOnce(&mut Draft)) {
        let blank_title = {
            let mut state = self.state.lock();
            apply(&mut state.draft);
            state.draft.title.trim().is_empty()
        };

        if blank_title {
            self.autosave.cancel();
            return;
        }

        let client = self.client.clone();
        let state = self.state.clone();
        let save_lock = self.save_lock.clone();
        self.autosave.touch(move || async move {
            // Failures are recorded in the status; the next edit retries.
            let _ = save_draft(&client, &state, &save_lock).await;
        });
    }

    /// Save immediately, disarming any pending auto-save.
    pub async fn save(&self) -> ClientResult<Session> {
        self.autosave.cancel();
        save_draft(&self.client, &self.state, &self.save_lock).await
    }
}

async fn save_draft(
    client: &ApiClient,
    state: &Mutex<EditorState>,
    save_lock: &SaveLock<()>,
) -> ClientResult<Session> {
    // Held across the request; the draft is read only once it is ours.
    let _guard = save_lock.lock().await;
    let request = {
        let mut state = state.lock();
        state.status = SaveStatus::Saving;
        state.draft.request()
    };

    match client.save_draft(&request).await {
        Ok(session) => {
            let mut state = state.lock();
            state.draft.session_id.get_or_insert(session.id);
            state.status = SaveStatus::Saved;
            tracing::debug!(session_id = %session.id, "Draft saved");
            Ok(session)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Draft save failed");
            state.lock().status = SaveStatus::Failed(e.to_string());
            Err(e)
        }
    }
}
