//! Wellspring Client: typed access to the HTTP API plus the draft
//! auto-save used by editors.

pub mod autosave;
pub mod client;
pub mod editor;
pub mod error;

pub use autosave::AutoSave;
pub use client::{ApiClient, AuthSession, AuthUser, SaveDraftRequest, UpdateSessionRequest};
pub use editor::{Draft, DraftEditor, SaveStatus};
pub use error::{ClientError, ClientResult};
