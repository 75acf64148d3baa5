//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Lookups of a missing record
//! return [`WellspringError::NotFound`](crate::error::WellspringError::NotFound).
//! Ownership is not enforced here; that is the lifecycle manager's job.

use uuid::Uuid;

use crate::error::WellspringResult;
use crate::models::{
    session::{CreateSession, Session, UpdateSession},
    user::{CreateUser, UpdateUser, User},
};

// ---------------------------------------------------------------------------
// Credential store
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    /// Fails with `AlreadyExists` if the (lower-cased) email is taken.
    fn create(&self, input: CreateUser) -> impl Future<Output = WellspringResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = WellspringResult<User>> + Send;
    /// Case-insensitive lookup.
    fn get_by_email(&self, email: &str) -> impl Future<Output = WellspringResult<User>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = WellspringResult<User>> + Send;
}

// ---------------------------------------------------------------------------
// Session store
// ---------------------------------------------------------------------------

pub trait SessionRepository: Send + Sync {
    /// Creates the session in `draft` status.
    fn create(
        &self,
        input: CreateSession,
    ) -> impl Future<Output = WellspringResult<Session>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = WellspringResult<Session>> + Send;
    /// Writes only the supplied fields and stamps `updated_at`.
    fn update(
        &self,
        id: Uuid,
        input: UpdateSession,
    ) -> impl Future<Output = WellspringResult<Session>> + Send;
    /// Sets `status = published` and stamps `published_at` and
    /// `updated_at`.
    fn mark_published(&self, id: Uuid) -> impl Future<Output = WellspringResult<Session>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = WellspringResult<()>> + Send;
    /// All sessions of one owner, most recently updated first.
    fn list_by_owner(
        &self,
        owner_id: Uuid,
    ) -> impl Future<Output = WellspringResult<Vec<Session>>> + Send;
    /// All published sessions, newest first.
    fn list_published(&self) -> impl Future<Output = WellspringResult<Vec<Session>>> + Send;
}
