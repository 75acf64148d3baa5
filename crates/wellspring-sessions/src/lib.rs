//! Wellspring Sessions: the session lifecycle manager and the public
//! catalog of published sessions.
//!
//! Every owner-facing operation goes through a single owner-scoped
//! lookup, so a session owned by someone else is reported exactly like
//! one that does not exist.

pub mod catalog;
pub mod service;
pub mod validation;

pub use catalog::CatalogService;
pub use service::{SaveDraftInput, SessionService, parse_session_id};
