//! Application state shared by all handlers.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use wellspring_auth::{AuthConfig, AuthService};
use wellspring_db::repository::{SurrealSessionRepository, SurrealUserRepository};
use wellspring_sessions::{CatalogService, SessionService};

pub type UserRepo = SurrealUserRepository<Any>;
pub type SessionRepo = SurrealSessionRepository<Any>;

/// Services wired over one database handle. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<UserRepo>>,
    pub sessions: Arc<SessionService<SessionRepo>>,
    pub catalog: Arc<CatalogService<SessionRepo, UserRepo>>,
}

impl AppState {
    pub fn new(db: Surreal<Any>, auth_config: AuthConfig) -> Self {
        let users = match auth_config.pepper.clone() {
            Some(pepper) => SurrealUserRepository::with_pepper(db.clone(), pepper),
            None => SurrealUserRepository::new(db.clone()),
        };
        let sessions = SurrealSessionRepository::new(db);

        Self {
            auth: Arc::new(AuthService::new(users.clone(), auth_config)),
            sessions: Arc::new(SessionService::new(sessions.clone())),
            catalog: Arc::new(CatalogService::new(sessions, users)),
        }
    }
}
