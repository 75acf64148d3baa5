//! Wellspring Server: HTTP API over the auth and session services.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::AppState;
