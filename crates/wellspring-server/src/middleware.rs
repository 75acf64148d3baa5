//! Bearer-token authentication for the protected routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Verify the `Authorization: Bearer` token and attach the resulting
/// [`Identity`](wellspring_auth::Identity) to the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let identity = state.auth.authenticate(header)?;
    tracing::debug!(user_id = %identity.user_id, "Authenticated request");

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
