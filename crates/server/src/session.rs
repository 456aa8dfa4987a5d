use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use service::errors::ServiceError;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Gate for mutating routes: resolves the caller from the request headers and
/// stores it as a `CallerIdentity` extension, or answers 401.
pub async fn require_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(caller) = state.sessions.resolve(req.headers()) else {
        debug!(path = %req.uri().path(), "no session on protected route");
        return Err(ServiceError::Unauthenticated.into());
    };
    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}
