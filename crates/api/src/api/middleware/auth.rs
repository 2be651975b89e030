//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::extractors::bearer_token;
use crate::api::AppState;
use common::AppError;

/// Authenticated caller, inserted into request extensions.
#[derive(Clone, Copy, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
}

/// Rejects the request with 401 unless it carries a valid bearer token,
/// then makes the caller available as `Extension<CurrentUser>`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let id = state.auth_service.authenticate(token)?;

    request.extensions_mut().insert(CurrentUser { id });

    Ok(next.run(request).await)
}
