use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{api::AppState, error::AppError};

/// Middleware guarding every endpoint except the public health check.
///
/// Callers must present `Authorization: Bearer <token>` matching the
/// configured API token. Missing or invalid credentials answer 401 with a
/// JSON error body, never a 500.
pub async fn require_bearer_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match bearer {
        Some(token) if token == state.api_token => Ok(next.run(request).await),
        Some(_) => Err(AppError::Unauthorized("Invalid API token".to_string())),
        None => Err(AppError::Unauthorized(
            "Authentication required".to_string(),
        )),
    }
}
