use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the shared admin secret
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Shared-secret gate for the admin routes.
///
/// Short-circuits with 401 when the header is absent or does not match the
/// configured key; the handler never runs in that case.
pub async fn require_admin_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if !authorize(state.admin_api_key(), provided) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            header_present = provided.is_some(),
            "Rejected admin request"
        );
        return Err(ApiError::unauthorized("Acceso no autorizado."));
    }

    Ok(next.run(request).await)
}

/// Exact, case-sensitive match in constant time (length differences still return early)
pub fn authorize(expected: &str, provided: Option<&str>) -> bool {
    match provided {
        Some(provided) if !expected.is_empty() => {
            bool::from(provided.as_bytes().ct_eq(expected.as_bytes()))
        }
        _ => false,
    }
}
