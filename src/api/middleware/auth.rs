//! Bearer token authentication middleware.
//!
//! Two modes: `auth_middleware` rejects requests without a valid token,
//! `optional_auth_middleware` lets them through as anonymous.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_SCHEME;
use crate::errors::{AppError, AppResult};
use crate::services::AuthService;

/// Authenticated user extracted from the session token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
}

/// Extract the token from an `Authorization` header value.
///
/// The header is split on its first space and the scheme compared to
/// `Bearer` ignoring case.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() {
        return None;
    }
    Some(token)
}

/// Resolve the caller, failing when the header is missing or the token
/// does not verify.
pub fn required_identity(auth: &dyn AuthService, headers: &HeaderMap) -> AppResult<CurrentUser> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = bearer_token(header).ok_or(AppError::Unauthorized)?;
    let id = auth.verify_token(token)?;

    Ok(CurrentUser { id })
}

/// Resolve the caller if possible. Any failure means anonymous.
pub fn optional_identity(auth: &dyn AuthService, headers: &HeaderMap) -> Option<CurrentUser> {
    match required_identity(auth, headers) {
        Ok(user) => Some(user),
        Err(AppError::Unauthorized) => None,
        Err(e) => {
            tracing::debug!("Ignoring bearer token on optional route: {}", e);
            None
        }
    }
}

/// Required authentication middleware.
///
/// Injects `CurrentUser` into the request extensions or responds 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current_user = required_identity(state.auth_service.as_ref(), request.headers())?;
    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Optional authentication middleware.
///
/// Injects `CurrentUser` only when a valid token is present; never fails.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(current_user) = optional_identity(state.auth_service.as_ref(), request.headers()) {
        request.extensions_mut().insert(current_user);
    }

    next.run(request).await
}
