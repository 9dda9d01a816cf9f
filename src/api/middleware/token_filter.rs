//! Request filter that admits only requests carrying a valid token
//!
//! Expects the token in `Authorization` (a leading `Bearer ` is optional) and the
//! identity it was issued to in the `userId` header. Paths on the allow-list are
//! forwarded untouched.

use std::collections::HashSet;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Header carrying the identity the token must belong to
pub const USER_ID_HEADER: &str = "userid";

const BEARER_PREFIX: &str = "Bearer ";

pub const MISSING_TOKEN_MESSAGE: &str = "token is missing, please log in";
pub const INVALID_TOKEN_MESSAGE: &str = "token is invalid or expired, please log in again";

/// Paths exempt from the token filter, matched exactly
#[derive(Debug, Clone)]
pub struct PublicPaths(HashSet<String>);

impl PublicPaths {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self::new(["/login"])
    }
}

/// Identity of a request that passed the token filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized(MISSING_TOKEN_MESSAGE))
    }
}

/// Token filter middleware
///
/// Denied requests get a 401 and never reach the inner service.
pub async fn token_filter(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();

    if state.public_paths.contains(&path) {
        return Ok(next.run(request).await);
    }

    let Some(token) = extract_token(request.headers()) else {
        debug!(path = %path, "Rejected request without token");
        return Err(ApiError::unauthorized(MISSING_TOKEN_MESSAGE));
    };

    let user_id = extract_user_id(request.headers());

    if !state.token_service.validate(&token, &user_id) {
        info!(path = %path, user_id = %user_id, "Rejected request with invalid token");
        return Err(ApiError::unauthorized(INVALID_TOKEN_MESSAGE));
    }

    request.extensions_mut().insert(AuthenticatedUser(user_id));

    Ok(next.run(request).await)
}

/// Token from the Authorization header, `Bearer ` prefix removed; `None` when absent or blank
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Identity from the `userId` header; empty when absent, which never matches a token
pub fn extract_user_id(headers: &HeaderMap) -> String {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
