//! Authentication API endpoints
//!
//! `POST /login` hands out tokens; `GET /whoami` echoes the identity the token
//! filter verified.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::api::middleware::AuthenticatedUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Envelope, Json};
use crate::domain::token::Claims;

pub const LOGIN_SUCCEEDED_MESSAGE: &str = "login succeeded";
pub const LOGIN_FAILED_MESSAGE: &str = "login failed";

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/whoami", get(whoami))
}

/// Login request; any other body fields are ignored
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub user_name: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse {
    pub user_id: String,
}

/// Issue a token for the named user
///
/// POST /login
///
/// There is no credential check; the user name becomes the token subject.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Envelope<LoginResponse>>, ApiError> {
    // Matches the trimmed `userId` header the token filter reads
    let user_id = request.user_name.trim();
    if user_id.is_empty() {
        return Err(ApiError::bad_request("userName is required"));
    }

    let token = state
        .token_service
        .issue(Claims::new(user_id))
        .map_err(|e| {
            error!(reason = e.kind(), error = %e, "Failed to issue token");
            ApiError::internal(LOGIN_FAILED_MESSAGE)
        })?;

    info!(user_id = %user_id, "Issued login token");

    Ok(Json(Envelope::success(
        LOGIN_SUCCEEDED_MESSAGE,
        LoginResponse {
            token: token.into_string(),
            user_id: user_id.to_string(),
        },
    )))
}

/// GET /whoami
pub async fn whoami(user: AuthenticatedUser) -> Json<Envelope<WhoAmIResponse>> {
    Json(Envelope::success(
        "ok",
        WhoAmIResponse {
            user_id: user.user_id().to_string(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_field_names() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"userName":"alice","password":"ignored"}"#).unwrap();
        assert_eq!(request.user_name, "alice");

        let request: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(request.user_name.is_empty());
    }

    #[test]
    fn test_login_response_field_names() {
        let response = LoginResponse {
            token: "t".to_string(),
            user_id: "alice".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"token": "t", "userId": "alice"})
        );
    }
}
