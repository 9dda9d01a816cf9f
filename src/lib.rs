//! token-gate
//!
//! Issues HS256-signed session tokens bound to a user id and guards an HTTP
//! service with a filter that only admits requests carrying a valid token.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::middleware::PublicPaths;
use api::state::AppState;
use infrastructure::auth::{JwtService, TokenService};
use tracing::info;

/// Create the application state from configuration
///
/// Fails when the signing secret is missing or not valid base64.
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let service = JwtService::from_settings(&config.jwt)?;

    info!(
        expiry = ?service.expiry_policy(),
        public_paths = ?config.auth.public_paths,
        "Token service initialized"
    );

    Ok(AppState::new(
        Arc::new(service),
        PublicPaths::new(config.auth.public_paths.iter().cloned()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtSettings;

    #[test]
    fn test_state_requires_secret() {
        let config = AppConfig::default();
        let err = create_app_state_with_config(&config).unwrap_err();
        assert!(err.to_string().contains("JWT secret is not configured"));
    }

    #[test]
    fn test_state_from_config() {
        let config = AppConfig {
            jwt: JwtSettings {
                secret: Some("c2VjcmV0LWtleQ==".to_string()),
                expired_time: Some(60),
            },
            ..AppConfig::default()
        };

        let state = create_app_state_with_config(&config).unwrap();
        assert!(state.public_paths.contains("/login"));

        let token = state
            .token_service
            .issue(domain::token::Claims::new("alice"))
            .unwrap();
        assert!(state.token_service.validate(token.as_str(), "alice"));
    }
}
