//! Application state for shared services

use std::sync::Arc;

use crate::api::middleware::PublicPaths;
use crate::infrastructure::auth::TokenService;

/// Application state shared by handlers and the token filter
#[derive(Debug, Clone)]
pub struct AppState {
    pub token_service: Arc<dyn TokenService>,
    pub public_paths: Arc<PublicPaths>,
}

impl AppState {
    pub fn new(token_service: Arc<dyn TokenService>, public_paths: PublicPaths) -> Self {
        Self {
            token_service,
            public_paths: Arc::new(public_paths),
        }
    }
}
