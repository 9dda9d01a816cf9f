//! Authentication infrastructure module
//!
//! This module provides signed token issuance and verification.

mod jwt;

pub use jwt::{
    JwtConfig, JwtService, SigningSecret, TokenIssuer, TokenService, TokenVerifier,
    TOKEN_ALGORITHM,
};
