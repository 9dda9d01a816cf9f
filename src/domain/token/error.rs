//! Token failure taxonomy

use thiserror::Error;

/// Reasons a token cannot be issued or is not accepted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token: {message}")]
    Malformed { message: String },

    #[error("Token signature does not match")]
    InvalidSignature,

    #[error("Token expired at {expired_at}")]
    Expired { expired_at: i64 },

    #[error("Token subject does not match the supplied user id")]
    SubjectMismatch,

    #[error("Claims must carry a non-empty userId")]
    MissingSubject,

    #[error("Claim '{name}' holds a value JSON cannot represent")]
    InvalidClaim { name: String },

    #[error("Failed to sign token: {message}")]
    Signing { message: String },
}

impl TokenError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Stable label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "malformed",
            Self::InvalidSignature => "invalid_signature",
            Self::Expired { .. } => "expired",
            Self::SubjectMismatch => "subject_mismatch",
            Self::MissingSubject => "missing_subject",
            Self::InvalidClaim { .. } => "invalid_claim",
            Self::Signing { .. } => "signing",
        }
    }
}
