//! Token lifetime policy

/// How long issued tokens stay valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryPolicy {
    /// Tokens carry no `exp` claim
    #[default]
    Never,
    /// Tokens expire this many seconds after issue
    After(u64),
}

impl ExpiryPolicy {
    /// Build the policy from the configured `expiredTime`: absent or negative disables expiry
    pub fn from_seconds(seconds: Option<i64>) -> Self {
        match seconds {
            Some(s) if s >= 0 => Self::After(s.unsigned_abs()),
            _ => Self::Never,
        }
    }

    /// Lifetime in seconds, if tokens expire
    pub fn seconds(&self) -> Option<u64> {
        match self {
            Self::Never => None,
            Self::After(s) => Some(*s),
        }
    }

    /// Expiration timestamp for a token issued at `issued_at`
    pub fn expires_at(&self, issued_at: i64) -> Option<i64> {
        self.seconds().map(|s| {
            let lifetime = i64::try_from(s).unwrap_or(i64::MAX);
            issued_at.saturating_add(lifetime)
        })
    }
}
