//! Token claims and custom claim values

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Claim name carrying the subject identifier
pub const USER_ID_CLAIM: &str = "userId";

/// Claim name carrying the issue timestamp
pub const ISSUED_AT_CLAIM: &str = "iat";

/// Claim name carrying the expiration timestamp
pub const EXPIRATION_CLAIM: &str = "exp";

/// Value of a custom claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl ClaimValue {
    /// False for NaN and infinite floats, which serialize as `null` and cannot be read back
    pub fn is_encodable(&self) -> bool {
        match self {
            Self::Float(n) => n.is_finite(),
            _ => true,
        }
    }

    /// Interpret free text the way a shell user would write it:
    /// `true`/`false`, integers and floats keep their type, anything else is a string
    pub fn parse_lenient(raw: &str) -> Self {
        if let Ok(b) = raw.parse::<bool>() {
            return Self::Bool(b);
        }

        if let Ok(n) = raw.parse::<i64>() {
            return Self::Integer(n);
        }

        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Float(n),
            _ => Self::String(raw.to_string()),
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ClaimValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl std::fmt::Display for ClaimValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

/// Payload of a token
///
/// `userId` is mandatory. `iat` and `exp` are stamped by the issuer and cannot be
/// set by callers; everything else lives in the custom claim map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
    #[serde(flatten)]
    custom: BTreeMap<String, ClaimValue>,
}

impl Claims {
    /// Create claims for a subject
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            iat: None,
            exp: None,
            custom: BTreeMap::new(),
        }
    }

    /// Add a custom claim (builder form of [`Claims::insert`])
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a custom claim. Registered names are ignored; returns whether the claim was stored.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> bool {
        let name = name.into();

        if is_registered_claim(&name) {
            return false;
        }

        self.custom.insert(name, value.into());
        true
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Issue time in seconds since the epoch, once stamped
    pub fn issued_at(&self) -> Option<i64> {
        self.iat
    }

    /// Expiration in seconds since the epoch, if the token expires
    pub fn expires_at(&self) -> Option<i64> {
        self.exp
    }

    /// Get a custom claim by name
    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.custom.get(name)
    }

    pub fn custom(&self) -> &BTreeMap<String, ClaimValue> {
        &self.custom
    }

    /// Name of the first custom claim whose value cannot survive encoding
    pub fn unencodable_claim(&self) -> Option<&str> {
        self.custom
            .iter()
            .find(|(_, value)| !value.is_encodable())
            .map(|(name, _)| name.as_str())
    }

    /// True iff an expiration is present and it is not strictly after `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }

    pub(crate) fn stamp(&mut self, issued_at: i64, expires_at: Option<i64>) {
        self.iat = Some(issued_at);
        self.exp = expires_at;
    }
}

fn is_registered_claim(name: &str) -> bool {
    matches!(name, USER_ID_CLAIM | ISSUED_AT_CLAIM | EXPIRATION_CLAIM)
}
