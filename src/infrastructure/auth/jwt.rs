//! HS256 token issuance and verification

use std::fmt::Debug;
use std::sync::Arc;

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::JwtSettings;
use crate::domain::token::{Claims, Clock, ExpiryPolicy, SystemClock, Token, TokenError};
use crate::domain::DomainError;

/// The only signing algorithm issued or accepted
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Standard alphabet, padding optional
const SECRET_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Raw HMAC key bytes, decoded once at startup
#[derive(Clone)]
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    /// Decode a base64 secret from configuration
    pub fn from_base64(encoded: &str) -> Result<Self, DomainError> {
        let encoded = encoded.trim();

        if encoded.is_empty() {
            return Err(DomainError::configuration("JWT secret is empty"));
        }

        let bytes = SECRET_ENGINE
            .decode(encoded)
            .map_err(|e| DomainError::configuration(format!("JWT secret is not valid base64: {}", e)))?;

        Ok(Self(Zeroizing::new(bytes)))
    }

    /// Use raw key bytes directly
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret([hidden])")
    }
}

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: SigningSecret,
    pub expiry: ExpiryPolicy,
}

impl JwtConfig {
    pub fn new(secret: SigningSecret, expiry: ExpiryPolicy) -> Self {
        Self { secret, expiry }
    }

    /// Build from configuration values; a missing or undecodable secret is fatal
    pub fn from_settings(settings: &JwtSettings) -> Result<Self, DomainError> {
        let encoded = settings
            .secret
            .as_deref()
            .ok_or_else(|| DomainError::configuration("JWT secret is not configured"))?;

        Ok(Self {
            secret: SigningSecret::from_base64(encoded)?,
            expiry: ExpiryPolicy::from_seconds(settings.expired_time),
        })
    }
}

/// Token operations the HTTP layer depends on
pub trait TokenService: Send + Sync + Debug {
    /// Sign claims into a compact token
    fn issue(&self, claims: Claims) -> Result<Token, TokenError>;

    /// Verify the signature and return the claims, without looking at expiry
    fn decode(&self, token: &str) -> Result<Claims, TokenError>;

    /// Full verification with the failure cause
    fn check(&self, token: &str, user_id: &str) -> Result<Claims, TokenError>;

    /// Full verification collapsed to accept/deny
    fn validate(&self, token: &str, user_id: &str) -> bool;

    fn expiry_policy(&self) -> ExpiryPolicy;
}

/// Signs claims with the shared secret
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    expiry: ExpiryPolicy,
    clock: Arc<dyn Clock>,
}

impl Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &TOKEN_ALGORITHM)
            .field("expiry", &self.expiry)
            .field("encoding_key", &"[hidden]")
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            expiry: config.expiry,
            clock,
        }
    }

    /// Stamp `iat` (and `exp` when expiry is enabled) and sign
    pub fn issue(&self, mut claims: Claims) -> Result<Token, TokenError> {
        if claims.user_id().is_empty() {
            return Err(TokenError::MissingSubject);
        }

        if let Some(name) = claims.unencodable_claim() {
            return Err(TokenError::InvalidClaim {
                name: name.to_string(),
            });
        }

        let now = self.clock.now();
        claims.stamp(now, self.expiry.expires_at(now));

        encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map(Token::new)
            .map_err(|e| TokenError::signing(e.to_string()))
    }

    pub fn expiry_policy(&self) -> ExpiryPolicy {
        self.expiry
    }
}

/// Checks signature, expiry and subject of presented tokens
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &TOKEN_ALGORITHM)
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(config: &JwtConfig, clock: Arc<dyn Clock>) -> Self {
        // Only the signature is checked by the library; expiry runs against our clock.
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            clock,
        }
    }

    /// Verify the signature and decode the claims
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(map_decode_error)
    }

    /// True iff `exp` is present and not strictly after the current time
    pub fn is_expired(&self, claims: &Claims) -> bool {
        claims.is_expired_at(self.clock.now())
    }

    /// Decode, then reject expired tokens and tokens for another subject
    pub fn check(&self, token: &str, user_id: &str) -> Result<Claims, TokenError> {
        let claims = self.decode(token)?;

        if self.is_expired(&claims) {
            return Err(TokenError::Expired {
                expired_at: claims.expires_at().unwrap_or_default(),
            });
        }

        if user_id.is_empty() || claims.user_id() != user_id {
            return Err(TokenError::SubjectMismatch);
        }

        Ok(claims)
    }

    /// [`TokenVerifier::check`] collapsed to a boolean; the cause is only logged
    pub fn validate(&self, token: &str, user_id: &str) -> bool {
        match self.check(token, user_id) {
            Ok(_) => true,
            Err(e) => {
                debug!(reason = e.kind(), error = %e, "Token rejected");
                false
            }
        }
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
        _ => TokenError::malformed(err.to_string()),
    }
}

/// Issuer and verifier sharing one secret, policy and clock
#[derive(Debug)]
pub struct JwtService {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl JwtService {
    /// Create a service on the wall clock
    pub fn new(config: JwtConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a service on a specific clock
    pub fn with_clock(config: JwtConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            issuer: TokenIssuer::new(&config, clock.clone()),
            verifier: TokenVerifier::new(&config, clock),
        }
    }

    /// Decode the configured secret and build the service
    pub fn from_settings(settings: &JwtSettings) -> Result<Self, DomainError> {
        Ok(Self::new(JwtConfig::from_settings(settings)?))
    }

}

impl TokenService for JwtService {
    fn issue(&self, claims: Claims) -> Result<Token, TokenError> {
        self.issuer.issue(claims)
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.verifier.decode(token)
    }

    fn check(&self, token: &str, user_id: &str) -> Result<Claims, TokenError> {
        self.verifier.check(token, user_id)
    }

    fn validate(&self, token: &str, user_id: &str) -> bool {
        self.verifier.validate(token, user_id)
    }

    fn expiry_policy(&self) -> ExpiryPolicy {
        self.issuer.expiry_policy()
    }
}
