/// Session token authority for Nova board services
///
/// Issues and validates HS256 session tokens. Tokens are stateless: the
/// only server-side state is the signing secret, which is injected when the
/// authority is constructed and lives as long as the authority does.
///
/// ## Usage
///
/// ```rust
/// use crypto_core::jwt::TokenAuthority;
///
/// let authority = TokenAuthority::new(b"local-development-secret").expect("secret too short");
///
/// let issued = authority.issue("alice").expect("signing failed");
/// let claims = authority.verify(&issued.token).expect("fresh token must verify");
/// assert_eq!(claims.username, "alice");
/// ```
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Lifetime of a session token. Fixed; not part of configuration.
pub const TOKEN_TTL_MINUTES: i64 = 5;

/// Shortest signing secret accepted by [`TokenAuthority::new`].
pub const MIN_SECRET_LENGTH: usize = 16;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username the token was issued to
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Encoded token together with its expiry, so transports can align cookie
/// lifetimes with the token itself.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("signing secret must be at least {MIN_SECRET_LENGTH} bytes")]
    WeakSecret,

    #[error("failed to sign token: {0}")]
    Signing(String),

    /// Bad signature or malformed payload
    #[error("invalid token")]
    Invalid,

    #[error("token expired")]
    Expired,
}

pub type Result<T> = std::result::Result<T, TokenError>;

// ============================================================================
// Authority
// ============================================================================

pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenAuthority {
    /// Build an authority around a symmetric signing secret.
    ///
    /// Rotating the secret means constructing a new authority; tokens signed
    /// by the old one stop verifying.
    pub fn new(secret: &[u8]) -> Result<Self> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSecret);
        }

        // Expiry is checked by hand in `verify_at` so that `now == exp` is
        // already expired and no leeway applies.
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Issue a token for `username` valid for [`TOKEN_TTL_MINUTES`].
    pub fn issue(&self, username: &str) -> Result<IssuedToken> {
        self.issue_at(username, Utc::now())
    }

    /// Issue a token as if the clock read `issued_at`.
    pub fn issue_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<IssuedToken> {
        let expiry = issued_at + Duration::minutes(TOKEN_TTL_MINUTES);

        let claims = Claims {
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
        };

        let token = encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        // Second precision, matching what the token actually carries
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| TokenError::Signing("expiry out of range".to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate `token` against the current clock.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Validate `token` as if the clock read `now`.
    ///
    /// Signature and structure are checked first; a token that fails either
    /// is `Invalid` regardless of its expiry.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(error = %e, "Token decode failed");
                TokenError::Invalid
            })?;

        let claims = token_data.claims;
        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("algorithm", &JWT_ALGORITHM)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
