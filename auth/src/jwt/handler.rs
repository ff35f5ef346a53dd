use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::AccessClaims;
use super::claims::RefreshClaims;
use super::errors::TokenError;

/// Issues and verifies signed tokens.
///
/// Uses HS256 (HMAC with SHA-256) exclusively; a token presenting any
/// other algorithm in its header is rejected during verification.
pub struct TokenHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenHandler {
    /// Create a new token handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Inject the secret from configuration; never compile it in
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue an access token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Opaque user identifier, becomes the `sub` claim
    /// * `email` - Subject's current email, embedded as a claim
    ///
    /// # Returns
    /// Compact signed token string, valid for 24 hours
    ///
    /// # Errors
    /// * `Signing` - Token signing failed
    pub fn issue_access_token(&self, subject: &str, email: &str) -> Result<String, TokenError> {
        self.encode(&AccessClaims::new(subject, email, Utc::now()))
    }

    /// Issue a refresh token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Opaque user identifier, becomes the `sub` claim
    ///
    /// # Returns
    /// Compact signed token string, valid for 7 days
    ///
    /// # Errors
    /// * `Signing` - Token signing failed
    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, TokenError> {
        self.encode(&RefreshClaims::new(subject, Utc::now()))
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `Invalid` - Any verification failure
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decode(token)
    }

    /// Verify a refresh token and return its claims.
    ///
    /// # Errors
    /// * `Invalid` - Any verification failure
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.decode(token)
    }

    /// Sign an arbitrary claim set with this handler's key and algorithm.
    ///
    /// The issue methods above cover the standard claim sets; this is the
    /// escape hatch for callers that need to sign custom claims (tests
    /// use it to mint tokens with chosen timestamps).
    ///
    /// # Errors
    /// * `Signing` - Token signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key).map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// Checks, in order: header algorithm is HS256, signature matches,
    /// `exp` is present and in the future (zero leeway), and the claim
    /// set deserializes into `T`. Every failure collapses into
    /// `TokenError::Invalid`; the reason is logged at debug level and
    /// never surfaced to the caller.
    fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        match decode::<T>(token, &self.decoding_key, &validation) {
            Ok(token_data) => Ok(token_data.claims),
            Err(e) => {
                tracing::debug!("token verification failed: {}", e);
                Err(TokenError::Invalid)
            }
        }
    }
}
