use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures deliberately collapse into the single `Invalid`
/// value: callers cannot tell a bad signature from an expired, malformed,
/// or wrongly-signed token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Token is invalid")]
    Invalid,
}
