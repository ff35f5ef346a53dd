use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Failures surfaced by credential store implementations.
///
/// The store's own vocabulary; the authentication service translates
/// these into [`AuthError`] at its boundary and never leaks them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Record already exists")]
    AlreadyExists,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for authentication operations.
///
/// Deliberately coarse where secrecy matters: an unknown email and a
/// wrong password are both `InvalidCredentials`, and every token
/// verification failure is `TokenInvalid`, with no further detail.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserExists,

    #[error("Token is invalid")]
    TokenInvalid,

    #[error("Identity not found: {0}")]
    NotFound(String),

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Token signing failed: {0}")]
    SigningError(String),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),
}
