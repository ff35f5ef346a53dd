use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of an access token.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Lifetime of a refresh token.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Claim set carried by access tokens.
///
/// Every field is required: a token missing any of them fails
/// deserialization and therefore verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Email of the subject at issuance time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build access claims expiring 24 hours after `now`.
    pub fn new(subject: impl ToString, email: impl ToString, now: DateTime<Utc>) -> Self {
        let expiration = now + Duration::hours(ACCESS_TOKEN_TTL_HOURS);

        Self {
            sub: subject.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}

/// Claim set carried by refresh tokens.
///
/// Deliberately narrower than [`AccessClaims`]: the email is looked up
/// fresh when the token is redeemed, so it is never embedded here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl RefreshClaims {
    /// Build refresh claims expiring 7 days after `now`.
    pub fn new(subject: impl ToString, now: DateTime<Utc>) -> Self {
        let expiration = now + Duration::days(REFRESH_TOKEN_TTL_DAYS);

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}
