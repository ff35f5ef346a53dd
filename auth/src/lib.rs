//! Authentication utilities library
//!
//! Provides the trust-critical pieces of identity handling:
//! - Salted password hashing (Argon2id over password + per-user salt)
//! - Per-user salt generation
//! - Access and refresh token issuance and verification (HS256)
//!
//! Each service defines its own authentication traits and adapts these
//! implementations. This avoids coupling services through shared domain
//! logic while reducing code duplication.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{generate_salt, PasswordHasher, DEFAULT_SALT_LENGTH};
//!
//! let hasher = PasswordHasher::new();
//! let salt = generate_salt(DEFAULT_SALT_LENGTH);
//! let hash = hasher.hash("my_password", &salt).unwrap();
//! assert!(hasher.verify("my_password", &salt, &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenHandler;
//!
//! let handler = TokenHandler::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let access = handler.issue_access_token("user123", "user@example.com").unwrap();
//! let claims = handler.verify_access_token(&access).unwrap();
//! assert_eq!(claims.sub, "user123");
//!
//! let refresh = handler.issue_refresh_token("user123").unwrap();
//! assert!(handler.verify_refresh_token(&refresh).is_ok());
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::AccessClaims;
pub use jwt::RefreshClaims;
pub use jwt::TokenError;
pub use jwt::TokenHandler;
pub use password::generate_salt;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::DEFAULT_SALT_LENGTH;
