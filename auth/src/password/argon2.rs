use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Applies Argon2id over the password concatenated with a caller-supplied
/// per-user salt. The resulting PHC string embeds the algorithm's own
/// internal salt and cost parameters, so the per-user salt is a second,
/// independently stored layer that must be persisted alongside the hash.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password together with its per-user salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    /// * `salt` - Per-user salt appended to the password before hashing
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, internal
    /// salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str, salt: &str) -> Result<String, PasswordError> {
        let internal_salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(Self::salted(password, salt).as_bytes(), &internal_salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password and salt pair against a stored hash.
    ///
    /// Uses the algorithm's own constant-time comparison. A mismatch is
    /// `Ok(false)`; only a stored hash that cannot be parsed is an error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `salt` - Per-user salt stored with the hash
    /// * `stored_hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash format is invalid
    pub fn verify(
        &self,
        password: &str,
        salt: &str,
        stored_hash: &str,
    ) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        let argon2 = Argon2::default();

        Ok(argon2
            .verify_password(Self::salted(password, salt).as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn salted(password: &str, salt: &str) -> String {
        format!("{}{}", password, salt)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
