use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Number of random bytes drawn for a salt before encoding.
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// Generate a random per-user salt.
///
/// Draws `length` bytes from the operating system CSPRNG and encodes
/// them with the URL-safe base64 alphabet (no padding) so the salt can
/// be stored and transported as plain text.
///
/// # Arguments
/// * `length` - Number of random bytes before encoding
///
/// # Returns
/// URL-safe encoded salt string
pub fn generate_salt(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(&bytes)
}
