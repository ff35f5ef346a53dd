pub mod argon2;
pub mod errors;
pub mod salt;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
pub use salt::generate_salt;
pub use salt::DEFAULT_SALT_LENGTH;
