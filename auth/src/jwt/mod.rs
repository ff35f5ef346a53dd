pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::AccessClaims;
pub use claims::RefreshClaims;
pub use claims::ACCESS_TOKEN_TTL_HOURS;
pub use claims::REFRESH_TOKEN_TTL_DAYS;
pub use errors::TokenError;
pub use handler::TokenHandler;
