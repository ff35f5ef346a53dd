use std::sync::Arc;

use auth::TokenHandler;
use identity_service::config::Config;
use identity_service::config::JwtConfig;
use identity_service::config::PasswordConfig;
use identity_service::domain::identity::service::AuthService;
use identity_service::outbound::repositories::InMemoryCredentialStore;

pub const TEST_JWT_SECRET: &str = "integration_test_secret_at_least_32_bytes!";

pub fn test_config() -> Config {
    Config {
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
        password: PasswordConfig::default(),
    }
}

/// Service over a fresh in-memory store, plus a handle to the store for
/// assertions on persisted state.
pub fn test_service() -> (
    AuthService<InMemoryCredentialStore>,
    Arc<InMemoryCredentialStore>,
) {
    let store = Arc::new(InMemoryCredentialStore::new());
    let service = AuthService::new(Arc::clone(&store), &test_config());
    (service, store)
}

/// Token handler sharing the service's signing secret, for inspecting
/// and minting tokens in tests.
pub fn test_token_handler() -> TokenHandler {
    TokenHandler::new(TEST_JWT_SECRET.as_bytes())
}
