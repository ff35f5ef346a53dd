use std::sync::Arc;

use async_trait::async_trait;
use auth::generate_salt;
use auth::PasswordHasher;
use auth::TokenHandler;

use crate::config::Config;
use crate::domain::identity::errors::AuthError;
use crate::domain::identity::errors::StoreError;
use crate::domain::identity::models::AuthenticatedIdentity;
use crate::domain::identity::models::Credential;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::UpdateIdentityCommand;
use crate::domain::identity::models::UserId;
use crate::domain::identity::models::UserIdentity;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::identity::ports::CredentialStore;

/// Domain service implementation for authentication.
///
/// Orchestrates the credential store, the password hasher, and the token
/// handler. Holds no mutable state of its own; any number of operations
/// may run concurrently.
pub struct AuthService<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    password_hasher: PasswordHasher,
    token_handler: TokenHandler,
    salt_length: usize,
}

impl<S> AuthService<S>
where
    S: CredentialStore,
{
    /// Create a new authentication service with an injected store.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `config` - Service configuration carrying the signing secret
    ///   and salt length
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(store: Arc<S>, config: &Config) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
            token_handler: TokenHandler::new(config.jwt.secret.as_bytes()),
            salt_length: config.password.salt_length,
        }
    }

    fn issue_token_pair(&self, identity: &UserIdentity) -> Result<(String, String), AuthError> {
        let subject = identity.id.to_string();

        let access_token = self
            .token_handler
            .issue_access_token(&subject, identity.email.as_str())
            .map_err(|e| AuthError::SigningError(e.to_string()))?;
        let refresh_token = self
            .token_handler
            .issue_refresh_token(&subject)
            .map_err(|e| AuthError::SigningError(e.to_string()))?;

        Ok((access_token, refresh_token))
    }
}

fn store_unavailable(e: StoreError) -> AuthError {
    AuthError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: CredentialStore,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        // Fast-path duplicate check; skips the hashing work for obvious
        // duplicates. Uniqueness is still enforced atomically by the
        // store's insert.
        let existing = self
            .store
            .find_by_email_with_salt(command.email.as_str())
            .await
            .map_err(store_unavailable)?;
        if existing.is_some() {
            return Err(AuthError::UserExists);
        }

        let salt = generate_salt(self.salt_length);
        let password_hash = self.password_hasher.hash(&command.password, &salt)?;

        let identity = self
            .store
            .insert(command.email, password_hash, salt)
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists => AuthError::UserExists,
                other => store_unavailable(other),
            })?;

        // The identity is persisted at this point; a signing failure
        // leaves the registration in place and the caller must log in.
        let (access_token, refresh_token) = self.issue_token_pair(&identity).map_err(|e| {
            tracing::error!(
                identity = %identity.id,
                "token issuance failed after registration: {}",
                e
            );
            e
        })?;

        Ok(AuthenticatedIdentity {
            identity,
            access_token,
            refresh_token,
        })
    }

    async fn login(&self, credential: Credential) -> Result<AuthenticatedIdentity, AuthError> {
        // An unknown email and a wrong password must be observably
        // identical to the caller.
        let identity = self
            .store
            .find_by_email_with_salt(&credential.email)
            .await
            .map_err(store_unavailable)?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = self.password_hasher.verify(
            &credential.password,
            &identity.salt,
            &identity.password_hash,
        )?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let (access_token, refresh_token) = self.issue_token_pair(&identity)?;

        Ok(AuthenticatedIdentity {
            identity,
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self
            .token_handler
            .verify_refresh_token(refresh_token)
            .map_err(|_| AuthError::TokenInvalid)?;

        let subject = UserId::from_string(&claims.sub).map_err(|_| AuthError::TokenInvalid)?;

        // The subject may have been deleted since the token was issued;
        // a missing identity fails like any bad credential.
        let identity = self
            .store
            .find_by_id(&subject)
            .await
            .map_err(store_unavailable)?
            .ok_or(AuthError::InvalidCredentials)?;

        self.token_handler
            .issue_access_token(&identity.id.to_string(), identity.email.as_str())
            .map_err(|e| AuthError::SigningError(e.to_string()))
    }

    async fn get_identity(&self, id: &UserId) -> Result<UserIdentity, AuthError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(store_unavailable)?
            .ok_or(AuthError::NotFound(id.to_string()))
    }

    async fn update_identity(
        &self,
        id: &UserId,
        command: UpdateIdentityCommand,
    ) -> Result<UserIdentity, AuthError> {
        let mut identity = self
            .store
            .find_by_id(id)
            .await
            .map_err(store_unavailable)?
            .ok_or(AuthError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            identity.email = new_email;
        }

        if let Some(new_password) = command.password {
            // A fresh salt accompanies every password change; salt and
            // hash are replaced together.
            let salt = generate_salt(self.salt_length);
            identity.password_hash = self.password_hasher.hash(&new_password, &salt)?;
            identity.salt = salt;
        }

        self.store.update(identity).await.map_err(|e| match e {
            StoreError::NotFound => AuthError::NotFound(id.to_string()),
            other => store_unavailable(other),
        })
    }

    async fn delete_identity(&self, id: &UserId) -> Result<(), AuthError> {
        self.store.delete(id).await.map_err(|e| match e {
            StoreError::NotFound => AuthError::NotFound(id.to_string()),
            other => store_unavailable(other),
        })
    }

    async fn health_check(&self) -> Result<(), AuthError> {
        self.store
            .health_check()
            .await
            .map_err(store_unavailable)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::config::Config;
    use crate::config::JwtConfig;
    use crate::config::PasswordConfig;
    use crate::domain::identity::models::EmailAddress;

    const TEST_SECRET: &str = "unit_test_secret_key_at_least_32_bytes!";

    // Define mocks in the test module using mockall
    mock! {
        pub TestCredentialStore {}

        #[async_trait]
        impl CredentialStore for TestCredentialStore {
            async fn find_by_id(&self, id: &UserId) -> Result<Option<UserIdentity>, StoreError>;
            async fn find_by_email_with_salt(&self, email: &str) -> Result<Option<UserIdentity>, StoreError>;
            async fn insert(&self, email: EmailAddress, password_hash: String, salt: String) -> Result<UserIdentity, StoreError>;
            async fn update(&self, identity: UserIdentity) -> Result<UserIdentity, StoreError>;
            async fn delete(&self, id: &UserId) -> Result<(), StoreError>;
            async fn health_check(&self) -> Result<(), StoreError>;
        }
    }

    fn test_config() -> Config {
        Config {
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
            },
            password: PasswordConfig::default(),
        }
    }

    fn test_service(store: MockTestCredentialStore) -> AuthService<MockTestCredentialStore> {
        AuthService::new(Arc::new(store), &test_config())
    }

    fn email(address: &str) -> EmailAddress {
        EmailAddress::new(address.to_string()).unwrap()
    }

    fn stored_identity(address: &str, password: &str) -> UserIdentity {
        let salt = generate_salt(auth::DEFAULT_SALT_LENGTH);
        let password_hash = PasswordHasher::new().hash(password, &salt).unwrap();
        UserIdentity {
            id: UserId::new(),
            email: email(address),
            password_hash,
            salt,
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_email_with_salt()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(|_| Ok(None));

        store
            .expect_insert()
            .withf(|_, password_hash, salt| {
                password_hash.starts_with("$argon2") && !salt.is_empty()
            })
            .times(1)
            .returning(|email, password_hash, salt| {
                Ok(UserIdentity {
                    id: UserId::new(),
                    email,
                    password_hash,
                    salt,
                })
            });

        let service = test_service(store);

        let command = RegisterCommand::new(email("alice@example.com"), "password123".to_string());
        let authenticated = service.register(command).await.unwrap();

        assert_eq!(authenticated.identity.email.as_str(), "alice@example.com");

        // Both issued tokens verify against the same secret
        let handler = TokenHandler::new(TEST_SECRET.as_bytes());
        let access = handler
            .verify_access_token(&authenticated.access_token)
            .unwrap();
        assert_eq!(access.sub, authenticated.identity.id.to_string());
        assert_eq!(access.email, "alice@example.com");

        let refresh = handler
            .verify_refresh_token(&authenticated.refresh_token)
            .unwrap();
        assert_eq!(refresh.sub, authenticated.identity.id.to_string());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_email_with_salt()
            .times(1)
            .returning(|_| Ok(Some(stored_identity("alice@example.com", "password123"))));
        store.expect_insert().times(0);

        let service = test_service(store);

        let command = RegisterCommand::new(email("alice@example.com"), "password456".to_string());
        let result = service.register(command).await;

        assert!(matches!(result.unwrap_err(), AuthError::UserExists));
    }

    #[tokio::test]
    async fn test_register_duplicate_caught_by_insert() {
        // A concurrent registration can slip past the lookup; the
        // store's atomic insert is the authority.
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_email_with_salt()
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_insert()
            .times(1)
            .returning(|_, _, _| Err(StoreError::AlreadyExists));

        let service = test_service(store);

        let command = RegisterCommand::new(email("alice@example.com"), "password123".to_string());
        let result = service.register(command).await;

        assert!(matches!(result.unwrap_err(), AuthError::UserExists));
    }

    #[tokio::test]
    async fn test_login_success() {
        let identity = stored_identity("alice@example.com", "password123");
        let returned = identity.clone();

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_email_with_salt()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = test_service(store);

        let authenticated = service
            .login(Credential::new("alice@example.com", "password123"))
            .await
            .unwrap();

        assert_eq!(authenticated.identity.id, identity.id);

        let handler = TokenHandler::new(TEST_SECRET.as_bytes());
        let access = handler
            .verify_access_token(&authenticated.access_token)
            .unwrap();
        assert_eq!(access.sub, identity.id.to_string());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_email_with_salt()
            .withf(|email| email == "alice@example.com")
            .returning(|_| Ok(Some(stored_identity("alice@example.com", "password123"))));
        store
            .expect_find_by_email_with_salt()
            .withf(|email| email == "nobody@example.com")
            .returning(|_| Ok(None));

        let service = test_service(store);

        let wrong_password = service
            .login(Credential::new("alice@example.com", "wrong"))
            .await
            .unwrap_err();
        let unknown_email = service
            .login(Credential::new("nobody@example.com", "password123"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_store_unavailable() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_email_with_salt()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));

        let service = test_service(store);

        let result = service
            .login(Credential::new("alice@example.com", "password123"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AuthError::StoreUnavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_refresh_issues_token_for_current_email() {
        // Email changed after the refresh token was issued; the new
        // access token carries the current one.
        let identity = stored_identity("renamed@example.com", "password123");
        let subject = identity.id;
        let returned = identity.clone();

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_id()
            .withf(move |id| *id == subject)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = test_service(store);

        let handler = TokenHandler::new(TEST_SECRET.as_bytes());
        let refresh_token = handler.issue_refresh_token(&subject.to_string()).unwrap();

        let access_token = service.refresh(&refresh_token).await.unwrap();
        let access = handler.verify_access_token(&access_token).unwrap();
        assert_eq!(access.sub, subject.to_string());
        assert_eq!(access.email, "renamed@example.com");
    }

    #[tokio::test]
    async fn test_refresh_subject_deleted() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = test_service(store);

        let handler = TokenHandler::new(TEST_SECRET.as_bytes());
        let refresh_token = handler
            .issue_refresh_token(&UserId::new().to_string())
            .unwrap();

        let result = service.refresh(&refresh_token).await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_refresh_rejects_bad_tokens_without_store_access() {
        let mut store = MockTestCredentialStore::new();
        store.expect_find_by_id().times(0);

        let service = test_service(store);

        let garbage = service.refresh("not.a.token").await;
        assert!(matches!(garbage.unwrap_err(), AuthError::TokenInvalid));

        // Signed with the right key but already expired
        let handler = TokenHandler::new(TEST_SECRET.as_bytes());
        let expired_claims = auth::RefreshClaims::new(
            UserId::new().to_string(),
            Utc::now() - Duration::days(8),
        );
        let expired = handler.encode(&expired_claims).unwrap();

        let result = service.refresh(&expired).await;
        assert!(matches!(result.unwrap_err(), AuthError::TokenInvalid));
    }

    #[tokio::test]
    async fn test_get_identity_success() {
        let identity = stored_identity("alice@example.com", "password123");
        let id = identity.id;
        let returned = identity.clone();

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_id()
            .withf(move |lookup| *lookup == id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = test_service(store);

        let found = service.get_identity(&id).await.unwrap();
        assert_eq!(found, identity);
    }

    #[tokio::test]
    async fn test_get_identity_not_found() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = test_service(store);

        let result = service.get_identity(&UserId::new()).await;
        assert!(matches!(result.unwrap_err(), AuthError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_password_rehashes_with_fresh_salt() {
        let identity = stored_identity("alice@example.com", "old_password");
        let id = identity.id;
        let old_salt = identity.salt.clone();
        let old_hash = identity.password_hash.clone();
        let returned = identity.clone();

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        store
            .expect_update()
            .withf(move |updated| {
                updated.salt != old_salt
                    && updated.password_hash != old_hash
                    && updated.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|updated| Ok(updated));

        let service = test_service(store);

        let command = UpdateIdentityCommand {
            email: None,
            password: Some("new_password".to_string()),
        };
        let updated = service.update_identity(&id, command).await.unwrap();

        // The new pair verifies the new password, not the old one
        let hasher = PasswordHasher::new();
        assert!(hasher
            .verify("new_password", &updated.salt, &updated.password_hash)
            .unwrap());
        assert!(!hasher
            .verify("old_password", &updated.salt, &updated.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_update_email_leaves_credentials_untouched() {
        let identity = stored_identity("old@example.com", "password123");
        let id = identity.id;
        let salt = identity.salt.clone();
        let hash = identity.password_hash.clone();
        let returned = identity.clone();

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        store
            .expect_update()
            .withf(move |updated| {
                updated.email.as_str() == "new@example.com"
                    && updated.salt == salt
                    && updated.password_hash == hash
            })
            .times(1)
            .returning(|updated| Ok(updated));

        let service = test_service(store);

        let command = UpdateIdentityCommand {
            email: Some(email("new@example.com")),
            password: None,
        };
        let updated = service.update_identity(&id, command).await.unwrap();
        assert_eq!(updated.email.as_str(), "new@example.com");
    }

    #[tokio::test]
    async fn test_delete_identity_not_found() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_delete()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        let service = test_service(store);

        let result = service.delete_identity(&UserId::new()).await;
        assert!(matches!(result.unwrap_err(), AuthError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_health_check_maps_store_failure() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_health_check()
            .times(1)
            .returning(|| Err(StoreError::Unavailable("timed out".to_string())));

        let service = test_service(store);

        let result = service.health_check().await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::StoreUnavailable(_)
        ));
    }
}
