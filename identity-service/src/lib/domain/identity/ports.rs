use async_trait::async_trait;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::errors::StoreError;
use crate::domain::identity::models::AuthenticatedIdentity;
use crate::domain::identity::models::Credential;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::UpdateIdentityCommand;
use crate::domain::identity::models::UserId;
use crate::domain::identity::models::UserIdentity;

/// Port for authentication service operations.
///
/// This is the contract the transport layer consumes; every outcome a
/// caller can observe is one of the [`AuthError`] variants.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity and issue its first token pair.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Created identity with access and refresh tokens
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `SigningError` - Identity was persisted but token issuance
    ///   failed; the caller must log in to obtain tokens
    /// * `StoreUnavailable` - Persistence failed
    async fn register(&self, command: RegisterCommand)
        -> Result<AuthenticatedIdentity, AuthError>;

    /// Authenticate an email and password pair.
    ///
    /// # Arguments
    /// * `credential` - Ephemeral email and plaintext password
    ///
    /// # Returns
    /// Matching identity with freshly issued access and refresh tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password,
    ///   indistinguishably
    /// * `SigningError` - Token issuance failed
    /// * `StoreUnavailable` - Persistence failed
    async fn login(&self, credential: Credential) -> Result<AuthenticatedIdentity, AuthError>;

    /// Exchange a valid refresh token for a fresh access token.
    ///
    /// The refresh token itself is not rotated or invalidated.
    ///
    /// # Arguments
    /// * `refresh_token` - Compact signed refresh token
    ///
    /// # Returns
    /// New access token bound to the subject's current email
    ///
    /// # Errors
    /// * `TokenInvalid` - Any token verification failure
    /// * `InvalidCredentials` - Subject no longer exists
    /// * `SigningError` - Token issuance failed
    /// * `StoreUnavailable` - Persistence failed
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Retrieve identity by unique identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// Identity entity
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `StoreUnavailable` - Persistence failed
    async fn get_identity(&self, id: &UserId) -> Result<UserIdentity, AuthError>;

    /// Update an existing identity with optional fields.
    ///
    /// A password change regenerates the salt; salt and hash are always
    /// written together.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Command with optional email and password fields
    ///
    /// # Returns
    /// Updated identity entity
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `StoreUnavailable` - Persistence failed
    async fn update_identity(
        &self,
        id: &UserId,
        command: UpdateIdentityCommand,
    ) -> Result<UserIdentity, AuthError>;

    /// Delete an existing identity.
    ///
    /// Outstanding tokens for the subject are not revoked; they simply
    /// stop resolving to an identity on refresh.
    ///
    /// # Arguments
    /// * `id` - User ID to delete
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `StoreUnavailable` - Persistence failed
    async fn delete_identity(&self, id: &UserId) -> Result<(), AuthError>;

    /// Readiness probe delegating to the credential store.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store did not answer
    async fn health_check(&self) -> Result<(), AuthError>;
}

/// Persistence operations for identity records.
///
/// Implementations own email uniqueness: `insert` must reject a
/// duplicate atomically rather than relying on any lookup the caller may
/// have performed first.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve identity by identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// Optional identity entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserIdentity>, StoreError>;

    /// Retrieve identity by email, including its credential material.
    ///
    /// The returned record carries the stored salt and password hash
    /// needed for verification.
    ///
    /// # Arguments
    /// * `email` - Email address string
    ///
    /// # Returns
    /// Optional identity entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn find_by_email_with_salt(
        &self,
        email: &str,
    ) -> Result<Option<UserIdentity>, StoreError>;

    /// Persist a new identity. The store assigns the identifier.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password_hash` - Opaque PHC hash string
    /// * `salt` - Per-user salt paired with the hash
    ///
    /// # Returns
    /// Created identity entity
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Unavailable` - Store operation failed
    async fn insert(
        &self,
        email: EmailAddress,
        password_hash: String,
        salt: String,
    ) -> Result<UserIdentity, StoreError>;

    /// Replace an existing identity record.
    ///
    /// # Arguments
    /// * `identity` - Identity entity with updated fields
    ///
    /// # Returns
    /// Updated identity entity
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Unavailable` - Store operation failed
    async fn update(&self, identity: UserIdentity) -> Result<UserIdentity, StoreError>;

    /// Remove an identity record.
    ///
    /// # Arguments
    /// * `id` - User ID to delete
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Unavailable` - Store operation failed
    async fn delete(&self, id: &UserId) -> Result<(), StoreError>;

    /// Probe the store for liveness.
    ///
    /// # Errors
    /// * `Unavailable` - Store did not answer
    async fn health_check(&self) -> Result<(), StoreError>;
}
