use std::collections::HashMap;
use std::sync::PoisonError;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::identity::errors::StoreError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::UserId;
use crate::domain::identity::models::UserIdentity;
use crate::domain::identity::ports::CredentialStore;

/// In-memory credential store.
///
/// Backs tests and local development; a relational store is the
/// production substitute. Email uniqueness is enforced under the write
/// lock, so concurrent inserts of the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    identities: RwLock<HashMap<UserId, UserIdentity>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Unavailable("store lock poisoned".to_string())
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserIdentity>, StoreError> {
        let identities = self.identities.read().map_err(poisoned)?;
        Ok(identities.get(id).cloned())
    }

    async fn find_by_email_with_salt(
        &self,
        email: &str,
    ) -> Result<Option<UserIdentity>, StoreError> {
        let identities = self.identities.read().map_err(poisoned)?;
        Ok(identities
            .values()
            .find(|identity| identity.email.as_str() == email)
            .cloned())
    }

    async fn insert(
        &self,
        email: EmailAddress,
        password_hash: String,
        salt: String,
    ) -> Result<UserIdentity, StoreError> {
        let mut identities = self.identities.write().map_err(poisoned)?;

        if identities.values().any(|identity| identity.email == email) {
            return Err(StoreError::AlreadyExists);
        }

        let identity = UserIdentity {
            id: UserId::new(),
            email,
            password_hash,
            salt,
        };
        identities.insert(identity.id, identity.clone());

        Ok(identity)
    }

    async fn update(&self, identity: UserIdentity) -> Result<UserIdentity, StoreError> {
        let mut identities = self.identities.write().map_err(poisoned)?;

        let entry = identities.get_mut(&identity.id).ok_or(StoreError::NotFound)?;
        *entry = identity.clone();

        Ok(identity)
    }

    async fn delete(&self, id: &UserId) -> Result<(), StoreError> {
        let mut identities = self.identities.write().map_err(poisoned)?;

        identities.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
