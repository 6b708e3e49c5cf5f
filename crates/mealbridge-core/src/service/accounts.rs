//! Account profile operations.
//!
//! Sign-up and sign-in belong to the auth provider; this service only
//! manages the profile row keyed by the provider-issued user id.

use std::sync::Arc;

use crate::domain::{User, UserType};
use crate::error::DomainError;
use crate::ports::{UserPatch, UserStore};
use crate::service::require_actor;

pub struct Accounts {
    users: Arc<dyn UserStore>,
}

impl Accounts {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Insert the profile row right after the provider signed the user up.
    pub async fn register_profile(&self, user: User) -> Result<(), DomainError> {
        require_actor(&user.user_id)?;
        self.users.insert(user).await?;
        Ok(())
    }

    pub async fn user(&self, user_id: &str) -> Result<User, DomainError> {
        require_actor(user_id)?;
        self.users
            .find(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "user",
                id: user_id.to_string(),
            })
    }

    /// Pick a role during onboarding. Re-running is allowed.
    pub async fn set_user_type(
        &self,
        user_id: &str,
        user_type: UserType,
    ) -> Result<(), DomainError> {
        require_actor(user_id)?;
        self.users
            .apply(
                user_id,
                UserPatch {
                    user_type: Some(user_type),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    /// Persist a refreshed push token for the user's device.
    pub async fn save_push_token(&self, user_id: &str, token: &str) -> Result<(), DomainError> {
        require_actor(user_id)?;
        self.users
            .apply(
                user_id,
                UserPatch {
                    fcm_token: Some(token.to_string()),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }
}
