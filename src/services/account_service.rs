use crate::auth::{verify_password, Claims};
use crate::models::{Caller, Credentials, NewAccount, Role, ServiceError, UserProfile};
use crate::repositories::{AccountRepository, RoleRepository};
use std::sync::Arc;
use uuid::Uuid;

pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { accounts, roles }
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Credentials, ServiceError> {
        let invalid = || ServiceError::Unauthenticated("Invalid credentials".to_string());

        if email.trim().is_empty() || password.is_empty() {
            return Err(invalid());
        }

        let credentials = self
            .accounts
            .find_credentials_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &credentials.password_hash) {
            tracing::warn!(email = %credentials.email, "Rejected login with wrong password");
            return Err(invalid());
        }

        Ok(credentials)
    }

    /// Turns verified token claims into the request's actor, with the role as stored now.
    pub async fn resolve_caller(&self, claims: &Claims) -> Result<Caller, ServiceError> {
        let user_id = claims.user_id()?;
        let profile = self
            .accounts
            .find_profile(user_id)
            .await?
            .ok_or_else(|| ServiceError::Unauthenticated("Account no longer exists".to_string()))?;

        Ok(Caller {
            id: profile.id,
            email: profile.email,
            role: profile.role,
        })
    }

    pub async fn current_profile(&self, caller: &Caller) -> Result<UserProfile, ServiceError> {
        self.find_existing(caller.id).await
    }

    pub async fn list_users(&self, caller: &Caller) -> Result<Vec<UserProfile>, ServiceError> {
        caller.require_admin()?;
        self.accounts.list_profiles().await
    }

    pub async fn create_user(
        &self,
        caller: &Caller,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<Uuid, ServiceError> {
        caller.require_admin()?;

        let account = NewAccount::new(email, password, full_name, role)?;
        self.accounts.create_account(&account).await?;

        tracing::info!(user_id = %account.id, email = %account.email, role = %role, "User created");
        Ok(account.id)
    }

    /// Updates the display name and, when given, the role of a profile.
    /// Both changes land in one transaction; unchanged values are not written.
    pub async fn update_user(
        &self,
        caller: &Caller,
        user_id: Uuid,
        full_name: &str,
        role: Option<Role>,
    ) -> Result<(), ServiceError> {
        caller.require_admin()?;

        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(ServiceError::ValidationFailed("Full name is required".to_string()));
        }

        let profile = self.find_existing(user_id).await?;

        let name_change = (profile.full_name != full_name).then_some(full_name);
        let role_change = role.filter(|role| profile.role != Some(*role));
        if name_change.is_none() && role_change.is_none() {
            tracing::debug!(user_id = %user_id, "Profile unchanged, skipping write");
            return Ok(());
        }

        self.accounts
            .update_profile(user_id, name_change, role_change)
            .await?;

        tracing::info!(
            user_id = %user_id,
            renamed = name_change.is_some(),
            from = ?profile.role,
            to = ?role_change,
            "Profile updated"
        );
        Ok(())
    }

    /// Gives `user_id` exactly one role. Returns whether anything was written.
    pub async fn assign_role(
        &self,
        caller: &Caller,
        user_id: Uuid,
        role: Role,
    ) -> Result<bool, ServiceError> {
        caller.require_admin()?;

        let profile = self.find_existing(user_id).await?;
        if profile.role == Some(role) {
            tracing::debug!(user_id = %user_id, role = %role, "Role unchanged, skipping write");
            return Ok(false);
        }

        self.roles.replace_role(user_id, role).await?;
        tracing::info!(user_id = %user_id, from = ?profile.role, to = %role, "Role replaced");
        Ok(true)
    }

    async fn find_existing(&self, user_id: Uuid) -> Result<UserProfile, ServiceError> {
        self.accounts
            .find_profile(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }
}
