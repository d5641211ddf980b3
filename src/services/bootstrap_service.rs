use crate::config::BootstrapAdmin;
use crate::models::{NewAccount, Role, ServiceError};
use crate::repositories::PrivilegedStore;
use std::sync::Arc;

/// First-administrator setup. Holds the only handle to the privileged store.
pub struct BootstrapService {
    store: Arc<dyn PrivilegedStore>,
    admin: BootstrapAdmin,
}

impl BootstrapService {
    pub fn new(store: Arc<dyn PrivilegedStore>, admin: BootstrapAdmin) -> Self {
        Self { store, admin }
    }

    pub async fn admin_exists(&self) -> Result<bool, ServiceError> {
        self.store.admin_exists().await
    }

    /// Creates the predetermined administrator and returns its email.
    /// Fails with `AlreadyExists` once any administrator exists.
    pub async fn create_first_admin(&self) -> Result<String, ServiceError> {
        if self.store.admin_exists().await? {
            return Err(ServiceError::AlreadyExists("Admin user already exists".to_string()));
        }

        let account = NewAccount::new(
            &self.admin.email,
            &self.admin.password,
            &self.admin.full_name,
            Role::Admin,
        )?;

        // The store re-checks inside its transaction
        self.store.create_first_admin(&account).await.map_err(|e| {
            tracing::error!("Error creating first admin user: {}", e);
            e
        })?;

        tracing::info!(email = %account.email, "First admin user created successfully");
        Ok(account.email)
    }
}
