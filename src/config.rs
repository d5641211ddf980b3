use anyhow::Context;
use std::net::SocketAddr;

/// Account created by the first-administrator bootstrap
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl Default for BootstrapAdmin {
    fn default() -> Self {
        Self {
            email: "adm1@sistema.com".to_string(),
            password: "adm111".to_string(),
            full_name: "Administrador".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub jwt_secret: String,
    pub bootstrap_admin: BootstrapAdmin,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env_or("HOST", "0.0.0.0");
        let port = env_or("PORT", "5000")
            .parse::<u16>()
            .context("PORT must be a number between 0 and 65535")?;

        let bind_address = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

        let database_url = env_or("DATABASE_URL", "sqlite:overtime.db");

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, generated a random secret; tokens will not survive a restart");
            random_secret()
        });

        let defaults = BootstrapAdmin::default();
        let bootstrap_admin = BootstrapAdmin {
            email: env_or("ADMIN_EMAIL", &defaults.email),
            password: env_or("ADMIN_PASSWORD", &defaults.password),
            full_name: env_or("ADMIN_FULL_NAME", &defaults.full_name),
        };

        Ok(Self {
            database_url,
            bind_address,
            jwt_secret,
            bootstrap_admin,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn random_secret() -> String {
    use base64::Engine;
    use rand::Rng;

    let bytes: [u8; 32] = rand::thread_rng().gen();
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_secrets_differ() {
        let a = random_secret();
        let b = random_secret();
        assert_ne!(a, b);
        assert_eq!(a.len(), 44);
    }

    #[test]
    fn bootstrap_defaults() {
        let admin = BootstrapAdmin::default();
        assert_eq!(admin.email, "adm1@sistema.com");
        assert!(admin.password.len() >= crate::models::MIN_PASSWORD_LENGTH);
    }
}
