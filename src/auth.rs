use actix_web::HttpRequest;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ServiceError;

pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (account id)
    pub email: String,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued at
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, ServiceError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| ServiceError::Unauthenticated("Invalid token subject".to_string()))
    }
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn generate_token(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_in = Duration::hours(TOKEN_TTL_HOURS);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: (now + expires_in).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn verify_token(
        &self,
        token: &str,
    ) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
    }
}

pub fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    let auth_header = req
        .headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;

    // Swagger UI sometimes doubles the scheme
    let token = auth_header.strip_prefix("bearer ").unwrap_or(auth_header).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

pub fn verify_jwt(req: &HttpRequest, jwt_manager: &JwtManager) -> Result<Claims, ServiceError> {
    let token = extract_token_from_header(req)
        .ok_or_else(|| ServiceError::Unauthenticated("Missing Authorization header".to_string()))?;

    jwt_manager
        .verify_token(&token)
        .map(|token_data| token_data.claims)
        .map_err(|_| ServiceError::Unauthenticated("Invalid token".to_string()))
}

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// False on mismatch or an unparseable stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn token_round_trip_keeps_subject() {
        let manager = JwtManager::new("test_secret_key");
        let user_id = Uuid::new_v4();

        let token = manager.generate_token(user_id, "ana@example.com").unwrap();
        let claims = manager.verify_token(&token).unwrap().claims;

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email, "ana@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = JwtManager::new("one")
            .generate_token(Uuid::new_v4(), "ana@example.com")
            .unwrap();
        assert!(JwtManager::new("two").verify_token(&token).is_err());
    }

    #[test]
    fn bearer_header_is_required() {
        let manager = JwtManager::new("test_secret_key");

        let req = TestRequest::default().to_http_request();
        assert!(matches!(verify_jwt(&req, &manager), Err(ServiceError::Unauthenticated(_))));

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic abc"))
            .to_http_request();
        assert!(extract_token_from_header(&req).is_none());

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer bearer abc"))
            .to_http_request();
        assert_eq!(extract_token_from_header(&req).as_deref(), Some("abc"));
    }

    #[test]
    fn password_hash_rejects_other_passwords() {
        let hash = hash_password("adm111").unwrap();
        assert!(verify_password("adm111", &hash));
        assert!(!verify_password("adm112", &hash));
        assert!(!verify_password("adm111", "not-a-phc-string"));
    }
}
