use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use std::sync::Arc;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;
const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 90;

const JWT_SECRET_KEY: &str = "jwt_secret";

/// Ключи подписи JWT. Создаются один раз на старте и разделяются через AppState.
#[derive(Clone)]
pub struct JwtKeys {
    inner: Arc<Keys>,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            inner: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
        }
    }

    /// Generate JWT access token with 24 hours lifetime
    pub fn generate_access_token(&self, user_id: &str, username: &str, is_admin: bool) -> Result<String> {
        let now = Utc::now();
        let exp = (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize;
        let iat = now.timestamp() as usize;

        let claims = TokenClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            is_admin,
            exp,
            iat,
        };

        self.encode(&claims)
    }

    pub fn encode(&self, claims: &TokenClaims) -> Result<String> {
        encode(&Header::default(), claims, &self.inner.encoding).context("Failed to encode JWT token")
    }

    /// Validate JWT token and extract claims (подпись и срок действия)
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims> {
        let token_data = decode::<TokenClaims>(token, &self.inner.decoding, &Validation::default())
            .context("Failed to decode JWT token")?;

        Ok(token_data.claims)
    }
}

/// Generate refresh token (UUID-based)
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Calculate refresh token expiration timestamp
pub fn calculate_refresh_token_expiration() -> String {
    let exp = Utc::now() + chrono::Duration::days(REFRESH_TOKEN_LIFETIME_DAYS);
    exp.to_rfc3339()
}

/// Секрет из конфигурации, иначе из sys_settings; при первом старте генерируется и сохраняется
pub async fn load_or_create_secret(conn: &DatabaseConnection, configured: Option<&str>) -> Result<String> {
    if let Some(secret) = configured.filter(|s| !s.trim().is_empty()) {
        tracing::info!("Using JWT secret from config.toml");
        return Ok(secret.to_string());
    }

    if let Some(secret) = get_jwt_secret_from_db(conn).await? {
        return Ok(secret);
    }

    let secret = generate_jwt_secret();
    save_jwt_secret_to_db(conn, &secret).await?;
    tracing::info!("Generated new JWT secret and stored it in sys_settings");
    Ok(secret)
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn get_jwt_secret_from_db(conn: &DatabaseConnection) -> Result<Option<String>> {
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [JWT_SECRET_KEY.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let secret: String = row.try_get("", "value")?;
            Ok(Some(secret))
        }
        None => Ok(None),
    }
}

async fn save_jwt_secret_to_db(conn: &DatabaseConnection, secret: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR REPLACE INTO sys_settings (key, value, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            JWT_SECRET_KEY.into(),
            secret.to_string().into(),
            "Auto-generated JWT secret for authentication".into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db;

    #[test]
    fn test_token_roundtrip_keeps_claims() {
        let keys = JwtKeys::from_secret(b"test-secret");
        let token = keys.generate_access_token("u-1", "alice", true).unwrap();
        let claims = keys.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.username, "alice");
        assert!(claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let token = JwtKeys::from_secret(b"one")
            .generate_access_token("u-1", "alice", false)
            .unwrap();
        assert!(JwtKeys::from_secret(b"two").validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = JwtKeys::from_secret(b"test-secret");
        let past = (Utc::now() - chrono::Duration::hours(2)).timestamp() as usize;
        let token = keys
            .encode(&TokenClaims {
                sub: "u-1".into(),
                username: "alice".into(),
                is_admin: false,
                exp: past,
                iat: past - 60,
            })
            .unwrap();
        assert!(keys.validate_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_secret_is_persisted_once() {
        let conn = db::memory().await;
        let first = load_or_create_secret(&conn, None).await.unwrap();
        let second = load_or_create_secret(&conn, None).await.unwrap();
        assert_eq!(first, second);

        let configured = load_or_create_secret(&conn, Some("from-config")).await.unwrap();
        assert_eq!(configured, "from-config");
    }
}
