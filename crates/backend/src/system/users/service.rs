use anyhow::Result;
use chrono::Utc;
use contracts::system::users::{CreateUserDto, User};
use sea_orm::DatabaseConnection;

use super::repository;
use crate::system::auth::{jwt, password};

/// Create a new user
pub async fn create(conn: &DatabaseConnection, dto: CreateUserDto) -> Result<String> {
    if dto.username.trim().is_empty() {
        return Err(anyhow::anyhow!("Username cannot be empty"));
    }

    if repository::get_by_username(conn, &dto.username).await?.is_some() {
        return Err(anyhow::anyhow!("Username already exists"));
    }

    if let Some(ref email) = dto.email {
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(anyhow::anyhow!("Invalid email format"));
        }
    }

    password::validate_password_strength(&dto.password)?;
    let password_hash = password::hash_password(&dto.password)?;

    let user_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let user = User {
        id: user_id.clone(),
        username: dto.username,
        email: dto.email,
        full_name: dto.full_name,
        is_active: true,
        is_admin: dto.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    repository::create_with_password(conn, &user, &password_hash).await?;

    Ok(user_id)
}

/// Get user by ID
pub async fn get_by_id(conn: &DatabaseConnection, id: &str) -> Result<Option<User>> {
    repository::get_by_id(conn, id).await
}

/// Verify user credentials (for login).
/// `None`: неверный логин/пароль или учётная запись отключена.
pub async fn verify_credentials(conn: &DatabaseConnection, username: &str, password: &str) -> Result<Option<User>> {
    let user = match repository::get_by_username(conn, username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        tracing::warn!("Login attempt for inactive user '{}'", username);
        return Ok(None);
    }

    let password_hash = repository::get_password_hash(conn, &user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password, &password_hash)? {
        return Ok(None);
    }

    if let Err(e) = repository::update_last_login(conn, &user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.id, e);
    }

    Ok(Some(user))
}

/// Выдать refresh-токен: в БД сохраняется только его хеш
pub async fn issue_refresh_token(conn: &DatabaseConnection, user_id: &str) -> Result<String> {
    let token = jwt::generate_refresh_token();
    let expires_at = jwt::calculate_refresh_token_expiration();
    repository::store_refresh_token(conn, user_id, &hash_token(&token), &expires_at).await?;
    Ok(token)
}

/// Пользователь по действующему refresh-токену
pub async fn resolve_refresh_token(conn: &DatabaseConnection, token: &str) -> Result<Option<User>> {
    let Some(user_id) = repository::find_active_refresh_token(conn, &hash_token(token)).await? else {
        return Ok(None);
    };
    let user = repository::get_by_id(conn, &user_id).await?;
    Ok(user.filter(|u| u.is_active))
}

pub async fn revoke_refresh_token(conn: &DatabaseConnection, token: &str) -> Result<()> {
    repository::revoke_refresh_token(conn, &hash_token(token)).await
}

fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
