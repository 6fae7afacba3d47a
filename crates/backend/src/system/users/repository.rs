use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::users::User;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, QueryResult, Statement};

const USER_COLUMNS: &str =
    "id, username, email, full_name, is_active, is_admin, created_at, updated_at, last_login_at";

fn from_row(row: &QueryResult) -> Result<User> {
    Ok(User {
        id: row.try_get("", "id")?,
        username: row.try_get("", "username")?,
        email: row.try_get("", "email")?,
        full_name: row.try_get("", "full_name")?,
        is_active: row.try_get::<i32>("", "is_active")? != 0,
        is_admin: row.try_get::<i32>("", "is_admin")? != 0,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
        last_login_at: row.try_get("", "last_login_at")?,
    })
}

/// Create user with password hash
pub async fn create_with_password(conn: &DatabaseConnection, user: &User, password_hash: &str) -> Result<()> {
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_users (id, username, email, password_hash, full_name, is_active, is_admin, created_at, updated_at, last_login_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        [
            user.id.clone().into(),
            user.username.clone().into(),
            user.email.clone().into(),
            password_hash.to_string().into(),
            user.full_name.clone().into(),
            (if user.is_active { 1 } else { 0 }).into(),
            (if user.is_admin { 1 } else { 0 }).into(),
            user.created_at.clone().into(),
            user.updated_at.clone().into(),
            user.last_login_at.clone().into(),
        ],
    ))
    .await
    .context("Failed to insert user")?;

    Ok(())
}

/// Get user by ID
pub async fn get_by_id(conn: &DatabaseConnection, id: &str) -> Result<Option<User>> {
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM sys_users WHERE id = ?", USER_COLUMNS),
            [id.into()],
        ))
        .await?;

    result.as_ref().map(from_row).transpose()
}

/// Get user by username
pub async fn get_by_username(conn: &DatabaseConnection, username: &str) -> Result<Option<User>> {
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM sys_users WHERE username = ?", USER_COLUMNS),
            [username.into()],
        ))
        .await?;

    result.as_ref().map(from_row).transpose()
}

/// Get password hash for user
pub async fn get_password_hash(conn: &DatabaseConnection, user_id: &str) -> Result<Option<String>> {
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM sys_users WHERE id = ?",
            [user_id.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let hash: String = row.try_get("", "password_hash")?;
            Ok(Some(hash))
        }
        None => Ok(None),
    }
}

pub async fn count_users(conn: &DatabaseConnection) -> Result<i64> {
    let row = conn
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS cnt FROM sys_users".to_string(),
        ))
        .await?
        .context("COUNT returned no rows")?;

    Ok(row.try_get("", "cnt")?)
}

pub async fn update_last_login(conn: &DatabaseConnection, user_id: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users SET last_login_at = ? WHERE id = ?",
        [now.into(), user_id.into()],
    ))
    .await?;

    Ok(())
}

// Refresh tokens: хранится только SHA-256 от значения токена

pub async fn store_refresh_token(
    conn: &DatabaseConnection,
    user_id: &str,
    token_hash: &str,
    expires_at: &str,
) -> Result<()> {
    let token_id = uuid::Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_refresh_tokens (id, user_id, token_hash, expires_at, created_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            token_id.into(),
            user_id.into(),
            token_hash.into(),
            expires_at.into(),
            created_at.into(),
        ],
    ))
    .await?;

    Ok(())
}

/// ID пользователя для действующего (не истёкшего и не отозванного) токена
pub async fn find_active_refresh_token(conn: &DatabaseConnection, token_hash: &str) -> Result<Option<String>> {
    let now = Utc::now().to_rfc3339();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT user_id FROM sys_refresh_tokens
             WHERE token_hash = ? AND expires_at > ? AND revoked_at IS NULL",
            [token_hash.into(), now.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(row.try_get("", "user_id")?)),
        None => Ok(None),
    }
}

pub async fn revoke_refresh_token(conn: &DatabaseConnection, token_hash: &str) -> Result<()> {
    let revoked_at = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_refresh_tokens SET revoked_at = ? WHERE token_hash = ? AND revoked_at IS NULL",
        [revoked_at.into(), token_hash.into()],
    ))
    .await?;

    Ok(())
}
