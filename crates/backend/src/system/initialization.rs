use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::system::users::{repository, service};
use contracts::system::users::CreateUserDto;

/// Ensure admin user exists (create if table is empty)
pub async fn ensure_admin_user_exists(conn: &DatabaseConnection) -> Result<()> {
    let count = repository::count_users(conn).await?;

    if count == 0 {
        tracing::info!("No users found. Creating default admin user...");

        let admin_dto = CreateUserDto {
            username: "admin".to_string(),
            password: "admin".to_string(),
            email: None,
            full_name: Some("Administrator".to_string()),
            is_admin: true,
        };

        let admin_id = service::create(conn, admin_dto).await?;

        tracing::warn!("═══════════════════════════════════════════════");
        tracing::warn!("  Default admin user created!");
        tracing::warn!("  Username: admin");
        tracing::warn!("  Password: admin");
        tracing::warn!("  User ID: {}", admin_id);
        tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
        tracing::warn!("═══════════════════════════════════════════════");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db;

    #[tokio::test]
    async fn test_admin_is_created_once() {
        let conn = db::memory().await;
        ensure_admin_user_exists(&conn).await.unwrap();
        ensure_admin_user_exists(&conn).await.unwrap();
        assert_eq!(repository::count_users(&conn).await.unwrap(), 1);

        let admin = service::verify_credentials(&conn, "admin", "admin")
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_admin);
    }
}
