use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Схема БД. Каждая команда идемпотентна, поэтому bootstrap выполняется на каждом старте.
const SCHEMA: &[&str] = &[
    // a001_catalog_entry
    r#"
    CREATE TABLE IF NOT EXISTS a001_catalog_entry (
        id TEXT PRIMARY KEY NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        content_type TEXT NOT NULL CHECK (content_type IN ('movie', 'tv-show')),
        release_year INTEGER NOT NULL,
        duration INTEGER NOT NULL,
        rating REAL NOT NULL DEFAULT 0 CHECK (rating >= 0 AND rating <= 10),
        poster_url TEXT NOT NULL,
        video_url TEXT NOT NULL,
        featured INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    // Теги жанров: одна строка на тег, position сохраняет порядок для отображения
    r#"
    CREATE TABLE IF NOT EXISTS a001_catalog_entry_genre (
        entry_id TEXT NOT NULL REFERENCES a001_catalog_entry(id) ON DELETE CASCADE,
        position INTEGER NOT NULL,
        genre TEXT NOT NULL,
        PRIMARY KEY (entry_id, position)
    );
    "#,
    // Индекс по названию и описанию пока не используется запросами списка
    "CREATE INDEX IF NOT EXISTS idx_a001_catalog_entry_text ON a001_catalog_entry (title, description);",
    "CREATE INDEX IF NOT EXISTS idx_a001_catalog_entry_type ON a001_catalog_entry (content_type);",
    "CREATE INDEX IF NOT EXISTS idx_a001_catalog_entry_featured ON a001_catalog_entry (featured);",
    "CREATE INDEX IF NOT EXISTS idx_a001_catalog_entry_created ON a001_catalog_entry (created_at);",
    "CREATE INDEX IF NOT EXISTS idx_a001_catalog_entry_genre ON a001_catalog_entry_genre (genre);",
    // System: users, refresh tokens, settings
    r#"
    CREATE TABLE IF NOT EXISTS sys_users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        email TEXT,
        password_hash TEXT NOT NULL,
        full_name TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        is_admin INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        last_login_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
        id TEXT PRIMARY KEY NOT NULL,
        user_id TEXT NOT NULL REFERENCES sys_users(id) ON DELETE CASCADE,
        token_hash TEXT NOT NULL UNIQUE,
        expires_at TEXT NOT NULL,
        created_at TEXT NOT NULL,
        revoked_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sys_settings (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
];

/// Открыть (или создать) файл БД и применить схему
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Connecting to database: {}", absolute_path.display());
    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for sql in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.trim().to_string(),
        ))
        .await?;
    }

    tracing::debug!("Database schema is up to date ({} statements)", SCHEMA.len());
    Ok(())
}

/// Отдельная БД в памяти на одном соединении (для тестов)
#[cfg(test)]
pub async fn memory() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await.expect("in-memory sqlite");
    bootstrap_schema(&conn).await.expect("schema bootstrap");
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let conn = memory().await;
        bootstrap_schema(&conn).await.unwrap();

        let rows = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_a001_%'"
                    .to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(rows.len(), 5);
    }
}
