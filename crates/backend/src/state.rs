use crate::domain::a001_catalog_entry::repository::{CatalogRepository, SeaOrmCatalogRepository};
use crate::system::auth::jwt::JwtKeys;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Общее состояние приложения, передаётся во все обработчики через `State`
#[derive(Clone)]
pub struct AppState {
    /// Пул соединений (пользователи, refresh-токены, настройки)
    pub db: DatabaseConnection,
    /// Хранилище каталога
    pub catalog: Arc<dyn CatalogRepository>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(db: DatabaseConnection, jwt: JwtKeys) -> Self {
        let catalog = Arc::new(SeaOrmCatalogRepository::new(db.clone()));
        Self { db, catalog, jwt }
    }

    /// Подменить хранилище каталога (тесты)
    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogRepository>) -> Self {
        self.catalog = catalog;
        self
    }
}
