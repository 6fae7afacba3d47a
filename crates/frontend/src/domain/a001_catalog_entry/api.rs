use contracts::domain::a001_catalog_entry::aggregate::CatalogEntry;
use contracts::domain::a001_catalog_entry::query::CatalogQuery;

use crate::shared::api_utils::{get_json, get_json_authorized, FetchError};

/// Путь запроса списка: `/api/content?type=..&genre=..&year=..`
pub fn catalog_path(query: &CatalogQuery) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to encode filters: {}", e))?;
    if qs.is_empty() {
        Ok("/api/content".to_string())
    } else {
        Ok(format!("/api/content?{}", qs))
    }
}

/// GET /api/content
pub async fn fetch_catalog(access_token: &str, query: &CatalogQuery) -> Result<Vec<CatalogEntry>, FetchError> {
    let path = catalog_path(query).map_err(FetchError::Failed)?;
    get_json_authorized(&path, access_token).await
}

/// GET /api/content/:id
pub async fn fetch_by_id(access_token: &str, id: &str) -> Result<CatalogEntry, FetchError> {
    get_json_authorized(&format!("/api/content/{}", id), access_token).await
}

/// GET /api/content/featured (без авторизации)
pub async fn fetch_featured() -> Result<Vec<CatalogEntry>, String> {
    get_json("/api/content/featured").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_path_encodes_filters() {
        let path = catalog_path(&CatalogQuery::new("tv-show", "sci-fi", "2024")).unwrap();
        assert_eq!(path, "/api/content?type=tv-show&genre=sci-fi&year=2024");
    }

    #[test]
    fn test_catalog_path_without_filters() {
        assert_eq!(catalog_path(&CatalogQuery::default()).unwrap(), "/api/content");
    }
}
