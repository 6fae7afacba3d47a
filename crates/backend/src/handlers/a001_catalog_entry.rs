use axum::{
    extract::{Path, Query, State},
    Json,
};
use contracts::domain::a001_catalog_entry::aggregate::{CatalogEntry, CatalogEntryDto};
use contracts::domain::a001_catalog_entry::query::CatalogQuery;
use serde_json::json;

use crate::domain::a001_catalog_entry::service::{self, ValidationError};
use crate::shared::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::system::auth::extractor::SessionContext;

/// GET /api/content?type=&genre=&year=
///
/// Параметры читаются как пары: при повторе ключа действует первое значение.
pub async fn list(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Vec<CatalogEntry>>> {
    let query = CatalogQuery::from_pairs(pairs);
    let entries = service::list(state.catalog.as_ref(), &query)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching content for '{}': {:#}", session.username, e);
            ApiError::Internal(e)
        })?;

    Ok(Json(entries))
}

/// GET /api/content/featured (public)
pub async fn list_featured(State(state): State<AppState>) -> ApiResult<Json<Vec<CatalogEntry>>> {
    let entries = service::list_featured(state.catalog.as_ref()).await?;
    Ok(Json(entries))
}

/// GET /api/content/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CatalogEntry>> {
    service::get_by_id(state.catalog.as_ref(), &id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Content"))
}

/// POST /api/content (admin)
pub async fn create(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
    Json(dto): Json<CatalogEntryDto>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = service::create(state.catalog.as_ref(), dto)
        .await
        .map_err(|e| match e.downcast::<ValidationError>() {
            Ok(ValidationError(message)) => ApiError::Validation(message),
            Err(e) => ApiError::Internal(e),
        })?;

    tracing::info!("Catalog entry {} created by '{}'", id, session.username);
    Ok(Json(json!({ "id": id.to_string() })))
}

/// POST /api/content/testdata (admin)
pub async fn insert_test_data(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let inserted = service::insert_test_data(state.catalog.as_ref()).await?;
    Ok(Json(json!({ "inserted": inserted })))
}
