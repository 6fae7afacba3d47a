use axum::{extract::State, http::StatusCode, Json};
use contracts::system::auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo};

use crate::shared::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::system::auth::extractor::SessionContext;
use crate::system::users::service as user_service;

/// POST /api/system/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = user_service::verify_credentials(&state.db, &request.username, &request.password)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let access_token = state
        .jwt
        .generate_access_token(&user.id, &user.username, user.is_admin)?;
    let refresh_token = user_service::issue_refresh_token(&state.db, &user.id).await?;

    tracing::info!("User '{}' signed in", user.username);

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        user: user.to_info(),
    }))
}

/// POST /api/system/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let user = user_service::resolve_refresh_token(&state.db, &request.refresh_token)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let access_token = state
        .jwt
        .generate_access_token(&user.id, &user.username, user.is_admin)?;

    Ok(Json(RefreshResponse { access_token }))
}

/// POST /api/system/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<StatusCode> {
    user_service::revoke_refresh_token(&state.db, &request.refresh_token).await?;
    Ok(StatusCode::OK)
}

/// GET /api/system/auth/me (protected by middleware)
pub async fn current_user(
    State(state): State<AppState>,
    SessionContext(claims): SessionContext,
) -> ApiResult<Json<UserInfo>> {
    let user = user_service::get_by_id(&state.db, &claims.sub)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(user.to_info()))
}
