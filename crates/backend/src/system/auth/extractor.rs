use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::TokenClaims;

use crate::shared::error::ApiError;

/// Сессия вызывающего, явно передаваемая в обработчик.
///
/// Заполняется middleware `require_auth` / `require_admin`.
/// Usage in handlers: `async fn handler(SessionContext(claims): SessionContext) -> Response`
#[derive(Debug, Clone)]
pub struct SessionContext(pub TokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(SessionContext)
            .ok_or(ApiError::Unauthorized)
    }
}
