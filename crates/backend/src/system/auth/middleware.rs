use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use contracts::system::auth::TokenClaims;

use crate::shared::error::ApiError;
use crate::state::AppState;

/// Bearer-токен из заголовка Authorization
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<TokenClaims, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;

    state.jwt.validate_token(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {:#}", e);
        ApiError::Unauthorized
    })
}

/// Middleware that requires valid JWT authentication.
/// Запрос без сессии отклоняется до вызова обработчика.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, req.headers())?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires admin privileges
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, req.headers())?;

    if !claims.is_admin {
        return Err(ApiError::Forbidden);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }
}
