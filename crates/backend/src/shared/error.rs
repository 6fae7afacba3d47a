use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::error::ErrorBody;

/// Ошибка HTTP-слоя. Любая ошибка завершает запрос, повторов нет.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Нет сессии или токен невалиден/истёк
    #[error("Authentication required")]
    Unauthorized,

    #[error("Admin privileges required")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    /// Сбой хранилища или непредвиденная ошибка. Детали только в лог.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (self.status(), Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_internal_error_does_not_leak_details() {
        let (status, body) =
            body_of(ApiError::from(anyhow::anyhow!("disk I/O error at /var/db"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
    }

    #[tokio::test]
    async fn test_client_errors_carry_messages() {
        let (status, body) = body_of(ApiError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error, "Authentication required");

        let (status, body) = body_of(ApiError::NotFound("Content")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Content not found");

        let (status, _) = body_of(ApiError::Validation("bad".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
