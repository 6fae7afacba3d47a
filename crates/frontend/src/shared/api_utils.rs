//! API utilities for frontend-backend communication
//!
//! Помощники без сессии возвращают `Result<T, String>`: текст ошибки уходит в лог
//! или в UI как есть. Запросы с bearer-токеном возвращают `FetchError`, чтобы
//! вызывающий мог отличить отклонённую сессию от прочих сбоев.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Ошибка запроса к API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// 401: сервер не принял токен сессии
    Unauthorized,
    Failed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Unauthorized => f.write_str("Authentication required"),
            FetchError::Failed(message) => f.write_str(message),
        }
    }
}

impl From<FetchError> for String {
    fn from(e: FetchError) -> Self {
        e.to_string()
    }
}

/// Неуспешный статус в ошибку: 401 выделяется отдельно
pub fn status_error(context: &str, status: u16, message: &str) -> FetchError {
    if status == 401 {
        FetchError::Unauthorized
    } else {
        FetchError::Failed(format!("{} failed: {} {}", context, status, message))
    }
}

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// ```rust,ignore
/// let url = api_url("/api/content/featured");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn bearer(access_token: &str) -> String {
    format!("Bearer {}", access_token)
}

/// Статус-код в текст ошибки; тело `{"error": ...}` используется, если оно есть
async fn ensure_ok(response: Response, context: &str) -> Result<Response, FetchError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response
        .json::<contracts::shared::error::ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| response.status_text());
    Err(status_error(context, status, &message))
}

/// GET без авторизации
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = Request::get(&api_url(path))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    ensure_ok(response, "Request")
        .await?
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// GET с bearer-токеном сессии
pub async fn get_json_authorized<T: DeserializeOwned>(path: &str, access_token: &str) -> Result<T, FetchError> {
    let response = Request::get(&api_url(path))
        .header("Authorization", &bearer(access_token))
        .send()
        .await
        .map_err(|e| FetchError::Failed(format!("Failed to send request: {}", e)))?;

    ensure_ok(response, "Request")
        .await?
        .json::<T>()
        .await
        .map_err(|e| FetchError::Failed(format!("Failed to parse response: {}", e)))
}

/// POST JSON; `context` попадает в текст ошибки ("Login failed: 401 ...")
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B, context: &str) -> Result<T, String> {
    let response = send_post(path, body).await?;
    ensure_ok(response, context)
        .await?
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// POST JSON без тела ответа
pub async fn post_json_unit<B: Serialize>(path: &str, body: &B, context: &str) -> Result<(), String> {
    let response = send_post(path, body).await?;
    ensure_ok(response, context).await?;
    Ok(())
}

async fn send_post<B: Serialize>(path: &str, body: &B) -> Result<Response, String> {
    Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_session_is_distinct() {
        assert_eq!(status_error("Request", 401, "Authentication required"), FetchError::Unauthorized);
        assert_eq!(
            status_error("Request", 404, "Content not found"),
            FetchError::Failed("Request failed: 404 Content not found".into())
        );
        assert_eq!(
            String::from(status_error("Login", 500, "Internal server error")),
            "Login failed: 500 Internal server error"
        );
    }
}
