use axum::body::to_bytes;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

/// Форматирование числа с разделителями триад: 1234567 -> "1.234.567"
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Голубой для успешных ответов, коричневый для остальных
fn color_code(status: StatusCode) -> &'static str {
    if status.is_success() {
        "36"
    } else {
        "33"
    }
}

/// Middleware для логирования HTTP запросов
///
/// Одна строка в консоль на запрос: время, длительность, размер тела,
/// статус, метод и путь. Query-строка не выводится.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let (size, body) = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => (format_number(bytes.len()), Body::from(bytes)),
        Err(e) => {
            tracing::warn!("Failed to buffer response body for {}: {}", path, e);
            ("error".to_string(), Body::default())
        }
    };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_code(parts.status),
        Local::now().format("%H:%M:%S"),
        start.elapsed().as_millis(),
        size,
        parts.status.as_u16(),
        method,
        path
    );

    Response::from_parts(parts, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_groups_triads() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn test_color_code() {
        assert_eq!(color_code(StatusCode::OK), "36");
        assert_eq!(color_code(StatusCode::UNAUTHORIZED), "33");
    }
}
