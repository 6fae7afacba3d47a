#![allow(clippy::too_many_arguments)]

pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod state;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::{ServeDir, ServeFile};

    // Initialize tracing (stdout + logs/backend.log)
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;

    // Initialize database (schema bootstrap is idempotent)
    let db_path = shared::config::get_database_path(&config);
    let conn = shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // Ensure admin user exists
    system::initialization::ensure_admin_user_exists(&conn).await?;

    let secret =
        system::auth::jwt::load_or_create_secret(&conn, config.auth.jwt_secret.as_deref()).await?;
    let jwt = system::auth::jwt::JwtKeys::from_secret(secret.as_bytes());

    let app_state = state::AppState::new(conn, jwt);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    // Собранный фронтенд (trunk dist); неизвестные пути отдают index.html для роутера SPA
    let static_dir = shared::config::get_static_dir(&config);
    tracing::info!("Serving static files from: {}", static_dir.display());
    let spa = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let app = routes::configure_routes(app_state)
        .fallback_service(spa)
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let addr: SocketAddr = config.server.bind_address().parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("StreamZen backend listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
