use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::system::auth::middleware::{require_admin, require_auth};
use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let auth = || middleware::from_fn_with_state(state.clone(), require_auth);
    let admin = || middleware::from_fn_with_state(state.clone(), require_admin);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user).route_layer(auth()),
        )
        // ========================================
        // A001 CATALOG
        // ========================================
        .route(
            "/api/content",
            get(handlers::a001_catalog_entry::list)
                .route_layer(auth())
                .merge(post(handlers::a001_catalog_entry::create).route_layer(admin())),
        )
        .route(
            "/api/content/featured",
            get(handlers::a001_catalog_entry::list_featured),
        )
        .route(
            "/api/content/testdata",
            post(handlers::a001_catalog_entry::insert_test_data).route_layer(admin()),
        )
        .route(
            "/api/content/:id",
            get(handlers::a001_catalog_entry::get_by_id).route_layer(auth()),
        )
        .with_state(state)
}
