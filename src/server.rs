// Router assembly shared by the binary and the tests.

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::services::visit_counter::VisitCounter;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub visits: VisitCounter,
}

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let mut origins = Vec::new();
        for origin in allowed_origins {
            match origin.parse::<HeaderValue>() {
                Ok(v) => origins.push(v),
                Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
            }
        }
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/health", get(api::health::health_check))
        // axum strips the nest prefix, so the nested `/` route only answers
        // `/catalog`; wire the home handler to `/catalog/` as well so the
        // trailing-slash form the catalog is served under also resolves.
        .route("/catalog/", get(api::home::index))
        .nest("/catalog", api::catalog_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
