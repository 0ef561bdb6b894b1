use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::domain::CatalogError;
use crate::server::AppState;
use crate::services::views;

/// Home page data: cross-entity counts plus the approximate visit counter.
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, CatalogError> {
    let summary = views::library_summary(&state.db).await?;
    let visits = state.visits.record_visit().await;

    Ok(Json(json!({
        "title": "Local Library Home",
        "counts": summary,
        "visits": visits,
    })))
}
