use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::domain::CatalogError;
use crate::server::AppState;
use crate::services::tags::{self, TagInput};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, CatalogError> {
    let tags = tags::list_tags(&state.db).await?;
    Ok(Json(tags))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    let view = tags::tag_detail(&state.db, id).await?;
    Ok(Json(view))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TagInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let tag = tags::create_tag(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<TagInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let tag = tags::update_tag(&state.db, id, payload).await?;
    Ok(Json(tag))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    tags::delete_tag(&state.db, id).await?;
    Ok(Json(json!({ "message": "Tag deleted" })))
}
