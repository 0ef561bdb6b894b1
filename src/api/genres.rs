use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::domain::CatalogError;
use crate::server::AppState;
use crate::services::genres::{self, GenreInput};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, CatalogError> {
    let genres = genres::list_genres(&state.db).await?;
    Ok(Json(genres))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    let view = genres::genre_detail(&state.db, id).await?;
    Ok(Json(view))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<GenreInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let genre = genres::create_genre(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<GenreInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let genre = genres::update_genre(&state.db, id, payload).await?;
    Ok(Json(genre))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    genres::delete_genre(&state.db, id).await?;
    Ok(Json(json!({ "message": "Genre deleted" })))
}
