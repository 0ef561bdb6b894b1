use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::domain::CatalogError;
use crate::server::AppState;
use crate::services::authors::{self, AuthorInput};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, CatalogError> {
    let authors = authors::list_authors(&state.db).await?;
    Ok(Json(authors))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    let view = authors::author_detail(&state.db, id).await?;
    Ok(Json(view))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<AuthorInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let author = authors::create_author(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AuthorInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let author = authors::update_author(&state.db, id, payload).await?;
    Ok(Json(author))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    authors::delete_author(&state.db, id).await?;
    Ok(Json(json!({ "message": "Author deleted" })))
}
