use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::domain::CatalogError;
use crate::server::AppState;
use crate::services::books::{self, BookInput};
use crate::services::views;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, CatalogError> {
    let books = views::book_list(&state.db).await?;
    let total = books.len();
    Ok(Json(json!({ "books": books, "total": total })))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    let view = views::book_detail(&state.db, id).await?;
    Ok(Json(view))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    let view = views::book_form_view(&state.db, id).await?;
    Ok(Json(view))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<BookInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let book = books::create_book(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BookInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let book = books::update_book(&state.db, id, payload).await?;
    Ok(Json(book))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    books::delete_book(&state.db, id).await?;
    Ok(Json(json!({ "message": "Book deleted" })))
}
