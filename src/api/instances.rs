use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::domain::CatalogError;
use crate::server::AppState;
use crate::services::instances::{self, InstanceInput};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, CatalogError> {
    let instances = instances::list_instances(&state.db).await?;
    Ok(Json(instances))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    let view = instances::instance_detail(&state.db, id).await?;
    Ok(Json(view))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<InstanceInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let instance = instances::create_instance(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(instance)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<InstanceInput>,
) -> Result<impl IntoResponse, CatalogError> {
    let instance = instances::update_instance(&state.db, id, payload).await?;
    Ok(Json(instance))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    instances::delete_instance(&state.db, id).await?;
    Ok(Json(json!({ "message": "Book instance deleted" })))
}
