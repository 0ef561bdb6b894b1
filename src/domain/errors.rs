//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The `IntoResponse` impl is the single place they meet HTTP.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// A row that blocks a guarded delete, echoed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct Dependent {
    pub id: i32,
    pub label: String,
}

#[derive(Debug)]
pub enum CatalogError {
    /// Requested entity id has no matching row
    NotFound,
    /// Insert/update references a nonexistent foreign key
    ReferentialIntegrity(String),
    /// Delete refused because dependent rows exist
    Conflict {
        reason: String,
        dependents: Vec<Dependent>,
    },
    /// Connection or query failure unrelated to input
    Store(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound => write!(f, "Resource not found"),
            CatalogError::ReferentialIntegrity(msg) => {
                write!(f, "Referential integrity error: {}", msg)
            }
            CatalogError::Conflict { reason, dependents } => {
                write!(f, "Conflict: {} ({} dependent rows)", reason, dependents.len())
            }
            CatalogError::Store(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(e: sea_orm::DbErr) -> Self {
        CatalogError::Store(e.to_string())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            CatalogError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Resource not found" })),
            )
                .into_response(),
            CatalogError::ReferentialIntegrity(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            CatalogError::Conflict { reason, dependents } => (
                StatusCode::CONFLICT,
                Json(json!({ "error": reason, "dependents": dependents })),
            )
                .into_response(),
            CatalogError::Store(msg) => {
                tracing::error!("store failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
