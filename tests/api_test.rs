use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sea_orm::{ConnectOptions, DatabaseConnection, EntityTrait, Set};
use tower::ServiceExt;

use athenaeum::db;
use athenaeum::domain::CatalogError;
use athenaeum::models::{author, book};
use athenaeum::server::{build_router, AppState};
use athenaeum::services::visit_counter::{CounterStore, VisitCounter};

struct FakeStore {
    counts: Mutex<HashMap<String, i64>>,
}

impl FakeStore {
    fn new() -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CounterStore for FakeStore {
    async fn increment(&self, key: &str) -> Result<i64, CatalogError> {
        let mut counts = self.counts.lock().unwrap();
        let count = counts.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CatalogError> {
        let counts = self.counts.lock().unwrap();
        Ok(counts.get(key).map(|c| c.to_string()))
    }
}

async fn setup_test_app() -> (Router, DatabaseConnection) {
    // Single connection so every query sees the same in-memory database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = db::init_db(options).await.expect("Failed to init DB");

    let state = AppState {
        db: db.clone(),
        visits: VisitCounter::new(Arc::new(FakeStore::new())),
    };
    (build_router(state, &[]), db)
}

async fn create_test_author(db: &DatabaseConnection) -> i32 {
    let author = author::ActiveModel {
        first_name: Set("Isaac".to_string()),
        family_name: Set("Asimov".to_string()),
        date_of_birth: Set(None),
        date_of_death: Set(None),
        ..Default::default()
    };
    author::Entity::insert(author)
        .exec(db)
        .await
        .expect("Failed to create author")
        .last_insert_id
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

#[tokio::test]
async fn health_check_responds_ok() {
    let (app, _db) = setup_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_book_maps_to_404() {
    let (app, _db) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/catalog/books/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_author_reference_maps_to_400_and_inserts_nothing() {
    let (app, db) = setup_test_app().await;

    let payload = serde_json::json!({
        "title": "Foundation",
        "summary": "A test summary",
        "isbn": "9780553293357",
        "author_id": 999,
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/catalog/books")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(book::Entity::find().one(&db).await.unwrap().is_none());
}

#[tokio::test]
async fn guarded_author_delete_maps_to_409_with_dependents() {
    let (app, db) = setup_test_app().await;
    let author_id = create_test_author(&db).await;

    let payload = serde_json::json!({
        "title": "Foundation",
        "summary": "A test summary",
        "isbn": "9780553293357",
        "author_id": author_id,
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/catalog/books")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/catalog/authors/{}", author_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["dependents"][0]["label"], "Foundation");
}

#[tokio::test]
async fn home_page_reports_counts_and_visits() {
    let (app, db) = setup_test_app().await;
    let author_id = create_test_author(&db).await;
    let book = book::ActiveModel {
        title: Set("Foundation".to_string()),
        summary: Set("A test summary".to_string()),
        isbn: Set("9780553293357".to_string()),
        author_id: Set(author_id),
        genre_id: Set(None),
        ..Default::default()
    };
    book::Entity::insert(book).exec(&db).await.unwrap();

    for expected_visits in 1..=2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/catalog/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["counts"]["book_count"], 1);
        assert_eq!(body["counts"]["author_count"], 1);
        assert_eq!(body["visits"], expected_visits);
    }
}
