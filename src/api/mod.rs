pub mod authors;
pub mod books;
pub mod genres;
pub mod health;
pub mod home;
pub mod instances;
pub mod tags;

use axum::routing::get;
use axum::Router;

use crate::server::AppState;

pub fn catalog_router() -> Router<AppState> {
    Router::new()
        // Home
        .route("/", get(home::index))
        // Books
        .route("/books", get(books::list).post(books::create))
        .route(
            "/books/:id",
            get(books::detail).put(books::update).delete(books::remove),
        )
        .route("/books/:id/edit", get(books::edit_form))
        // Authors
        .route("/authors", get(authors::list).post(authors::create))
        .route(
            "/authors/:id",
            get(authors::detail)
                .put(authors::update)
                .delete(authors::remove),
        )
        // Genres
        .route("/genres", get(genres::list).post(genres::create))
        .route(
            "/genres/:id",
            get(genres::detail)
                .put(genres::update)
                .delete(genres::remove),
        )
        // Book instances
        .route(
            "/bookinstances",
            get(instances::list).post(instances::create),
        )
        .route(
            "/bookinstances/:id",
            get(instances::detail)
                .put(instances::update)
                .delete(instances::remove),
        )
        // Tags
        .route("/tags", get(tags::list).post(tags::create))
        .route(
            "/tags/:id",
            get(tags::detail).put(tags::update).delete(tags::remove),
        )
}
