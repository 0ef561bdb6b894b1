//! Book operations: row CRUD plus tag-membership reconciliation.
//!
//! Multi-statement sequences (row write + join-table delta, join cleanup +
//! row delete) run inside one transaction so a failure rolls back every
//! partial write.

use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use serde::Deserialize;

use crate::domain::{CatalogError, Dependent};
use crate::models::{author, book, book_instance, genre, tags_books};
use crate::services::reconciler;

#[derive(Debug, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: i32,
    pub genre_id: Option<i32>,
    /// Desired tag membership; the full selection, not a delta.
    #[serde(default)]
    pub tags: Vec<i32>,
}

async fn check_references<C>(
    conn: &C,
    author_id: i32,
    genre_id: Option<i32>,
) -> Result<(), CatalogError>
where
    C: ConnectionTrait,
{
    if author::Entity::find_by_id(author_id).one(conn).await?.is_none() {
        return Err(CatalogError::ReferentialIntegrity(format!(
            "unknown author id {}",
            author_id
        )));
    }
    if let Some(genre_id) = genre_id {
        if genre::Entity::find_by_id(genre_id).one(conn).await?.is_none() {
            return Err(CatalogError::ReferentialIntegrity(format!(
                "unknown genre id {}",
                genre_id
            )));
        }
    }
    Ok(())
}

pub async fn create_book(
    db: &DatabaseConnection,
    input: BookInput,
) -> Result<book::Model, CatalogError> {
    let desired: HashSet<i32> = input.tags.iter().copied().collect();

    let txn = db.begin().await?;

    check_references(&txn, input.author_id, input.genre_id).await?;

    let book = book::ActiveModel {
        title: Set(input.title),
        summary: Set(input.summary),
        isbn: Set(input.isbn),
        author_id: Set(input.author_id),
        genre_id: Set(input.genre_id),
        ..Default::default()
    };
    let book = book.insert(&txn).await?;

    reconciler::reconcile_book_tags(&txn, book.id, &desired).await?;

    txn.commit().await?;
    Ok(book)
}

/// Full-row update plus reconciliation of the submitted tag selection.
/// Every join-row write is awaited before this returns.
pub async fn update_book(
    db: &DatabaseConnection,
    id: i32,
    input: BookInput,
) -> Result<book::Model, CatalogError> {
    let desired: HashSet<i32> = input.tags.iter().copied().collect();

    let txn = db.begin().await?;

    let existing = book::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(CatalogError::NotFound)?;

    check_references(&txn, input.author_id, input.genre_id).await?;

    let mut book: book::ActiveModel = existing.into();
    book.title = Set(input.title);
    book.summary = Set(input.summary);
    book.isbn = Set(input.isbn);
    book.author_id = Set(input.author_id);
    book.genre_id = Set(input.genre_id);
    let book = book.update(&txn).await?;

    reconciler::reconcile_book_tags(&txn, book.id, &desired).await?;

    txn.commit().await?;
    Ok(book)
}

/// Refused while book instances exist; otherwise the book's join rows are
/// removed before the book row itself so no orphaned association survives.
pub async fn delete_book(db: &DatabaseConnection, id: i32) -> Result<(), CatalogError> {
    let txn = db.begin().await?;

    let book = book::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(CatalogError::NotFound)?;

    let instances = book_instance::Entity::find()
        .filter(book_instance::Column::BookId.eq(id))
        .all(&txn)
        .await?;
    if !instances.is_empty() {
        return Err(CatalogError::Conflict {
            reason: "book has copies".to_string(),
            dependents: instances
                .into_iter()
                .map(|i| Dependent {
                    id: i.id,
                    label: i.imprint,
                })
                .collect(),
        });
    }

    tags_books::Entity::delete_many()
        .filter(tags_books::Column::BookId.eq(id))
        .exec(&txn)
        .await?;
    book::Entity::delete_by_id(book.id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}
