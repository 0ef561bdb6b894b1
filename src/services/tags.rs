//! Tag operations.
//!
//! A tag owns no rows besides its join-table pairs, so deletion cleans the
//! pairs up and then removes the tag in one transaction.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tokio::try_join;

use crate::domain::CatalogError;
use crate::models::{book, tag, tags_books};

use super::authors::BookSummary;

#[derive(Debug, Deserialize)]
pub struct TagInput {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TagDetail {
    pub tag: tag::Model,
    pub books: Vec<BookSummary>,
}

pub async fn list_tags(db: &DatabaseConnection) -> Result<Vec<tag::Model>, CatalogError> {
    Ok(tag::Entity::find().all(db).await?)
}

pub async fn tag_detail(db: &DatabaseConnection, id: i32) -> Result<TagDetail, CatalogError> {
    let (tag, pairs) = try_join!(
        tag::Entity::find_by_id(id).one(db),
        tags_books::Entity::find()
            .filter(tags_books::Column::TagId.eq(id))
            .all(db),
    )?;
    let tag = tag.ok_or(CatalogError::NotFound)?;

    let book_ids: Vec<i32> = pairs.into_iter().map(|p| p.book_id).collect();
    let books = if book_ids.is_empty() {
        Vec::new()
    } else {
        book::Entity::find()
            .filter(book::Column::Id.is_in(book_ids))
            .all(db)
            .await?
    };

    Ok(TagDetail {
        tag,
        books: books.into_iter().map(BookSummary::from).collect(),
    })
}

pub async fn create_tag(db: &DatabaseConnection, input: TagInput) -> Result<tag::Model, CatalogError> {
    let tag = tag::ActiveModel {
        name: Set(input.name),
        ..Default::default()
    };
    Ok(tag.insert(db).await?)
}

pub async fn update_tag(
    db: &DatabaseConnection,
    id: i32,
    input: TagInput,
) -> Result<tag::Model, CatalogError> {
    let existing = tag::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound)?;

    let mut tag: tag::ActiveModel = existing.into();
    tag.name = Set(input.name);

    Ok(tag.update(db).await?)
}

/// Join rows go first so the tag row never leaves orphaned pairs behind.
pub async fn delete_tag(db: &DatabaseConnection, id: i32) -> Result<(), CatalogError> {
    let txn = db.begin().await?;

    let tag = tag::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(CatalogError::NotFound)?;

    tags_books::Entity::delete_many()
        .filter(tags_books::Column::TagId.eq(id))
        .exec(&txn)
        .await?;
    tag::Entity::delete_by_id(tag.id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}
