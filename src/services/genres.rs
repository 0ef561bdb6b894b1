//! Genre operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tokio::try_join;

use crate::domain::{CatalogError, Dependent};
use crate::models::{book, genre};

use super::authors::BookSummary;

#[derive(Debug, Deserialize)]
pub struct GenreInput {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct GenreDetail {
    pub genre: genre::Model,
    pub books: Vec<BookSummary>,
}

pub async fn list_genres(db: &DatabaseConnection) -> Result<Vec<genre::Model>, CatalogError> {
    Ok(genre::Entity::find()
        .order_by_asc(genre::Column::Name)
        .all(db)
        .await?)
}

pub async fn genre_detail(db: &DatabaseConnection, id: i32) -> Result<GenreDetail, CatalogError> {
    let (genre, books) = try_join!(
        genre::Entity::find_by_id(id).one(db),
        book::Entity::find()
            .filter(book::Column::GenreId.eq(id))
            .all(db),
    )?;
    let genre = genre.ok_or(CatalogError::NotFound)?;

    Ok(GenreDetail {
        genre,
        books: books.into_iter().map(BookSummary::from).collect(),
    })
}

/// Genre names are unique; creating an existing name returns the existing
/// row instead of erroring.
pub async fn create_genre(
    db: &DatabaseConnection,
    input: GenreInput,
) -> Result<genre::Model, CatalogError> {
    if let Some(existing) = genre::Entity::find()
        .filter(genre::Column::Name.eq(input.name.as_str()))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let genre = genre::ActiveModel {
        name: Set(input.name),
        ..Default::default()
    };
    Ok(genre.insert(db).await?)
}

pub async fn update_genre(
    db: &DatabaseConnection,
    id: i32,
    input: GenreInput,
) -> Result<genre::Model, CatalogError> {
    let existing = genre::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound)?;

    let mut genre: genre::ActiveModel = existing.into();
    genre.name = Set(input.name);

    Ok(genre.update(db).await?)
}

/// Guarded: a genre with books is never deleted.
pub async fn delete_genre(db: &DatabaseConnection, id: i32) -> Result<(), CatalogError> {
    let (genre, books) = try_join!(
        genre::Entity::find_by_id(id).one(db),
        book::Entity::find()
            .filter(book::Column::GenreId.eq(id))
            .all(db),
    )?;
    let genre = genre.ok_or(CatalogError::NotFound)?;

    if !books.is_empty() {
        return Err(CatalogError::Conflict {
            reason: "genre has books".to_string(),
            dependents: books
                .into_iter()
                .map(|b| Dependent {
                    id: b.id,
                    label: b.title,
                })
                .collect(),
        });
    }

    genre::Entity::delete_by_id(genre.id).exec(db).await?;
    Ok(())
}
