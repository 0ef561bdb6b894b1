//! Author operations.

use chrono::{Datelike, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tokio::try_join;

use crate::domain::{CatalogError, Dependent};
use crate::models::{author, book};

#[derive(Debug, Deserialize)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthorDetail {
    pub author: author::Model,
    /// Years between birth and death, when both dates are known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<i32>,
    pub books: Vec<BookSummary>,
}

fn lifespan(author: &author::Model) -> Option<i32> {
    let born = NaiveDate::parse_from_str(author.date_of_birth.as_deref()?, "%Y-%m-%d").ok()?;
    let died = NaiveDate::parse_from_str(author.date_of_death.as_deref()?, "%Y-%m-%d").ok()?;
    Some(died.year() - born.year())
}

#[derive(Debug, Serialize)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub summary: String,
}

impl From<book::Model> for BookSummary {
    fn from(book: book::Model) -> Self {
        Self {
            id: book.id,
            title: book.title,
            summary: book.summary,
        }
    }
}

pub async fn list_authors(db: &DatabaseConnection) -> Result<Vec<author::Model>, CatalogError> {
    Ok(author::Entity::find()
        .order_by_asc(author::Column::FamilyName)
        .all(db)
        .await?)
}

pub async fn author_detail(db: &DatabaseConnection, id: i32) -> Result<AuthorDetail, CatalogError> {
    let (author, books) = try_join!(
        author::Entity::find_by_id(id).one(db),
        book::Entity::find()
            .filter(book::Column::AuthorId.eq(id))
            .all(db),
    )?;
    let author = author.ok_or(CatalogError::NotFound)?;

    Ok(AuthorDetail {
        lifespan: lifespan(&author),
        author,
        books: books.into_iter().map(BookSummary::from).collect(),
    })
}

pub async fn create_author(
    db: &DatabaseConnection,
    input: AuthorInput,
) -> Result<author::Model, CatalogError> {
    let author = author::ActiveModel {
        first_name: Set(input.first_name),
        family_name: Set(input.family_name),
        date_of_birth: Set(input.date_of_birth),
        date_of_death: Set(input.date_of_death),
        ..Default::default()
    };
    Ok(author.insert(db).await?)
}

pub async fn update_author(
    db: &DatabaseConnection,
    id: i32,
    input: AuthorInput,
) -> Result<author::Model, CatalogError> {
    let existing = author::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound)?;

    let mut author: author::ActiveModel = existing.into();
    author.first_name = Set(input.first_name);
    author.family_name = Set(input.family_name);
    author.date_of_birth = Set(input.date_of_birth);
    author.date_of_death = Set(input.date_of_death);

    Ok(author.update(db).await?)
}

/// Guarded: an author with books is never deleted; the blocking books are
/// reported back instead.
pub async fn delete_author(db: &DatabaseConnection, id: i32) -> Result<(), CatalogError> {
    let (author, books) = try_join!(
        author::Entity::find_by_id(id).one(db),
        book::Entity::find()
            .filter(book::Column::AuthorId.eq(id))
            .all(db),
    )?;
    let author = author.ok_or(CatalogError::NotFound)?;

    if !books.is_empty() {
        return Err(CatalogError::Conflict {
            reason: "author has books".to_string(),
            dependents: books
                .into_iter()
                .map(|b| Dependent {
                    id: b.id,
                    label: b.title,
                })
                .collect(),
        });
    }

    author::Entity::delete_by_id(author.id).exec(db).await?;
    Ok(())
}
