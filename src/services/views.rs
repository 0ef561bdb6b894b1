//! Aggregate read views joining books with their related rows.
//!
//! Every function here is a pure read of current store state; nothing is
//! cached and fetched rows are never mutated to carry presentation flags.

use std::collections::HashSet;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::Serialize;
use tokio::try_join;

use crate::domain::CatalogError;
use crate::models::{author, book, book_instance, genre, tag, tags_books};

/// Minimal row for the book index: title plus author display name.
#[derive(Debug, Serialize)]
pub struct BookListItem {
    pub id: i32,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: author::Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<genre::Model>,
    pub instances: Vec<book_instance::Model>,
    pub tags: Vec<String>,
}

/// A tag paired with whether the book currently carries it.
#[derive(Debug, Serialize)]
pub struct TagChoice {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

/// Everything the edit form needs to render a book.
#[derive(Debug, Serialize)]
pub struct BookFormView {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: i32,
    pub genre_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_name: Option<String>,
    pub tags: Vec<TagChoice>,
}

#[derive(Debug, Serialize)]
pub struct LibrarySummary {
    pub book_count: u64,
    pub book_instance_count: u64,
    pub book_instance_available_count: u64,
    pub author_count: u64,
    pub genre_count: u64,
}

fn author_display_name(author: &author::Model) -> String {
    format!("{}, {}", author.family_name, author.first_name)
}

pub async fn book_list(db: &DatabaseConnection) -> Result<Vec<BookListItem>, CatalogError> {
    let rows = book::Entity::find()
        .find_also_related(author::Entity)
        .all(db)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    for (book, author) in rows {
        let author = author.ok_or_else(|| {
            CatalogError::Store(format!("book {} references a missing author", book.id))
        })?;
        items.push(BookListItem {
            id: book.id,
            title: book.title,
            author: author_display_name(&author),
        });
    }
    Ok(items)
}

pub async fn book_detail(db: &DatabaseConnection, id: i32) -> Result<BookDetail, CatalogError> {
    let book = book::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound)?;

    // Independent reads, gathered before assembly.
    let author_fut = author::Entity::find_by_id(book.author_id).one(db);
    let genre_fut = async {
        match book.genre_id {
            Some(genre_id) => genre::Entity::find_by_id(genre_id).one(db).await,
            None => Ok(None),
        }
    };
    let instances_fut = book_instance::Entity::find()
        .filter(book_instance::Column::BookId.eq(id))
        .all(db);
    let tags_fut = book.find_related(tag::Entity).all(db);

    let (author, genre, instances, tags) = try_join!(author_fut, genre_fut, instances_fut, tags_fut)?;

    let author = author.ok_or_else(|| {
        CatalogError::Store(format!("book {} references a missing author", book.id))
    })?;

    Ok(BookDetail {
        id: book.id,
        title: book.title,
        summary: book.summary,
        isbn: book.isbn,
        author,
        genre,
        instances,
        tags: tags.into_iter().map(|t| t.name).collect(),
    })
}

pub async fn book_form_view(db: &DatabaseConnection, id: i32) -> Result<BookFormView, CatalogError> {
    let book = book::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound)?;

    let genre_fut = async {
        match book.genre_id {
            Some(genre_id) => genre::Entity::find_by_id(genre_id).one(db).await,
            None => Ok(None),
        }
    };
    let all_tags_fut = tag::Entity::find().order_by_asc(tag::Column::Name).all(db);
    let current_fut = tags_books::Entity::find()
        .filter(tags_books::Column::BookId.eq(id))
        .all(db);

    let (genre, all_tags, current) = try_join!(genre_fut, all_tags_fut, current_fut)?;

    let current: HashSet<i32> = current.into_iter().map(|row| row.tag_id).collect();
    let tags = all_tags
        .into_iter()
        .map(|t| TagChoice {
            selected: current.contains(&t.id),
            id: t.id,
            name: t.name,
        })
        .collect();

    Ok(BookFormView {
        id: book.id,
        title: book.title,
        summary: book.summary,
        isbn: book.isbn,
        author_id: book.author_id,
        genre_id: book.genre_id,
        genre_name: genre.map(|g| g.name),
        tags,
    })
}

pub async fn library_summary(db: &DatabaseConnection) -> Result<LibrarySummary, CatalogError> {
    let (book_count, book_instance_count, book_instance_available_count, author_count, genre_count) =
        try_join!(
            book::Entity::find().count(db),
            book_instance::Entity::find().count(db),
            book_instance::Entity::find()
                .filter(book_instance::Column::Status.eq("Available"))
                .count(db),
            author::Entity::find().count(db),
            genre::Entity::find().count(db),
        )?;

    Ok(LibrarySummary {
        book_count,
        book_instance_count,
        book_instance_available_count,
        author_count,
        genre_count,
    })
}
