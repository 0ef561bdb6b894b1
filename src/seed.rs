//! Demo data for local development.

use sea_orm::*;

use crate::models::{author, book, book_instance, genre, tag, tags_books};

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    // 1. Authors
    let authors = vec![
        ("Patrick", "Rothfuss", Some("1973-06-05"), None),
        ("Ben", "Bova", Some("1932-11-08"), None),
        ("Bob", "Billing", None, None),
        ("Isaac", "Asimov", Some("1920-01-01"), Some("1992-04-05")),
    ];

    for (first_name, family_name, born, died) in authors {
        let author = author::ActiveModel {
            first_name: Set(first_name.to_owned()),
            family_name: Set(family_name.to_owned()),
            date_of_birth: Set(born.map(str::to_owned)),
            date_of_death: Set(died.map(str::to_owned)),
            ..Default::default()
        };
        author::Entity::insert(author).exec(db).await?;
    }

    // 2. Genres
    for name in ["Fantasy", "Science Fiction"] {
        let genre = genre::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        };
        genre::Entity::insert(genre)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(genre::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await?;
    }

    // 3. Tags
    for name in ["sad", "thriller", "funny", "exciting"] {
        let tag = tag::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        };
        tag::Entity::insert(tag)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(tag::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await?;
    }

    // 4. Books
    let books = vec![
        ("The name of nice", "I am wearing it", "12309802196", 1, Some(1)),
        ("Truth", "I am wearing it", "298302918", 1, None),
        ("Jacket", "I am wearing it", "29809480982398", 1, None),
        ("Apes and Angels", "I am wearing it", "8647302", 2, Some(2)),
        ("Play", "I am wearing it", "8302817", 3, None),
        ("Plug", "I am wearing it", "56798932", 4, Some(2)),
    ];

    for (title, summary, isbn, author_id, genre_id) in books {
        let book = book::ActiveModel {
            title: Set(title.to_owned()),
            summary: Set(summary.to_owned()),
            isbn: Set(isbn.to_owned()),
            author_id: Set(author_id),
            genre_id: Set(genre_id),
            ..Default::default()
        };
        book::Entity::insert(book).exec(db).await?;
    }

    // 5. Tag pairs
    let pairs = vec![(3, 1), (2, 1), (1, 2), (1, 4), (4, 3)];

    for (book_id, tag_id) in pairs {
        let pair = tags_books::ActiveModel {
            book_id: Set(book_id),
            tag_id: Set(tag_id),
        };
        tags_books::Entity::insert(pair)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    tags_books::Column::BookId,
                    tags_books::Column::TagId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(db)
            .await?;
    }

    // 6. A few copies so every circulation status shows up
    let instances = vec![
        ("Available", "Gollancz, 2007", None, 1),
        ("Loaned", "Gollancz, 2007", Some("2020-01-01"), 1),
        ("Maintenance", "Tor, 1989", None, 4),
    ];

    for (status, imprint, due_date, book_id) in instances {
        let instance = book_instance::ActiveModel {
            status: Set(status.to_owned()),
            imprint: Set(imprint.to_owned()),
            due_date: Set(due_date.map(str::to_owned)),
            book_id: Set(book_id),
            ..Default::default()
        };
        book_instance::Entity::insert(instance).exec(db).await?;
    }

    Ok(())
}
