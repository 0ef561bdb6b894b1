use sea_orm::{ConnectOptions, DatabaseConnection, EntityTrait, Set};

use athenaeum::db;
use athenaeum::domain::CatalogError;
use athenaeum::models::{author, book, book_instance, genre, tag, tags_books};
use athenaeum::services::views;
use athenaeum::{seed, services};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // Single connection so every query sees the same in-memory database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    db::init_db(options).await.expect("Failed to init DB")
}

async fn create_test_author(db: &DatabaseConnection, first: &str, family: &str) -> i32 {
    let author = author::ActiveModel {
        first_name: Set(first.to_string()),
        family_name: Set(family.to_string()),
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

async fn create_test_genre(db: &DatabaseConnection, name: &str) -> i32 {
    let genre = genre::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    genre::Entity::insert(genre)
        .exec(db)
        .await
        .expect("Failed to create genre")
        .last_insert_id
}

async fn create_test_book(
    db: &DatabaseConnection,
    title: &str,
    author_id: i32,
    genre_id: Option<i32>,
) -> i32 {
    let book = book::ActiveModel {
        title: Set(title.to_string()),
        summary: Set("A test summary".to_string()),
        isbn: Set("9780553293357".to_string()),
        author_id: Set(author_id),
        genre_id: Set(genre_id),
        ..Default::default()
    };
    book::Entity::insert(book)
        .exec(db)
        .await
        .expect("Failed to create book")
        .last_insert_id
}

async fn create_test_instance(db: &DatabaseConnection, book_id: i32, status: &str) -> i32 {
    let instance = book_instance::ActiveModel {
        status: Set(status.to_string()),
        imprint: Set("Gollancz, 2007".to_string()),
        due_date: Set(None),
        book_id: Set(book_id),
        ..Default::default()
    };
    book_instance::Entity::insert(instance)
        .exec(db)
        .await
        .expect("Failed to create instance")
        .last_insert_id
}

async fn attach_tag(db: &DatabaseConnection, book_id: i32, name: &str) -> i32 {
    let tag = tag::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    let tag_id = tag::Entity::insert(tag)
        .exec(db)
        .await
        .expect("Failed to create tag")
        .last_insert_id;
    let pair = tags_books::ActiveModel {
        book_id: Set(book_id),
        tag_id: Set(tag_id),
    };
    tags_books::Entity::insert(pair)
        .exec(db)
        .await
        .expect("Failed to create join row");
    tag_id
}

#[tokio::test]
async fn detail_without_genre_tags_or_instances_renders_empty() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Patrick", "Rothfuss").await;
    let book_id = create_test_book(&db, "The Name of the Wind", author_id, None).await;

    let detail = views::book_detail(&db, book_id)
        .await
        .expect("Detail view failed");

    assert_eq!(detail.title, "The Name of the Wind");
    assert_eq!(detail.author.family_name, "Rothfuss");
    assert!(detail.genre.is_none());
    assert!(detail.instances.is_empty());
    assert!(detail.tags.is_empty());
}

#[tokio::test]
async fn detail_assembles_all_joined_rows() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Isaac", "Asimov").await;
    let genre_id = create_test_genre(&db, "Science Fiction").await;
    let book_id = create_test_book(&db, "Foundation", author_id, Some(genre_id)).await;
    create_test_instance(&db, book_id, "Available").await;
    create_test_instance(&db, book_id, "Loaned").await;
    attach_tag(&db, book_id, "exciting").await;
    attach_tag(&db, book_id, "thriller").await;

    let detail = views::book_detail(&db, book_id)
        .await
        .expect("Detail view failed");

    assert_eq!(detail.author.first_name, "Isaac");
    assert_eq!(detail.genre.map(|g| g.name).as_deref(), Some("Science Fiction"));
    assert_eq!(detail.instances.len(), 2);
    let mut tags = detail.tags.clone();
    tags.sort();
    assert_eq!(tags, vec!["exciting".to_string(), "thriller".to_string()]);
}

#[tokio::test]
async fn detail_of_missing_book_is_not_found() {
    let db = setup_test_db().await;

    let err = views::book_detail(&db, 42)
        .await
        .expect_err("Detail view should fail");
    assert!(matches!(err, CatalogError::NotFound));
}

#[tokio::test]
async fn list_view_pairs_books_with_author_names() {
    let db = setup_test_db().await;
    let asimov = create_test_author(&db, "Isaac", "Asimov").await;
    let bova = create_test_author(&db, "Ben", "Bova").await;
    create_test_book(&db, "Foundation", asimov, None).await;
    create_test_book(&db, "Apes and Angels", bova, None).await;

    let list = views::book_list(&db).await.expect("List view failed");

    assert_eq!(list.len(), 2);
    let foundation = list
        .iter()
        .find(|item| item.title == "Foundation")
        .expect("Foundation missing from list");
    assert_eq!(foundation.author, "Asimov, Isaac");
}

#[tokio::test]
async fn edit_form_marks_only_current_tags_selected() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Isaac", "Asimov").await;
    let book_id = create_test_book(&db, "Foundation", author_id, None).await;
    let carried = attach_tag(&db, book_id, "exciting").await;

    // Tags the book does not carry
    for name in ["sad", "funny"] {
        let tag = tag::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        tag::Entity::insert(tag)
            .exec(&db)
            .await
            .expect("Failed to create tag");
    }

    let form = views::book_form_view(&db, book_id)
        .await
        .expect("Form view failed");

    assert_eq!(form.tags.len(), 3);
    for choice in &form.tags {
        assert_eq!(choice.selected, choice.id == carried);
    }
    assert!(form.genre_name.is_none());
}

#[tokio::test]
async fn summary_counts_every_entity() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Isaac", "Asimov").await;
    let genre_id = create_test_genre(&db, "Science Fiction").await;
    let first = create_test_book(&db, "Foundation", author_id, Some(genre_id)).await;
    let second = create_test_book(&db, "Foundation and Empire", author_id, None).await;
    create_test_instance(&db, first, "Available").await;
    create_test_instance(&db, first, "Loaned").await;
    create_test_instance(&db, second, "Maintenance").await;

    let summary = views::library_summary(&db).await.expect("Summary failed");

    assert_eq!(summary.book_count, 2);
    assert_eq!(summary.book_instance_count, 3);
    assert_eq!(summary.book_instance_available_count, 1);
    assert_eq!(summary.author_count, 1);
    assert_eq!(summary.genre_count, 1);
}

#[tokio::test]
async fn seeded_database_matches_expected_shape() {
    let db = setup_test_db().await;
    seed::seed_demo_data(&db).await.expect("Seed failed");

    let summary = views::library_summary(&db).await.expect("Summary failed");
    assert_eq!(summary.book_count, 6);
    assert_eq!(summary.author_count, 4);
    assert_eq!(summary.genre_count, 2);
    assert_eq!(summary.book_instance_count, 3);
    assert_eq!(summary.book_instance_available_count, 1);

    // Book 1 carries the "thriller" and "exciting" tags in the demo set
    let detail = views::book_detail(&db, 1).await.expect("Detail failed");
    let mut tags = detail.tags.clone();
    tags.sort();
    assert_eq!(tags, vec!["exciting".to_string(), "thriller".to_string()]);

    // Authors come back sorted by family name
    let authors = services::authors::list_authors(&db)
        .await
        .expect("Author list failed");
    let families: Vec<&str> = authors.iter().map(|a| a.family_name.as_str()).collect();
    assert_eq!(families, vec!["Asimov", "Billing", "Bova", "Rothfuss"]);
}
