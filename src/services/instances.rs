//! Book instance (physical copy) operations.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};

use crate::domain::CatalogError;
use crate::models::{book, book_instance};

#[derive(Debug, Deserialize)]
pub struct InstanceInput {
    pub status: String,
    pub imprint: String,
    pub due_date: Option<String>,
    pub book_id: i32,
}

/// Instance row joined with its book's title for list rendering.
#[derive(Debug, Serialize)]
pub struct InstanceListItem {
    #[serde(flatten)]
    pub instance: book_instance::Model,
    pub book_title: String,
}

pub async fn list_instances(db: &DatabaseConnection) -> Result<Vec<InstanceListItem>, CatalogError> {
    let rows = book_instance::Entity::find()
        .find_also_related(book::Entity)
        .all(db)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    for (instance, book) in rows {
        let book = book.ok_or_else(|| {
            CatalogError::Store(format!("instance {} references a missing book", instance.id))
        })?;
        items.push(InstanceListItem {
            instance,
            book_title: book.title,
        });
    }
    Ok(items)
}

pub async fn instance_detail(
    db: &DatabaseConnection,
    id: i32,
) -> Result<InstanceListItem, CatalogError> {
    let (instance, book) = book_instance::Entity::find_by_id(id)
        .find_also_related(book::Entity)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound)?;
    let book = book.ok_or_else(|| {
        CatalogError::Store(format!("instance {} references a missing book", instance.id))
    })?;

    Ok(InstanceListItem {
        instance,
        book_title: book.title,
    })
}

async fn check_book_reference(db: &DatabaseConnection, book_id: i32) -> Result<(), CatalogError> {
    if book::Entity::find_by_id(book_id).one(db).await?.is_none() {
        return Err(CatalogError::ReferentialIntegrity(format!(
            "unknown book id {}",
            book_id
        )));
    }
    Ok(())
}

pub async fn create_instance(
    db: &DatabaseConnection,
    input: InstanceInput,
) -> Result<book_instance::Model, CatalogError> {
    check_book_reference(db, input.book_id).await?;

    let instance = book_instance::ActiveModel {
        status: Set(input.status),
        imprint: Set(input.imprint),
        due_date: Set(input.due_date),
        book_id: Set(input.book_id),
        ..Default::default()
    };
    Ok(instance.insert(db).await?)
}

pub async fn update_instance(
    db: &DatabaseConnection,
    id: i32,
    input: InstanceInput,
) -> Result<book_instance::Model, CatalogError> {
    let existing = book_instance::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound)?;

    check_book_reference(db, input.book_id).await?;

    let mut instance: book_instance::ActiveModel = existing.into();
    instance.status = Set(input.status);
    instance.imprint = Set(input.imprint);
    instance.due_date = Set(input.due_date);
    instance.book_id = Set(input.book_id);

    Ok(instance.update(db).await?)
}

/// Instances have no dependents; deletion is unguarded.
pub async fn delete_instance(db: &DatabaseConnection, id: i32) -> Result<(), CatalogError> {
    let instance = book_instance::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound)?;
    book_instance::Entity::delete_by_id(instance.id)
        .exec(db)
        .await?;
    Ok(())
}
