//! Tag membership reconciliation for the `tags_books` join table.
//!
//! Given a book and the tag selection a client submitted, bring the persisted
//! join rows to exactly that selection with the minimal set of writes.

use std::collections::HashSet;

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::domain::CatalogError;
use crate::models::tag::{self, Entity as Tag};
use crate::models::tags_books::{self, Entity as TagsBooks};

/// Delta applied by a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub inserted: usize,
    pub deleted: usize,
}

impl ReconcileOutcome {
    pub fn writes(&self) -> usize {
        self.inserted + self.deleted
    }
}

/// Make the persisted tag membership of `book_id` equal `desired`.
///
/// Current membership is re-read here, not taken from the caller, so the
/// delta is computed against what the store holds at reconciliation time.
/// Unchanged members are untouched. Callers that need atomicity with other
/// writes pass their open transaction as `conn`.
pub async fn reconcile_book_tags<C>(
    conn: &C,
    book_id: i32,
    desired: &HashSet<i32>,
) -> Result<ReconcileOutcome, CatalogError>
where
    C: ConnectionTrait,
{
    // Every desired id must reference an existing tag; one bad id aborts
    // the whole run before any write is issued.
    if !desired.is_empty() {
        let known: HashSet<i32> = Tag::find()
            .filter(tag::Column::Id.is_in(desired.iter().copied()))
            .all(conn)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();
        let mut missing: Vec<i32> = desired.difference(&known).copied().collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(CatalogError::ReferentialIntegrity(format!(
                "unknown tag ids: {:?}",
                missing
            )));
        }
    }

    let current: HashSet<i32> = TagsBooks::find()
        .filter(tags_books::Column::BookId.eq(book_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|row| row.tag_id)
        .collect();

    let to_delete: Vec<i32> = current.difference(desired).copied().collect();
    let to_insert: Vec<i32> = desired.difference(&current).copied().collect();

    // Exact pair deletes; a blanket per-book delete would also drop rows a
    // concurrent editor just added.
    for tag_id in &to_delete {
        TagsBooks::delete_many()
            .filter(tags_books::Column::BookId.eq(book_id))
            .filter(tags_books::Column::TagId.eq(*tag_id))
            .exec(conn)
            .await?;
    }

    for tag_id in &to_insert {
        let row = tags_books::ActiveModel {
            book_id: Set(book_id),
            tag_id: Set(*tag_id),
        };
        row.insert(conn).await?;
    }

    if !to_delete.is_empty() || !to_insert.is_empty() {
        tracing::debug!(
            book_id,
            inserted = to_insert.len(),
            deleted = to_delete.len(),
            "reconciled tag membership"
        );
    }

    Ok(ReconcileOutcome {
        inserted: to_insert.len(),
        deleted: to_delete.len(),
    })
}
