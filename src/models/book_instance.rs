use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookinstances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Circulation status of this physical copy.
    /// Valid values (enforced by a table constraint):
    /// - `Maintenance`
    /// - `Available`
    /// - `Loaned`
    /// - `Reserved`
    pub status: String,
    pub imprint: String,
    pub due_date: Option<String>,
    pub book_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
