//! Category entity for document classification
//!
//! Names and identifiers are unique per `(owner_type, owner_id)` pair only; the
//! partial unique indexes live in the initial migration.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::common::OwnerType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Category UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Category name, unique within its owner
    pub name: String,

    /// Short identifier (e.g. "QM"), unique within its owner
    pub identifier: Option<String>,

    /// Free-form description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Owner kind (super_admin or lab)
    pub owner_type: OwnerType,

    /// Owning lab id; `None` for master rows
    pub owner_id: Option<Uuid>,

    /// Master category this row was cloned from (lineage only, never cascades)
    pub parent_id: Option<Uuid>,

    /// When the category was created
    pub created_at: ChronoDateTimeUtc,

    /// When the category was last updated
    pub updated_at: ChronoDateTimeUtc,

    /// Soft-delete marker
    pub deleted_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Category groups sub-categories
    #[sea_orm(has_many = "super::sub_category::Entity")]
    SubCategories,
}

impl Related<super::sub_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
