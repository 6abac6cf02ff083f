//! Template entity: reusable form/schema definitions backing documents

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::common::OwnerType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub owner_type: OwnerType,

    pub owner_id: Option<Uuid>,

    /// Master template this row was cloned from
    pub parent_id: Option<Uuid>,

    pub created_by: Option<Uuid>,

    pub created_at: ChronoDateTimeUtc,

    pub updated_at: ChronoDateTimeUtc,

    pub deleted_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::template_version::Entity")]
    Versions,

    #[sea_orm(has_many = "super::template_change_history::Entity")]
    ChangeHistory,
}

impl Related<super::template_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Versions.def()
    }
}

impl Related<super::template_change_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChangeHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
