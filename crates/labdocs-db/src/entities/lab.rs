//! Lab entity: the tenant root

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "labs")]
pub struct Model {
    /// Lab UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Short unique code (e.g. "LAB-BLR-01")
    #[sea_orm(unique)]
    pub code: String,

    /// Contact email for the lab (optional)
    pub email: Option<String>,

    /// When the lab was onboarded
    pub created_at: ChronoDateTimeUtc,

    /// When the lab was last updated
    pub updated_at: ChronoDateTimeUtc,

    /// Soft-delete marker
    pub deleted_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Users attached to the lab
    #[sea_orm(has_many = "super::lab_user::Entity")]
    LabUsers,
}

impl Related<super::lab_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LabUsers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
