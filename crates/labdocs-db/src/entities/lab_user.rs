//! LabUser entity for lab membership and roles

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of a user inside a lab
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum LabRole {
    /// Lab administrator, created during onboarding
    #[sea_orm(string_value = "admin")]
    Admin,

    /// Regular lab member
    #[sea_orm(string_value = "member")]
    Member,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lab_users")]
pub struct Model {
    /// Lab UUID (composite primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub lab_id: Uuid,

    /// User UUID issued by the identity provider (composite primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,

    /// Role of the user in this lab
    pub role: LabRole,

    /// When the user joined the lab
    pub joined_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Lab user belongs to a lab
    #[sea_orm(
        belongs_to = "super::lab::Entity",
        from = "Column::LabId",
        to = "super::lab::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Lab,
}

impl Related<super::lab::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lab.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
