//! Field-level change ledger for templates (append-only)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Why a ledger row was written
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ChangeContext {
    /// Template (or its lab copy) was created
    #[sea_orm(string_value = "create")]
    Create,

    /// The current version was edited in place
    #[sea_orm(string_value = "current")]
    Current,

    /// A non-current version was edited in place
    #[sea_orm(string_value = "old_version")]
    OldVersion,

    /// A different version became current
    #[sea_orm(string_value = "change_current")]
    ChangeCurrent,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "template_change_histories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub template_id: Uuid,

    pub template_version_id: Uuid,

    pub change_context: ChangeContext,

    /// Top-level field that changed
    pub field_name: String,

    pub old_value: Option<Json>,

    pub new_value: Option<Json>,

    pub changed_by: Uuid,

    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::template::Entity",
        from = "Column::TemplateId",
        to = "super::template::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Template,
}

impl Related<super::template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
