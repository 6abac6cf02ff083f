//! TemplateVersion entity: a numbered revision of a template

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::common::ChangeType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "template_versions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub template_id: Uuid,

    pub major_version: i32,

    pub minor_version: i32,

    pub full_version: String,

    /// At most one version per template is current
    pub is_current: bool,

    /// Kind of bump that produced this version
    pub change_type: ChangeType,

    /// Revision message
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,

    /// Template schema (opaque JSON)
    pub content: Option<Json>,

    /// Default form field values (opaque JSON)
    pub form_fields: Option<Json>,

    pub created_by: Option<Uuid>,

    pub created_at: ChronoDateTimeUtc,

    pub updated_at: ChronoDateTimeUtc,
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
