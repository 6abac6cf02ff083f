//! Junction between document versions and the templates backing them

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_version_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub document_version_id: Uuid,

    #[sea_orm(primary_key, auto_increment = false)]
    pub template_id: Uuid,

    /// Template revision pinned by this document version
    pub template_version_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::document_version::Entity",
        from = "Column::DocumentVersionId",
        to = "super::document_version::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    DocumentVersion,

    #[sea_orm(
        belongs_to = "super::template::Entity",
        from = "Column::TemplateId",
        to = "super::template::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Template,
}

impl Related<super::document_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentVersion.def()
    }
}

impl Related<super::template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
