//! Amendment requests recorded against a document version

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::common::ChangeType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_version_amendments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub document_version_id: Uuid,

    pub amendment_type: ChangeType,

    /// Gapless per version, starting at 1
    pub amendment_number: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub reason: Option<String>,

    pub amended_by: Uuid,

    pub created_at: ChronoDateTimeUtc,
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
}

impl Related<super::document_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentVersion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
