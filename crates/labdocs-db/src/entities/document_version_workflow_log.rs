//! Append-only workflow audit trail for a document version

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::document_version::WorkflowState;

/// Outcome recorded for a workflow step; doubles as the action vocabulary
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "completed")]
    Completed,

    #[sea_orm(string_value = "sent_back")]
    SentBack,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_version_workflow_logs")]
pub struct Model {
    /// Insertion-ordered id
    #[sea_orm(primary_key)]
    pub id: i32,

    pub document_version_id: Uuid,

    /// Step entered or acted upon
    pub step_type: WorkflowState,

    pub step_status: StepStatus,

    pub performed_by: Uuid,

    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,

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
