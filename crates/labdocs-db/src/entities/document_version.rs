//! DocumentVersion entity: one revision of a document

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Approval pipeline stage of a document version
///
/// `draft` and `archived` bracket the pipeline and are only entered or left
/// through administrative operations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    #[sea_orm(string_value = "draft")]
    Draft,

    #[sea_orm(string_value = "prepared")]
    Prepared,

    #[sea_orm(string_value = "reviewed")]
    Reviewed,

    #[sea_orm(string_value = "approved")]
    Approved,

    #[sea_orm(string_value = "issued")]
    Issued,

    #[sea_orm(string_value = "effective")]
    Effective,

    #[sea_orm(string_value = "archived")]
    Archived,
}

/// Lifecycle status of a version relative to its siblings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    #[sea_orm(string_value = "active")]
    Active,

    #[sea_orm(string_value = "superseded")]
    Superseded,

    #[sea_orm(string_value = "obsolete")]
    Obsolete,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_versions")]
pub struct Model {
    /// Version UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning document
    pub document_id: Uuid,

    /// Major revision number (>= 1)
    pub major_version: i32,

    /// Minor revision number (>= 0), reset on every major bump
    pub minor_version: i32,

    /// "major.minor"
    pub full_version: String,

    /// At most one version per document is current
    pub is_current: bool,

    /// Workflow stage; `None` is read as `prepared`
    pub workflow_state: Option<WorkflowState>,

    pub version_status: VersionStatus,

    /// When the version became effective
    pub effective_date: Option<ChronoDateTimeUtc>,

    /// Document schema (opaque JSON)
    pub schema_payload: Option<Json>,

    /// Form field values (opaque JSON)
    pub form_fields: Option<Json>,

    pub created_by: Option<Uuid>,

    pub created_at: ChronoDateTimeUtc,

    pub updated_at: ChronoDateTimeUtc,

    pub deleted_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Version belongs to a document
    #[sea_orm(
        belongs_to = "super::document::Entity",
        from = "Column::DocumentId",
        to = "super::document::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Document,

    /// Version owns its amendments
    #[sea_orm(has_many = "super::document_version_amendment::Entity")]
    Amendments,

    /// Version owns its workflow log
    #[sea_orm(has_many = "super::document_version_workflow_log::Entity")]
    WorkflowLogs,

    /// Templates backing this version
    #[sea_orm(has_many = "super::document_version_template::Entity")]
    Templates,
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl Related<super::document_version_amendment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Amendments.def()
    }
}

impl Related<super::document_version_workflow_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkflowLogs.def()
    }
}

impl Related<super::document_version_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Templates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
