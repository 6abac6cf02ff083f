//! Document entity: a controlled document definition

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::common::OwnerType;

/// Whether the document is under document control
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[sea_orm(string_value = "controlled")]
    Controlled,

    #[sea_orm(string_value = "uncontrolled")]
    Uncontrolled,
}

/// How document content is authored
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum DocumentMode {
    /// Authored in-app from templates; versions go through the approval workflow
    #[sea_orm(string_value = "create")]
    Create,

    /// Uploaded as a finished file; versions start out issued
    #[sea_orm(string_value = "upload")]
    Upload,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// Document UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Document number, globally unique across all owners (e.g. "SOP-QM-3")
    #[sea_orm(unique)]
    pub number: String,

    /// Document title
    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Category (same owner as the document)
    pub category_id: Uuid,

    /// Sub-category (optional, same owner as the document)
    pub sub_category_id: Option<Uuid>,

    pub status: DocumentStatus,

    pub mode: DocumentMode,

    pub owner_type: OwnerType,

    pub owner_id: Option<Uuid>,

    /// Master document this row was cloned from
    pub parent_id: Option<Uuid>,

    /// Actor that created the document
    pub created_by: Option<Uuid>,

    pub created_at: ChronoDateTimeUtc,

    pub updated_at: ChronoDateTimeUtc,

    /// Soft-delete marker
    pub deleted_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Document is classified under a category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,

    /// Document owns its versions
    #[sea_orm(has_many = "super::document_version::Entity")]
    Versions,

    /// Document is linked to departments
    #[sea_orm(has_many = "super::document_department::Entity")]
    DocumentDepartments,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::document_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Versions.def()
    }
}

impl Related<super::document_department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentDepartments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
