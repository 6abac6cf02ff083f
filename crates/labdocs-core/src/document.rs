//! Document creation and version reads

use chrono::Utc;
use labdocs_db::entities::document::{self, DocumentMode, DocumentStatus};
use labdocs_db::entities::document_version::{self, VersionStatus};
use labdocs_db::entities::{
    category, document_department, document_version_template, template,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::template::current_template_version;
use crate::tenancy::Owner;
use crate::versioning::VersionNumber;
use crate::workflow::{initial_state, seed_initial_log};

/// Input for [`DocumentService::create_document`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    pub number: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub sub_category_id: Option<Uuid>,
    pub status: DocumentStatus,
    pub mode: DocumentMode,
    #[serde(default)]
    pub department_ids: Vec<Uuid>,
    /// Templates backing the first version; ignored for upload documents
    #[serde(default)]
    pub template_ids: Vec<Uuid>,
    pub schema_payload: Option<Json>,
    pub form_fields: Option<Json>,
}

/// A document together with one of its versions
#[derive(Debug, Clone, Serialize)]
pub struct DocumentWithVersion {
    pub document: document::Model,
    pub version: document_version::Model,
}

/// Insert version 1.0 of `document`
///
/// `seed` carries the payload columns. The version starts in the mode's initial
/// state; create-mode versions also get their `Initial preparation` log row.
pub(crate) async fn seed_first_version<C: ConnectionTrait>(
    conn: &C,
    document: &document::Model,
    seed: document_version::ActiveModel,
    actor: Uuid,
) -> Result<document_version::Model, DbErr> {
    let now = Utc::now();
    let initial = VersionNumber::INITIAL;

    let mut version = seed;
    version.id = Set(Uuid::new_v4());
    version.document_id = Set(document.id);
    version.major_version = Set(initial.major);
    version.minor_version = Set(initial.minor);
    version.full_version = Set(initial.to_string());
    version.is_current = Set(true);
    version.workflow_state = Set(Some(initial_state(document.mode)));
    version.version_status = Set(VersionStatus::Active);
    version.effective_date = Set(None);
    version.created_by = Set(Some(actor));
    version.created_at = Set(now);
    version.updated_at = Set(now);
    version.deleted_at = Set(None);
    let version = version.insert(conn).await?;

    if document.mode == DocumentMode::Create {
        seed_initial_log(conn, version.id, actor).await?;
    }

    Ok(version)
}

/// Pin `template_version_id` of `template_id` to a document version
pub(crate) async fn link_template<C: ConnectionTrait>(
    conn: &C,
    document_version_id: Uuid,
    template_id: Uuid,
    template_version_id: Uuid,
) -> Result<(), DbErr> {
    document_version_template::ActiveModel {
        document_version_id: Set(document_version_id),
        template_id: Set(template_id),
        template_version_id: Set(template_version_id),
    }
    .insert(conn)
    .await?;

    Ok(())
}

pub(crate) async fn link_department<C: ConnectionTrait>(
    conn: &C,
    document_id: Uuid,
    department_id: Uuid,
) -> Result<(), DbErr> {
    document_department::ActiveModel {
        document_id: Set(document_id),
        department_id: Set(department_id),
    }
    .insert(conn)
    .await?;

    Ok(())
}

/// Document authoring and version lookups
#[derive(Clone)]
pub struct DocumentService {
    db: DatabaseConnection,
}

impl DocumentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a document together with its first version
    pub async fn create_document(
        &self,
        owner: Owner,
        input: NewDocument,
        actor: Uuid,
    ) -> EngineResult<DocumentWithVersion> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        category::Entity::find_by_id(input.category_id)
            .filter(category::Column::DeletedAt.is_null())
            .one(&txn)
            .await?
            .ok_or_else(|| EngineError::not_found("category", input.category_id))?;

        let (owner_type, owner_id) = owner.to_columns();
        let document = document::ActiveModel {
            id: Set(Uuid::new_v4()),
            number: Set(input.number),
            name: Set(input.name),
            description: Set(input.description),
            category_id: Set(input.category_id),
            sub_category_id: Set(input.sub_category_id),
            status: Set(input.status),
            mode: Set(input.mode),
            owner_type: Set(owner_type),
            owner_id: Set(owner_id),
            parent_id: Set(None),
            created_by: Set(Some(actor)),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&txn)
        .await?;

        for department_id in &input.department_ids {
            link_department(&txn, document.id, *department_id).await?;
        }

        let seed = document_version::ActiveModel {
            schema_payload: Set(input.schema_payload),
            form_fields: Set(input.form_fields),
            ..Default::default()
        };
        let version = seed_first_version(&txn, &document, seed, actor).await?;

        match document.mode {
            DocumentMode::Create => {
                for template_id in &input.template_ids {
                    template::Entity::find_by_id(*template_id)
                        .filter(template::Column::DeletedAt.is_null())
                        .one(&txn)
                        .await?
                        .ok_or_else(|| EngineError::not_found("template", template_id))?;
                    let pinned = current_template_version(&txn, *template_id)
                        .await?
                        .ok_or_else(|| {
                            EngineError::not_found("current template version", template_id)
                        })?;
                    link_template(&txn, version.id, *template_id, pinned.id).await?;
                }
            }
            DocumentMode::Upload if !input.template_ids.is_empty() => {
                debug!(
                    "Ignoring {} templates on upload document {}",
                    input.template_ids.len(),
                    document.number
                );
            }
            DocumentMode::Upload => {}
        }

        txn.commit().await?;

        info!(
            "Created document {} ({}) for {} at version {}",
            document.number, document.id, owner, version.full_version
        );

        Ok(DocumentWithVersion { document, version })
    }

    /// The version currently flagged authoritative
    pub async fn current_version(
        &self,
        document_id: Uuid,
    ) -> EngineResult<document_version::Model> {
        document_version::Entity::find()
            .filter(document_version::Column::DocumentId.eq(document_id))
            .filter(document_version::Column::IsCurrent.eq(true))
            .filter(document_version::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or_else(|| EngineError::not_found("current document version", document_id))
    }

    /// All live versions of a document, oldest first
    pub async fn versions(&self, document_id: Uuid) -> EngineResult<Vec<document_version::Model>> {
        let rows = document_version::Entity::find()
            .filter(document_version::Column::DocumentId.eq(document_id))
            .filter(document_version::Column::DeletedAt.is_null())
            .order_by_asc(document_version::Column::MajorVersion)
            .order_by_asc(document_version::Column::MinorVersion)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
