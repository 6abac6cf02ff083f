//! Shared fixtures for engine integration tests
#![allow(dead_code)]

use chrono::Utc;
use labdocs_core::{
    DocumentService, DocumentWithVersion, NewDocument, NewTemplate, Owner, TemplateService,
    TemplateWithVersion,
};
use labdocs_db::entities::common::OwnerType;
use labdocs_db::entities::document::{DocumentMode, DocumentStatus};
use labdocs_db::entities::document_version::{self, WorkflowState};
use labdocs_db::entities::{
    category, department, document_version_workflow_log, lab, sub_category,
};
use labdocs_db::{connect, migrate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde_json::json;
use uuid::Uuid;

pub async fn setup_test_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    migrate(&db).await.expect("Failed to run migrations");

    db
}

pub async fn insert_lab(db: &DatabaseConnection, code: &str) -> lab::Model {
    lab::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Lab {}", code)),
        code: Set(code.to_string()),
        email: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        deleted_at: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to insert lab")
}

pub async fn insert_master_category(db: &DatabaseConnection, name: &str) -> category::Model {
    category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        identifier: Set(Some(name.to_uppercase().replace(' ', "-"))),
        description: Set(Some(format!("{} documents", name))),
        owner_type: Set(OwnerType::SuperAdmin),
        owner_id: Set(None),
        parent_id: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        deleted_at: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to insert category")
}

pub async fn insert_master_sub_category(
    db: &DatabaseConnection,
    category: &category::Model,
    name: &str,
) -> sub_category::Model {
    sub_category::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(category.id),
        name: Set(name.to_string()),
        identifier: Set(None),
        description: Set(None),
        owner_type: Set(OwnerType::SuperAdmin),
        owner_id: Set(None),
        parent_id: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        deleted_at: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to insert sub-category")
}

pub async fn insert_master_department(db: &DatabaseConnection, name: &str) -> department::Model {
    department::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        owner_type: Set(OwnerType::SuperAdmin),
        owner_id: Set(None),
        parent_id: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        deleted_at: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to insert department")
}

pub async fn master_template(
    db: &DatabaseConnection,
    name: &str,
    actor: Uuid,
) -> TemplateWithVersion {
    TemplateService::new(db.clone())
        .create_template(
            Owner::SuperAdmin,
            NewTemplate {
                name: name.to_string(),
                description: None,
                content: Some(json!({"sections": ["Purpose", "Scope"]})),
                form_fields: Some(json!({"prepared_by": ""})),
            },
            actor,
        )
        .await
        .expect("Failed to create template")
}

pub fn new_document(number: &str, mode: DocumentMode, category_id: Uuid) -> NewDocument {
    NewDocument {
        number: number.to_string(),
        name: format!("Document {}", number),
        description: None,
        category_id,
        sub_category_id: None,
        status: DocumentStatus::Controlled,
        mode,
        department_ids: Vec::new(),
        template_ids: Vec::new(),
        schema_payload: Some(json!({"title": number})),
        form_fields: None,
    }
}

pub async fn create_document(
    db: &DatabaseConnection,
    owner: Owner,
    input: NewDocument,
    actor: Uuid,
) -> DocumentWithVersion {
    DocumentService::new(db.clone())
        .create_document(owner, input, actor)
        .await
        .expect("Failed to create document")
}

/// Create-mode master document under a fresh category
pub async fn simple_master_document(
    db: &DatabaseConnection,
    number: &str,
    actor: Uuid,
) -> DocumentWithVersion {
    let category = insert_master_category(db, &format!("Category {}", number)).await;
    create_document(
        db,
        Owner::SuperAdmin,
        new_document(number, DocumentMode::Create, category.id),
        actor,
    )
    .await
}

/// Force a version into `state` and `major.minor`
pub async fn force_version(
    db: &DatabaseConnection,
    version: &document_version::Model,
    state: WorkflowState,
    major: i32,
    minor: i32,
) -> document_version::Model {
    let mut active: document_version::ActiveModel = version.clone().into();
    active.workflow_state = Set(Some(state));
    active.major_version = Set(major);
    active.minor_version = Set(minor);
    active.full_version = Set(format!("{}.{}", major, minor));
    active.update(db).await.expect("Failed to update version")
}

pub async fn force_state(
    db: &DatabaseConnection,
    version: &document_version::Model,
    state: WorkflowState,
) -> document_version::Model {
    force_version(db, version, state, version.major_version, version.minor_version).await
}

pub async fn reload_version(db: &DatabaseConnection, id: Uuid) -> document_version::Model {
    document_version::Entity::find_by_id(id)
        .one(db)
        .await
        .expect("Failed to query version")
        .expect("Version not found")
}

pub async fn logs_of(
    db: &DatabaseConnection,
    version_id: Uuid,
) -> Vec<document_version_workflow_log::Model> {
    document_version_workflow_log::Entity::find()
        .filter(document_version_workflow_log::Column::DocumentVersionId.eq(version_id))
        .order_by_asc(document_version_workflow_log::Column::Id)
        .all(db)
        .await
        .expect("Failed to query logs")
}

pub async fn current_count(db: &DatabaseConnection, document_id: Uuid) -> u64 {
    document_version::Entity::find()
        .filter(document_version::Column::DocumentId.eq(document_id))
        .filter(document_version::Column::IsCurrent.eq(true))
        .count(db)
        .await
        .expect("Failed to count versions")
}
