//! Integration tests for labdocs-db
//!
//! Tests schema constraints with a real SQLite in-memory database

use chrono::Utc;
use labdocs_db::entities::common::{ChangeType, OwnerType};
use labdocs_db::entities::document::{DocumentMode, DocumentStatus};
use labdocs_db::entities::document_version::{VersionStatus, WorkflowState};
use labdocs_db::entities::document_version_workflow_log::StepStatus;
use labdocs_db::entities::{
    category, document, document_version, document_version_amendment,
    document_version_workflow_log, lab,
};
use labdocs_db::{connect, migrate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

/// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    migrate(&db).await.expect("Failed to run migrations");

    db
}

async fn insert_lab(db: &DatabaseConnection, code: &str) -> lab::Model {
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

fn category_row(name: &str, owner_type: OwnerType, owner_id: Option<Uuid>) -> category::ActiveModel {
    category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        identifier: Set(None),
        description: Set(None),
        owner_type: Set(owner_type),
        owner_id: Set(owner_id),
        parent_id: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        deleted_at: Set(None),
    }
}

async fn insert_document(db: &DatabaseConnection, number: &str) -> document::Model {
    let category = category_row(&format!("Category for {}", number), OwnerType::SuperAdmin, None)
        .insert(db)
        .await
        .expect("Failed to insert category");

    document::ActiveModel {
        id: Set(Uuid::new_v4()),
        number: Set(number.to_string()),
        name: Set("Quality Manual".to_string()),
        description: Set(None),
        category_id: Set(category.id),
        sub_category_id: Set(None),
        status: Set(DocumentStatus::Controlled),
        mode: Set(DocumentMode::Create),
        owner_type: Set(OwnerType::SuperAdmin),
        owner_id: Set(None),
        parent_id: Set(None),
        created_by: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        deleted_at: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to insert document")
}

fn version_row(document_id: Uuid, major: i32, minor: i32, is_current: bool) -> document_version::ActiveModel {
    document_version::ActiveModel {
        id: Set(Uuid::new_v4()),
        document_id: Set(document_id),
        major_version: Set(major),
        minor_version: Set(minor),
        full_version: Set(format!("{}.{}", major, minor)),
        is_current: Set(is_current),
        workflow_state: Set(Some(WorkflowState::Prepared)),
        version_status: Set(VersionStatus::Active),
        effective_date: Set(None),
        schema_payload: Set(Some(serde_json::json!({"sections": []}))),
        form_fields: Set(None),
        created_by: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        deleted_at: Set(None),
    }
}

#[tokio::test]
async fn test_database_connection() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    let backend = db.get_database_backend();
    assert!(matches!(backend, sea_orm::DatabaseBackend::Sqlite));
}

#[tokio::test]
async fn test_migrations_run_successfully() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    let result = migrate(&db).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_category_name_unique_per_lab_only() {
    let db = setup_test_db().await;
    let lab_a = insert_lab(&db, "LAB-A").await;
    let lab_b = insert_lab(&db, "LAB-B").await;

    category_row("Quality", OwnerType::SuperAdmin, None)
        .insert(&db)
        .await
        .expect("master category");
    category_row("Quality", OwnerType::Lab, Some(lab_a.id))
        .insert(&db)
        .await
        .expect("lab A copy");
    category_row("Quality", OwnerType::Lab, Some(lab_b.id))
        .insert(&db)
        .await
        .expect("lab B copy");

    let duplicate = category_row("Quality", OwnerType::Lab, Some(lab_a.id))
        .insert(&db)
        .await;
    assert!(duplicate.is_err());

    let master_duplicate = category_row("Quality", OwnerType::SuperAdmin, None)
        .insert(&db)
        .await;
    assert!(master_duplicate.is_err());
}

#[tokio::test]
async fn test_soft_deleted_category_frees_name() {
    let db = setup_test_db().await;
    let lab = insert_lab(&db, "LAB-SD").await;

    let mut deleted = category_row("Microbiology", OwnerType::Lab, Some(lab.id));
    deleted.deleted_at = Set(Some(Utc::now()));
    deleted.insert(&db).await.expect("soft-deleted row");

    let result = category_row("Microbiology", OwnerType::Lab, Some(lab.id))
        .insert(&db)
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_document_number_globally_unique() {
    let db = setup_test_db().await;
    insert_document(&db, "SOP-1").await;

    let category = category_row("Other", OwnerType::SuperAdmin, None)
        .insert(&db)
        .await
        .unwrap();
    let duplicate = document::ActiveModel {
        id: Set(Uuid::new_v4()),
        number: Set("SOP-1".to_string()),
        name: Set("Another".to_string()),
        description: Set(None),
        category_id: Set(category.id),
        sub_category_id: Set(None),
        status: Set(DocumentStatus::Uncontrolled),
        mode: Set(DocumentMode::Upload),
        owner_type: Set(OwnerType::Lab),
        owner_id: Set(Some(Uuid::new_v4())),
        parent_id: Set(None),
        created_by: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        deleted_at: Set(None),
    }
    .insert(&db)
    .await;

    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_only_one_current_version_per_document() {
    let db = setup_test_db().await;
    let doc = insert_document(&db, "QM-1").await;

    version_row(doc.id, 1, 0, true).insert(&db).await.unwrap();
    version_row(doc.id, 1, 1, false).insert(&db).await.unwrap();

    let second_current = version_row(doc.id, 2, 0, true).insert(&db).await;
    assert!(second_current.is_err());

    let other_doc = insert_document(&db, "QM-2").await;
    let other_current = version_row(other_doc.id, 1, 0, true).insert(&db).await;
    assert!(other_current.is_ok());
}

#[tokio::test]
async fn test_amendment_number_unique_per_version() {
    let db = setup_test_db().await;
    let doc = insert_document(&db, "AM-1").await;
    let version = version_row(doc.id, 1, 0, true).insert(&db).await.unwrap();

    let amendment = |number: i32| document_version_amendment::ActiveModel {
        document_version_id: Set(version.id),
        amendment_type: Set(ChangeType::Minor),
        amendment_number: Set(number),
        reason: Set(Some("typo".to_string())),
        amended_by: Set(Uuid::new_v4()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    amendment(1).insert(&db).await.unwrap();
    amendment(2).insert(&db).await.unwrap();
    assert!(amendment(2).insert(&db).await.is_err());
}

#[tokio::test]
async fn test_version_delete_cascades_to_audit_rows() {
    let db = setup_test_db().await;
    let doc = insert_document(&db, "CAS-1").await;
    let version = version_row(doc.id, 1, 0, true).insert(&db).await.unwrap();

    document_version_workflow_log::ActiveModel {
        document_version_id: Set(version.id),
        step_type: Set(WorkflowState::Prepared),
        step_status: Set(StepStatus::Pending),
        performed_by: Set(Uuid::new_v4()),
        comments: Set(Some("Initial preparation".to_string())),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    let logs = document_version_workflow_log::Entity::find()
        .filter(document_version_workflow_log::Column::DocumentVersionId.eq(version.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(logs, 1);

    doc.delete(&db).await.expect("Failed to delete document");

    let remaining_versions = document_version::Entity::find().count(&db).await.unwrap();
    let remaining_logs = document_version_workflow_log::Entity::find()
        .count(&db)
        .await
        .unwrap();
    assert_eq!(remaining_versions, 0);
    assert_eq!(remaining_logs, 0);
}

#[tokio::test]
async fn test_json_payload_roundtrip() {
    let db = setup_test_db().await;
    let doc = insert_document(&db, "JSON-1").await;

    let mut row = version_row(doc.id, 1, 0, true);
    row.form_fields = Set(Some(serde_json::json!({"title": "Scope", "pages": 4})));
    let inserted = row.insert(&db).await.unwrap();

    let found = document_version::Entity::find_by_id(inserted.id)
        .one(&db)
        .await
        .expect("Failed to query")
        .expect("Version not found");

    let fields = found.form_fields.expect("form fields");
    assert_eq!(fields["title"], "Scope");
    assert_eq!(fields["pages"], 4);
    assert_eq!(found.workflow_state, Some(WorkflowState::Prepared));
}
