//! Lab onboarding end to end

mod common;

use common::*;
use labdocs_core::{EngineError, LabOnboarding, NewLab};
use labdocs_db::entities::common::OwnerType;
use labdocs_db::entities::lab_user::{self, LabRole};
use labdocs_db::entities::{department, document};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

fn new_lab(code: &str) -> NewLab {
    NewLab {
        name: format!("Lab {}", code),
        code: code.to_string(),
        email: Some("qa@lab.example".to_string()),
        admin_user_id: None,
    }
}

#[tokio::test]
async fn test_onboarding_reports_failures_and_keeps_successes() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    insert_master_department(&db, "QA").await;
    insert_master_department(&db, "Chemistry").await;
    let sop = simple_master_document(&db, "SOP", actor).await;
    let wi = simple_master_document(&db, "WI", actor).await;
    let missing = Uuid::new_v4();

    let report = LabOnboarding::new(db.clone())
        .onboard(
            new_lab("LAB-BLR-01"),
            &[sop.document.id, missing, wi.document.id],
            actor,
        )
        .await
        .unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.departments, 2);
    assert_eq!(report.cloned.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].master_document_id, missing);
    assert!(!report.failed[0].retryable);
    assert!(report.failed[0].error.contains("not found"));

    let numbers: Vec<&str> = report
        .cloned
        .iter()
        .map(|c| c.document.number.as_str())
        .collect();
    assert_eq!(numbers, vec!["SOP-1", "WI-1"]);

    let lab_documents = document::Entity::find()
        .filter(document::Column::OwnerType.eq(OwnerType::Lab))
        .filter(document::Column::OwnerId.eq(report.lab.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(lab_documents, 2);

    let admin = lab_user::Entity::find()
        .filter(lab_user::Column::LabId.eq(report.lab.id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.user_id, actor);
    assert_eq!(admin.role, LabRole::Admin);

    let lab_departments = department::Entity::find()
        .filter(department::Column::OwnerId.eq(report.lab.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(lab_departments, 2);
}

#[tokio::test]
async fn test_duplicate_lab_code_fails_before_cloning() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    let sop = simple_master_document(&db, "SOP", actor).await;
    let onboarding = LabOnboarding::new(db.clone());

    onboarding
        .onboard(new_lab("LAB-01"), &[], actor)
        .await
        .unwrap();
    let err = onboarding
        .onboard(new_lab("LAB-01"), &[sop.document.id], actor)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Database(_)));
    assert!(!err.is_retryable());

    let lab_documents = document::Entity::find()
        .filter(document::Column::OwnerType.eq(OwnerType::Lab))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(lab_documents, 0);
}
