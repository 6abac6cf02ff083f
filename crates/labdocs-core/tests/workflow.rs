//! Workflow state machine against a real SQLite database

mod common;

use common::*;
use labdocs_core::{EngineError, WorkflowEngine};
use labdocs_db::entities::document_version::{VersionStatus, WorkflowState};
use labdocs_db::entities::document_version_workflow_log::StepStatus;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

#[tokio::test]
async fn test_completed_from_prepared_moves_to_reviewed() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    let created = simple_master_document(&db, "SOP", actor).await;
    let engine = WorkflowEngine::new(db.clone());

    let before = logs_of(&db, created.version.id).await.len();
    let state = engine
        .act(created.version.id, StepStatus::Completed, actor, Some("Looks good"))
        .await
        .unwrap();
    assert_eq!(state, WorkflowState::Reviewed);

    let logs = logs_of(&db, created.version.id).await;
    let new_rows = &logs[before..];
    assert_eq!(new_rows.len(), 2);

    assert_eq!(new_rows[0].step_type, WorkflowState::Prepared);
    assert_eq!(new_rows[0].step_status, StepStatus::Completed);
    assert_eq!(new_rows[0].comments.as_deref(), Some("Looks good"));
    assert_eq!(new_rows[0].performed_by, actor);

    let pending: Vec<_> = new_rows
        .iter()
        .filter(|l| l.step_status == StepStatus::Pending)
        .collect();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].step_type, WorkflowState::Reviewed);
    assert_eq!(pending[0].comments.as_deref(), Some("Moved to next step"));

    let version = reload_version(&db, created.version.id).await;
    assert_eq!(version.workflow_state, Some(WorkflowState::Reviewed));
}

#[tokio::test]
async fn test_sent_back_on_effective_is_refused_without_logging() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    let created = simple_master_document(&db, "SOP", actor).await;
    force_state(&db, &created.version, WorkflowState::Effective).await;
    let engine = WorkflowEngine::new(db.clone());

    let before = logs_of(&db, created.version.id).await.len();
    for action in [StepStatus::SentBack, StepStatus::Rejected] {
        let err = engine
            .act(created.version.id, action, actor, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ActionNotAllowed { .. }));
        assert!(err.is_client_error());
    }

    assert_eq!(logs_of(&db, created.version.id).await.len(), before);
    let version = reload_version(&db, created.version.id).await;
    assert_eq!(version.workflow_state, Some(WorkflowState::Effective));
}

#[tokio::test]
async fn test_rejected_restarts_with_two_log_rows() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    let created = simple_master_document(&db, "SOP", actor).await;
    force_state(&db, &created.version, WorkflowState::Approved).await;
    let engine = WorkflowEngine::new(db.clone());

    let before = logs_of(&db, created.version.id).await.len();
    let state = engine
        .act(created.version.id, StepStatus::Rejected, actor, Some("Wrong scope"))
        .await
        .unwrap();
    assert_eq!(state, WorkflowState::Prepared);

    let logs = logs_of(&db, created.version.id).await;
    assert_eq!(logs.len(), before + 2);
    let last = &logs[logs.len() - 1];
    assert_eq!(last.step_type, WorkflowState::Prepared);
    assert_eq!(last.step_status, StepStatus::Pending);
    assert_eq!(last.comments.as_deref(), Some("Restarted after rejection"));
}

#[tokio::test]
async fn test_sent_back_clamps_at_prepared() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    let created = simple_master_document(&db, "SOP", actor).await;
    let engine = WorkflowEngine::new(db.clone());

    let state = engine
        .act(created.version.id, StepStatus::SentBack, actor, None)
        .await
        .unwrap();
    assert_eq!(state, WorkflowState::Prepared);

    force_state(&db, &created.version, WorkflowState::Issued).await;
    let state = engine
        .act(created.version.id, StepStatus::SentBack, actor, None)
        .await
        .unwrap();
    assert_eq!(state, WorkflowState::Approved);

    let logs = logs_of(&db, created.version.id).await;
    let last = &logs[logs.len() - 1];
    assert_eq!(last.step_type, WorkflowState::Approved);
    assert_eq!(last.comments.as_deref(), Some("Sent back"));
}

#[tokio::test]
async fn test_full_pipeline_then_completed_is_idempotent() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    let created = simple_master_document(&db, "SOP", actor).await;
    let engine = WorkflowEngine::new(db.clone());
    let id = created.version.id;

    let mut states = Vec::new();
    for _ in 0..4 {
        states.push(engine.act(id, StepStatus::Completed, actor, None).await.unwrap());
    }
    assert_eq!(
        states,
        vec![
            WorkflowState::Reviewed,
            WorkflowState::Approved,
            WorkflowState::Issued,
            WorkflowState::Effective,
        ]
    );

    let version = reload_version(&db, id).await;
    assert!(version.effective_date.is_some());

    let moved_before = logs_of(&db, id)
        .await
        .iter()
        .filter(|l| l.comments.as_deref() == Some("Moved to next step"))
        .count();
    assert_eq!(moved_before, 4);

    for _ in 0..3 {
        let state = engine.act(id, StepStatus::Completed, actor, None).await.unwrap();
        assert_eq!(state, WorkflowState::Effective);
    }

    let logs = logs_of(&db, id).await;
    let moved_after = logs
        .iter()
        .filter(|l| l.comments.as_deref() == Some("Moved to next step"))
        .count();
    assert_eq!(moved_after, moved_before);

    let tail = &logs[logs.len() - 3..];
    assert!(tail
        .iter()
        .all(|l| l.step_type == WorkflowState::Effective && l.step_status == StepStatus::Completed));
}

#[tokio::test]
async fn test_pending_records_without_moving() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    let created = simple_master_document(&db, "SOP", actor).await;
    force_state(&db, &created.version, WorkflowState::Reviewed).await;
    let engine = WorkflowEngine::new(db.clone());

    let before = logs_of(&db, created.version.id).await.len();
    let state = engine
        .act(created.version.id, StepStatus::Pending, actor, Some("Waiting on QA"))
        .await
        .unwrap();
    assert_eq!(state, WorkflowState::Reviewed);

    let logs = logs_of(&db, created.version.id).await;
    assert_eq!(logs.len(), before + 1);
    assert_eq!(logs[before].step_status, StepStatus::Pending);
    assert_eq!(logs[before].comments.as_deref(), Some("Waiting on QA"));
}

#[tokio::test]
async fn test_draft_is_outside_the_pipeline_until_released() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    let created = simple_master_document(&db, "SOP", actor).await;
    force_state(&db, &created.version, WorkflowState::Draft).await;
    let engine = WorkflowEngine::new(db.clone());

    let err = engine
        .act(created.version.id, StepStatus::Completed, actor, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState { .. }));

    let released = engine.release_draft(created.version.id, actor).await.unwrap();
    assert_eq!(released.workflow_state, Some(WorkflowState::Prepared));

    let err = engine
        .release_draft(created.version.id, actor)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { .. }));

    let state = engine
        .act(created.version.id, StepStatus::Completed, actor, None)
        .await
        .unwrap();
    assert_eq!(state, WorkflowState::Reviewed);
}

#[tokio::test]
async fn test_archive_only_from_effective() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    let created = simple_master_document(&db, "SOP", actor).await;
    let engine = WorkflowEngine::new(db.clone());

    let err = engine.archive(created.version.id, actor).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { .. }));

    force_state(&db, &created.version, WorkflowState::Effective).await;
    let archived = engine.archive(created.version.id, actor).await.unwrap();
    assert_eq!(archived.workflow_state, Some(WorkflowState::Archived));
    assert_eq!(archived.version_status, VersionStatus::Obsolete);

    let logs = engine.workflow_log(created.version.id).await.unwrap();
    let last = &logs[logs.len() - 1];
    assert_eq!(last.step_type, WorkflowState::Archived);
    assert_eq!(last.step_status, StepStatus::Completed);

    let err = engine
        .act(created.version.id, StepStatus::Completed, actor, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState { .. }));
}

#[tokio::test]
async fn test_unknown_version_is_not_found() {
    let db = setup_test_db().await;
    let engine = WorkflowEngine::new(db);

    let err = engine
        .act(Uuid::new_v4(), StepStatus::Completed, Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
}

#[tokio::test]
async fn test_workflow_log_starts_with_initial_preparation() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    let created = simple_master_document(&db, "SOP", actor).await;
    let engine = WorkflowEngine::new(db);

    let logs = engine.workflow_log(created.version.id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].step_type, WorkflowState::Prepared);
    assert_eq!(logs[0].step_status, StepStatus::Pending);
    assert_eq!(logs[0].comments.as_deref(), Some("Initial preparation"));
}

#[tokio::test]
async fn test_failed_state_update_rolls_back_audit_row() {
    let db = setup_test_db().await;
    let actor = Uuid::new_v4();
    let created = simple_master_document(&db, "SOP", actor).await;
    let engine = WorkflowEngine::new(db.clone());

    let before = logs_of(&db, created.version.id).await;

    db.execute_unprepared(
        "CREATE TRIGGER reject_version_update BEFORE UPDATE ON document_versions \
         BEGIN SELECT RAISE(ABORT, 'version updates disabled'); END;",
    )
    .await
    .unwrap();

    let err = engine
        .act(created.version.id, StepStatus::Completed, actor, Some("Looks good"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Database(_)));

    let after = logs_of(&db, created.version.id).await;
    assert_eq!(after.len(), before.len());
    assert!(after.iter().all(|l| l.comments.as_deref() != Some("Looks good")));

    let version = reload_version(&db, created.version.id).await;
    assert_eq!(version.workflow_state, Some(WorkflowState::Prepared));

    db.execute_unprepared("DROP TRIGGER reject_version_update")
        .await
        .unwrap();
    let state = engine
        .act(created.version.id, StepStatus::Completed, actor, None)
        .await
        .unwrap();
    assert_eq!(state, WorkflowState::Reviewed);
}
