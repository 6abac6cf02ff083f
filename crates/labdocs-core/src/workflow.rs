//! Document version workflow state machine
//!
//! Versions move through a fixed pipeline:
//!
//! ```text
//! prepared -> reviewed -> approved -> issued -> effective
//! ```
//!
//! `draft` and `archived` sit outside the pipeline. [`WorkflowEngine::act`] never
//! enters or leaves them; [`WorkflowEngine::release_draft`] and
//! [`WorkflowEngine::archive`] are the administrative operations that do.
//!
//! Every `act` call writes an audit row for the step being acted on before any
//! state change, and all of its writes commit or roll back together.

use chrono::Utc;
use labdocs_db::entities::document::DocumentMode;
use labdocs_db::entities::document_version::{self, VersionStatus, WorkflowState};
use labdocs_db::entities::document_version_workflow_log::{self, StepStatus};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Actions accepted by [`WorkflowEngine::act`]; stored verbatim as the log status
pub type WorkflowAction = StepStatus;

/// Ordered pipeline steps
pub const STEPS: [WorkflowState; 5] = [
    WorkflowState::Prepared,
    WorkflowState::Reviewed,
    WorkflowState::Approved,
    WorkflowState::Issued,
    WorkflowState::Effective,
];

pub(crate) const INITIAL_PREPARATION: &str = "Initial preparation";
const MOVED_TO_NEXT_STEP: &str = "Moved to next step";
const SENT_BACK: &str = "Sent back";
const RESTARTED_AFTER_REJECTION: &str = "Restarted after rejection";

/// Position of `state` in [`STEPS`], `None` for `draft`/`archived`
pub fn step_index(state: WorkflowState) -> Option<usize> {
    STEPS.iter().position(|s| *s == state)
}

/// State a freshly seeded version starts in
pub fn initial_state(mode: DocumentMode) -> WorkflowState {
    match mode {
        DocumentMode::Create => WorkflowState::Prepared,
        DocumentMode::Upload => WorkflowState::Issued,
    }
}

/// Parse an action name (`pending`, `completed`, `sent_back`, `rejected`)
pub fn parse_action(raw: &str) -> EngineResult<WorkflowAction> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pending" => Ok(StepStatus::Pending),
        "completed" => Ok(StepStatus::Completed),
        "sent_back" => Ok(StepStatus::SentBack),
        "rejected" => Ok(StepStatus::Rejected),
        _ => Err(EngineError::InvalidAction(raw.to_string())),
    }
}

pub(crate) fn state_name(state: WorkflowState) -> String {
    state.to_value()
}

/// What an action does to a version, before anything is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// State the version is in when the action arrives
    pub from: WorkflowState,
    /// State the version ends in
    pub to: WorkflowState,
    /// Second audit row written for the step entered, if any
    pub follow_up: Option<(StepStatus, &'static str)>,
}

/// Decide the outcome of `action` on a version in state `current`
///
/// `None` is read as `prepared`.
pub fn plan_transition(
    version_id: Uuid,
    current: Option<WorkflowState>,
    action: WorkflowAction,
) -> EngineResult<TransitionPlan> {
    let from = current.unwrap_or(WorkflowState::Prepared);
    let index = step_index(from).ok_or_else(|| EngineError::InvalidState {
        version_id,
        state: state_name(from),
    })?;

    if from == WorkflowState::Effective
        && matches!(action, StepStatus::SentBack | StepStatus::Rejected)
    {
        return Err(EngineError::ActionNotAllowed {
            action: action.to_value(),
            state: state_name(from),
        });
    }

    let plan = match action {
        StepStatus::Pending => TransitionPlan {
            from,
            to: from,
            follow_up: None,
        },
        StepStatus::Rejected => TransitionPlan {
            from,
            to: WorkflowState::Prepared,
            follow_up: Some((StepStatus::Pending, RESTARTED_AFTER_REJECTION)),
        },
        StepStatus::SentBack => TransitionPlan {
            from,
            to: STEPS[index.saturating_sub(1)],
            follow_up: Some((StepStatus::Pending, SENT_BACK)),
        },
        StepStatus::Completed => match STEPS.get(index + 1) {
            None => TransitionPlan {
                from,
                to: from,
                follow_up: None,
            },
            Some(next) => TransitionPlan {
                from,
                to: *next,
                follow_up: Some((StepStatus::Pending, MOVED_TO_NEXT_STEP)),
            },
        },
    };

    Ok(plan)
}

/// Load a live version under an exclusive row lock
///
/// The lock is held until the surrounding transaction ends. Backends without row
/// locks (SQLite) serialize writers at the transaction level instead.
pub(crate) async fn lock_version<C: ConnectionTrait>(
    conn: &C,
    version_id: Uuid,
) -> EngineResult<document_version::Model> {
    document_version::Entity::find_by_id(version_id)
        .filter(document_version::Column::DeletedAt.is_null())
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::not_found("document version", version_id))
}

/// Append one workflow audit row
pub(crate) async fn append_log<C: ConnectionTrait>(
    conn: &C,
    version_id: Uuid,
    step: WorkflowState,
    status: StepStatus,
    actor: Uuid,
    comments: Option<&str>,
) -> Result<document_version_workflow_log::Model, DbErr> {
    document_version_workflow_log::ActiveModel {
        document_version_id: Set(version_id),
        step_type: Set(step),
        step_status: Set(status),
        performed_by: Set(actor),
        comments: Set(comments.map(str::to_string)),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// Record the `Initial preparation` row for a freshly seeded version
pub(crate) async fn seed_initial_log<C: ConnectionTrait>(
    conn: &C,
    version_id: Uuid,
    actor: Uuid,
) -> Result<document_version_workflow_log::Model, DbErr> {
    append_log(
        conn,
        version_id,
        WorkflowState::Prepared,
        StepStatus::Pending,
        actor,
        Some(INITIAL_PREPARATION),
    )
    .await
}

/// Drives document versions through the approval pipeline
#[derive(Clone)]
pub struct WorkflowEngine {
    db: DatabaseConnection,
}

impl WorkflowEngine {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Apply `action` to a version on behalf of `actor`
    ///
    /// Returns the state the version is in afterwards.
    pub async fn act(
        &self,
        version_id: Uuid,
        action: WorkflowAction,
        actor: Uuid,
        comments: Option<&str>,
    ) -> EngineResult<WorkflowState> {
        let txn = self.db.begin().await?;

        let version = lock_version(&txn, version_id).await?;
        let plan = plan_transition(version_id, version.workflow_state, action)?;

        debug!(
            "Version {}: {:?} on {:?} -> {:?}",
            version_id, action, plan.from, plan.to
        );

        append_log(&txn, version_id, plan.from, action, actor, comments).await?;

        if let Some((status, note)) = plan.follow_up {
            let entering_effective =
                plan.to == WorkflowState::Effective && plan.from != WorkflowState::Effective;

            let mut active: document_version::ActiveModel = version.into();
            active.workflow_state = Set(Some(plan.to));
            active.updated_at = Set(Utc::now());
            if entering_effective {
                active.effective_date = Set(Some(Utc::now()));
            }
            active.update(&txn).await?;

            append_log(&txn, version_id, plan.to, status, actor, Some(note)).await?;
        }

        txn.commit().await?;

        info!(
            "Version {} {} by {}: {} -> {}",
            version_id,
            action.to_value(),
            actor,
            state_name(plan.from),
            state_name(plan.to)
        );

        Ok(plan.to)
    }

    /// Move a `draft` version into the pipeline at `prepared`
    pub async fn release_draft(
        &self,
        version_id: Uuid,
        actor: Uuid,
    ) -> EngineResult<document_version::Model> {
        self.administer(
            version_id,
            actor,
            WorkflowState::Draft,
            WorkflowState::Prepared,
            "Released from draft",
        )
        .await
    }

    /// Retire an `effective` version
    pub async fn archive(
        &self,
        version_id: Uuid,
        actor: Uuid,
    ) -> EngineResult<document_version::Model> {
        self.administer(
            version_id,
            actor,
            WorkflowState::Effective,
            WorkflowState::Archived,
            "Archived",
        )
        .await
    }

    async fn administer(
        &self,
        version_id: Uuid,
        actor: Uuid,
        from: WorkflowState,
        to: WorkflowState,
        note: &str,
    ) -> EngineResult<document_version::Model> {
        let txn = self.db.begin().await?;

        let version = lock_version(&txn, version_id).await?;
        let current = version.workflow_state.unwrap_or(WorkflowState::Prepared);
        if current != from {
            return Err(EngineError::InvalidTransition {
                version_id,
                from: state_name(current),
                to: state_name(to),
            });
        }

        let mut active: document_version::ActiveModel = version.into();
        active.workflow_state = Set(Some(to));
        if to == WorkflowState::Archived {
            active.version_status = Set(VersionStatus::Obsolete);
        }
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        append_log(&txn, version_id, to, StepStatus::Completed, actor, Some(note)).await?;

        txn.commit().await?;

        info!(
            "Version {} moved {} -> {} by {}",
            version_id,
            state_name(from),
            state_name(to),
            actor
        );

        Ok(updated)
    }

    /// Audit trail of a version, oldest first
    pub async fn workflow_log(
        &self,
        version_id: Uuid,
    ) -> EngineResult<Vec<document_version_workflow_log::Model>> {
        let rows = document_version_workflow_log::Entity::find()
            .filter(document_version_workflow_log::Column::DocumentVersionId.eq(version_id))
            .order_by_asc(document_version_workflow_log::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
