//! Amendment recorder
//!
//! Amendments are numbered per version. Recording one against the current
//! `effective` version forks the next revision; on any other non-archived version
//! (superseded ones included) the row is kept for audit only.

use chrono::Utc;
use labdocs_db::entities::common::ChangeType;
use labdocs_db::entities::document_version::{self, VersionStatus, WorkflowState};
use labdocs_db::entities::{document_version_amendment, document_version_template};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::document::link_template;
use crate::error::{EngineError, EngineResult};
use crate::replicate::Replicate;
use crate::versioning::VersionNumber;
use crate::workflow::lock_version;

async fn next_amendment_number<C: ConnectionTrait>(
    conn: &C,
    version_id: Uuid,
) -> Result<i32, DbErr> {
    let latest = document_version_amendment::Entity::find()
        .filter(document_version_amendment::Column::DocumentVersionId.eq(version_id))
        .order_by_desc(document_version_amendment::Column::AmendmentNumber)
        .one(conn)
        .await?;

    Ok(latest.map(|a| a.amendment_number).unwrap_or(0) + 1)
}

/// Supersede `current` with a new `prepared` revision numbered per `change`
async fn fork_version<C: ConnectionTrait>(
    conn: &C,
    current: document_version::Model,
    change: ChangeType,
    actor: Uuid,
) -> Result<document_version::Model, DbErr> {
    let now = Utc::now();
    let number = VersionNumber::new(current.major_version, current.minor_version).bump(change);
    let mut next = current.replicate();

    let mut superseded: document_version::ActiveModel = current.clone().into();
    superseded.is_current = Set(false);
    superseded.version_status = Set(VersionStatus::Superseded);
    superseded.updated_at = Set(now);
    superseded.update(conn).await?;

    next.id = Set(Uuid::new_v4());
    next.document_id = Set(current.document_id);
    next.major_version = Set(number.major);
    next.minor_version = Set(number.minor);
    next.full_version = Set(number.to_string());
    next.is_current = Set(true);
    next.workflow_state = Set(Some(WorkflowState::Prepared));
    next.version_status = Set(VersionStatus::Active);
    next.effective_date = Set(None);
    next.created_by = Set(Some(actor));
    next.created_at = Set(now);
    next.updated_at = Set(now);
    next.deleted_at = Set(None);
    let next = next.insert(conn).await?;

    let links = document_version_template::Entity::find()
        .filter(document_version_template::Column::DocumentVersionId.eq(current.id))
        .all(conn)
        .await?;
    for link in links {
        link_template(conn, next.id, link.template_id, link.template_version_id).await?;
    }

    Ok(next)
}

/// Records change requests against document versions
#[derive(Clone)]
pub struct AmendmentRecorder {
    db: DatabaseConnection,
}

impl AmendmentRecorder {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record an amendment
    ///
    /// Returns the forked revision when `version_id` was the current effective
    /// version, otherwise the untouched version itself.
    pub async fn record_amendment(
        &self,
        version_id: Uuid,
        change_type: ChangeType,
        actor: Uuid,
        reason: Option<&str>,
    ) -> EngineResult<document_version::Model> {
        let txn = self.db.begin().await?;

        let version = lock_version(&txn, version_id).await?;
        let state = version.workflow_state.unwrap_or(WorkflowState::Prepared);
        if state == WorkflowState::Archived {
            return Err(EngineError::ArchivedDocument { version_id });
        }

        let number = next_amendment_number(&txn, version_id).await?;
        document_version_amendment::ActiveModel {
            document_version_id: Set(version_id),
            amendment_type: Set(change_type),
            amendment_number: Set(number),
            reason: Set(reason.map(str::to_string)),
            amended_by: Set(actor),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        // A superseded effective row has already been forked
        if state != WorkflowState::Effective || !version.is_current {
            txn.commit().await?;
            debug!(
                "Amendment #{} recorded on version {} ({:?}, current: {}), no fork",
                number, version_id, state, version.is_current
            );
            return Ok(version);
        }

        let from = version.full_version.clone();
        let forked = fork_version(&txn, version, change_type, actor).await?;

        txn.commit().await?;

        info!(
            "Amendment #{} on version {} forked {} -> {} ({})",
            number, version_id, from, forked.full_version, forked.id
        );

        Ok(forked)
    }

    /// Amendments recorded against a version, by number
    pub async fn amendments(
        &self,
        version_id: Uuid,
    ) -> EngineResult<Vec<document_version_amendment::Model>> {
        let rows = document_version_amendment::Entity::find()
            .filter(document_version_amendment::Column::DocumentVersionId.eq(version_id))
            .order_by_asc(document_version_amendment::Column::AmendmentNumber)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
