//! Lab onboarding
//!
//! Creates the lab, then clones master data into it one document at a time. A
//! failed document is reported and skipped; documents cloned before it stay.

use chrono::Utc;
use labdocs_db::entities::lab;
use labdocs_db::entities::lab_user::{self, LabRole};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::cloning::LabCloner;
use crate::document::DocumentWithVersion;
use crate::error::EngineResult;

/// Input for [`LabOnboarding::onboard`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLab {
    pub name: String,
    pub code: String,
    pub email: Option<String>,
    /// User made lab admin; defaults to the acting user
    pub admin_user_id: Option<Uuid>,
}

/// A master document that could not be cloned
#[derive(Debug, Clone, Serialize)]
pub struct CloneFailure {
    pub master_document_id: Uuid,
    pub error: String,
    pub retryable: bool,
}

/// Outcome of onboarding a lab
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingReport {
    pub lab: lab::Model,
    pub departments: usize,
    pub cloned: Vec<DocumentWithVersion>,
    pub failed: Vec<CloneFailure>,
}

impl OnboardingReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Clone)]
pub struct LabOnboarding {
    db: DatabaseConnection,
    cloner: LabCloner,
}

impl LabOnboarding {
    pub fn new(db: DatabaseConnection) -> Self {
        let cloner = LabCloner::new(db.clone());
        Self { db, cloner }
    }

    /// Create a lab and clone the selected master documents into it
    ///
    /// Errors only when the lab itself cannot be created or its departments
    /// cannot be cloned. Per-document failures land in
    /// [`OnboardingReport::failed`].
    pub async fn onboard(
        &self,
        input: NewLab,
        master_document_ids: &[Uuid],
        actor: Uuid,
    ) -> EngineResult<OnboardingReport> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let lab = lab::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            code: Set(input.code),
            email: Set(input.email),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&txn)
        .await?;

        lab_user::ActiveModel {
            lab_id: Set(lab.id),
            user_id: Set(input.admin_user_id.unwrap_or(actor)),
            role: Set(LabRole::Admin),
            joined_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!("Onboarded lab {} ({})", lab.code, lab.id);

        let departments = self.cloner.clone_departments_for_lab(lab.id).await?;

        let mut cloned = Vec::with_capacity(master_document_ids.len());
        let mut failed = Vec::new();
        for master_document_id in master_document_ids {
            match self
                .cloner
                .clone_document_for_lab(*master_document_id, lab.id, actor)
                .await
            {
                Ok(copy) => cloned.push(copy),
                Err(e) => {
                    warn!(
                        "Failed to clone document {} into lab {}: {}",
                        master_document_id, lab.code, e
                    );
                    failed.push(CloneFailure {
                        master_document_id: *master_document_id,
                        retryable: e.is_retryable(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Lab {} onboarding finished: {} cloned, {} failed",
            lab.code,
            cloned.len(),
            failed.len()
        );

        Ok(OnboardingReport {
            lab,
            departments: departments.len(),
            cloned,
            failed,
        })
    }
}
