//! Template versioning
//!
//! Templates share the document versioning shape without a workflow: one
//! version per template is current, and every write is mirrored into the change
//! ledger.

use chrono::Utc;
use labdocs_db::entities::common::ChangeType;
use labdocs_db::entities::template_change_history::{self, ChangeContext};
use labdocs_db::entities::{template, template_version};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::history::{record_changes, version_snapshot};
use crate::tenancy::Owner;
use crate::versioning::VersionNumber;

pub(crate) const INITIAL_VERSION_MESSAGE: &str = "Initial version";

/// Input for [`TemplateService::create_template`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    pub description: Option<String>,
    pub content: Option<Json>,
    pub form_fields: Option<Json>,
}

/// A template together with one of its versions
#[derive(Debug, Clone, Serialize)]
pub struct TemplateWithVersion {
    pub template: template::Model,
    pub version: template_version::Model,
}

/// Insert version 1.0 of a template and its `create` ledger rows
///
/// `seed` carries the content columns; numbering, currency and audit columns are
/// assigned here.
pub(crate) async fn insert_initial_version<C: ConnectionTrait>(
    conn: &C,
    template_id: Uuid,
    seed: template_version::ActiveModel,
    actor: Uuid,
) -> Result<template_version::Model, DbErr> {
    let now = Utc::now();
    let initial = VersionNumber::INITIAL;

    let mut version = seed;
    version.id = Set(Uuid::new_v4());
    version.template_id = Set(template_id);
    version.major_version = Set(initial.major);
    version.minor_version = Set(initial.minor);
    version.full_version = Set(initial.to_string());
    version.is_current = Set(true);
    version.change_type = Set(ChangeType::Major);
    version.message = Set(Some(INITIAL_VERSION_MESSAGE.to_string()));
    version.created_by = Set(Some(actor));
    version.created_at = Set(now);
    version.updated_at = Set(now);
    let version = version.insert(conn).await?;

    record_changes(
        conn,
        template_id,
        version.id,
        ChangeContext::Create,
        None,
        &version_snapshot(&version),
        actor,
    )
    .await?;

    Ok(version)
}

/// Current version of a template, if any
pub(crate) async fn current_template_version<C: ConnectionTrait>(
    conn: &C,
    template_id: Uuid,
) -> Result<Option<template_version::Model>, DbErr> {
    template_version::Entity::find()
        .filter(template_version::Column::TemplateId.eq(template_id))
        .filter(template_version::Column::IsCurrent.eq(true))
        .one(conn)
        .await
}

async fn find_template<C: ConnectionTrait>(
    conn: &C,
    template_id: Uuid,
) -> EngineResult<template::Model> {
    template::Entity::find_by_id(template_id)
        .filter(template::Column::DeletedAt.is_null())
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::not_found("template", template_id))
}

/// Template authoring operations
#[derive(Clone)]
pub struct TemplateService {
    db: DatabaseConnection,
}

impl TemplateService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a template with its first version
    pub async fn create_template(
        &self,
        owner: Owner,
        input: NewTemplate,
        actor: Uuid,
    ) -> EngineResult<TemplateWithVersion> {
        let txn = self.db.begin().await?;
        let now = Utc::now();
        let (owner_type, owner_id) = owner.to_columns();

        let template = template::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
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

        let seed = template_version::ActiveModel {
            content: Set(input.content),
            form_fields: Set(input.form_fields),
            ..Default::default()
        };
        let version = insert_initial_version(&txn, template.id, seed, actor).await?;

        txn.commit().await?;

        info!(
            "Created template {} ({}) for {}",
            template.id, template.name, owner
        );

        Ok(TemplateWithVersion { template, version })
    }

    /// Edit a version's content in place
    ///
    /// Logged as `current` when the version is current, else `old_version`.
    pub async fn update_version_content(
        &self,
        version_id: Uuid,
        content: Json,
        actor: Uuid,
    ) -> EngineResult<template_version::Model> {
        let txn = self.db.begin().await?;

        let version = template_version::Entity::find_by_id(version_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| EngineError::not_found("template version", version_id))?;

        let before = version_snapshot(&version);
        let context = if version.is_current {
            ChangeContext::Current
        } else {
            ChangeContext::OldVersion
        };

        let mut active: template_version::ActiveModel = version.into();
        active.content = Set(Some(content));
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        let rows = record_changes(
            &txn,
            updated.template_id,
            updated.id,
            context,
            Some(&before),
            &version_snapshot(&updated),
            actor,
        )
        .await?;

        txn.commit().await?;

        debug!(
            "Template version {} edited ({} field changes)",
            version_id,
            rows.len()
        );

        Ok(updated)
    }

    /// Publish a new current version of a template
    ///
    /// Numbered from the highest existing version. Content defaults to that of
    /// the version being replaced.
    pub async fn revise(
        &self,
        template_id: Uuid,
        change_type: ChangeType,
        content: Option<Json>,
        message: Option<&str>,
        actor: Uuid,
    ) -> EngineResult<template_version::Model> {
        let txn = self.db.begin().await?;
        find_template(&txn, template_id).await?;

        let latest = template_version::Entity::find()
            .filter(template_version::Column::TemplateId.eq(template_id))
            .order_by_desc(template_version::Column::MajorVersion)
            .order_by_desc(template_version::Column::MinorVersion)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| EngineError::not_found("template version", template_id))?;

        let previous = match current_template_version(&txn, template_id).await? {
            Some(current) => {
                let mut active: template_version::ActiveModel = current.clone().into();
                active.is_current = Set(false);
                active.updated_at = Set(Utc::now());
                active.update(&txn).await?;
                Some(current)
            }
            None => None,
        };

        let number =
            VersionNumber::new(latest.major_version, latest.minor_version).bump(change_type);
        let base = previous.as_ref().unwrap_or(&latest);
        let now = Utc::now();

        let revised = template_version::ActiveModel {
            id: Set(Uuid::new_v4()),
            template_id: Set(template_id),
            major_version: Set(number.major),
            minor_version: Set(number.minor),
            full_version: Set(number.to_string()),
            is_current: Set(true),
            change_type: Set(change_type),
            message: Set(message.map(str::to_string)),
            content: Set(content.or_else(|| base.content.clone())),
            form_fields: Set(base.form_fields.clone()),
            created_by: Set(Some(actor)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let before = previous.as_ref().map(version_snapshot);
        record_changes(
            &txn,
            template_id,
            revised.id,
            ChangeContext::ChangeCurrent,
            before.as_ref(),
            &version_snapshot(&revised),
            actor,
        )
        .await?;

        txn.commit().await?;

        info!(
            "Template {} revised to {} by {}",
            template_id, revised.full_version, actor
        );

        Ok(revised)
    }

    /// Make an existing version the current one
    pub async fn set_current(
        &self,
        version_id: Uuid,
        actor: Uuid,
    ) -> EngineResult<template_version::Model> {
        let txn = self.db.begin().await?;

        let target = template_version::Entity::find_by_id(version_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| EngineError::not_found("template version", version_id))?;

        if target.is_current {
            return Ok(target);
        }

        let previous = match current_template_version(&txn, target.template_id).await? {
            Some(current) => {
                let mut active: template_version::ActiveModel = current.clone().into();
                active.is_current = Set(false);
                active.updated_at = Set(Utc::now());
                active.update(&txn).await?;
                Some(current)
            }
            None => None,
        };

        let mut active: template_version::ActiveModel = target.into();
        active.is_current = Set(true);
        active.updated_at = Set(Utc::now());
        let current = active.update(&txn).await?;

        let before = previous.as_ref().map(version_snapshot);
        record_changes(
            &txn,
            current.template_id,
            current.id,
            ChangeContext::ChangeCurrent,
            before.as_ref(),
            &version_snapshot(&current),
            actor,
        )
        .await?;

        txn.commit().await?;

        info!(
            "Template {} now points at version {}",
            current.template_id, current.full_version
        );

        Ok(current)
    }

    /// All versions of a template, oldest first
    pub async fn versions(&self, template_id: Uuid) -> EngineResult<Vec<template_version::Model>> {
        let rows = template_version::Entity::find()
            .filter(template_version::Column::TemplateId.eq(template_id))
            .order_by_asc(template_version::Column::MajorVersion)
            .order_by_asc(template_version::Column::MinorVersion)
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Ledger rows of a template in insertion order
    pub async fn history(
        &self,
        template_id: Uuid,
    ) -> EngineResult<Vec<template_change_history::Model>> {
        let rows = template_change_history::Entity::find()
            .filter(template_change_history::Column::TemplateId.eq(template_id))
            .order_by_asc(template_change_history::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
