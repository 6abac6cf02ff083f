//! Lab cloning engine
//!
//! Copies a master document, with the categories, departments and templates it
//! depends on, into a lab's own rows. Each copy points back at its master through
//! `parent_id`. One document is cloned per transaction; callers that clone
//! several documents handle each failure themselves (see
//! [`crate::onboarding::LabOnboarding`]).

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use labdocs_db::entities::document::DocumentMode;
use labdocs_db::entities::{
    category, department, document, document_department, document_version,
    document_version_template, lab, sub_category, template, template_version,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::document::{link_department, link_template, seed_first_version, DocumentWithVersion};
use crate::error::{EngineError, EngineResult};
use crate::replicate::Replicate;
use crate::template::{current_template_version, insert_initial_version};
use crate::tenancy::{ClonedFrom, Owner};

/// Strip a trailing `-<digits>` suffix from a document number
pub fn base_number(number: &str) -> &str {
    match number.rsplit_once('-') {
        Some((head, tail))
            if !head.is_empty() && !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) =>
        {
            head
        }
        _ => number,
    }
}

/// First `base-N` (N from 1) not present in `taken`
pub fn first_free_number(base: &str, taken: &HashSet<String>) -> String {
    let mut n: u64 = 1;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Probe for a free number across every document, soft-deleted ones included
async fn allocate_number<C: ConnectionTrait>(conn: &C, master_number: &str) -> EngineResult<String> {
    let base = base_number(master_number);

    // `_` or `%` in the base only widen the LIKE match; `taken` is checked exactly
    let taken: HashSet<String> = document::Entity::find()
        .filter(document::Column::Number.starts_with(format!("{}-", base)))
        .all(conn)
        .await?
        .into_iter()
        .map(|d| d.number)
        .collect();

    let number = first_free_number(base, &taken);
    debug!(
        "Allocated number {} for base {} ({} taken)",
        number,
        base,
        taken.len()
    );
    Ok(number)
}

fn lab_owned<T, I>(lab_id: Uuid, owner_type: T, owner_id: I) -> sea_orm::Condition
where
    T: ColumnTrait,
    I: ColumnTrait,
{
    Owner::Lab(lab_id).scope(owner_type, owner_id)
}

/// Lab copy of a master category, created on first use
async fn resolve_category<C: ConnectionTrait>(
    conn: &C,
    master: &category::Model,
    lab_id: Uuid,
) -> EngineResult<category::Model> {
    let existing = category::Entity::find()
        .filter(lab_owned(
            lab_id,
            category::Column::OwnerType,
            category::Column::OwnerId,
        ))
        .filter(category::Column::Name.eq(master.name.as_str()))
        .filter(category::Column::DeletedAt.is_null())
        .one(conn)
        .await?;

    if let Some(found) = existing {
        debug!("Lab {} already has category {}", lab_id, found.name);
        return Ok(found);
    }

    let now = Utc::now();
    let (owner_type, owner_id) = Owner::Lab(lab_id).to_columns();
    let mut copy = master.replicate();
    copy.id = Set(Uuid::new_v4());
    copy.owner_type = Set(owner_type);
    copy.owner_id = Set(owner_id);
    copy.parent_id = Set(ClonedFrom(master.id).as_column());
    copy.created_at = Set(now);
    copy.updated_at = Set(now);
    copy.deleted_at = Set(None);

    Ok(copy.insert(conn).await?)
}

/// Lab copies of every sub-category of `master_category`, keyed by master id
async fn resolve_sub_categories<C: ConnectionTrait>(
    conn: &C,
    master_category: &category::Model,
    lab_category: &category::Model,
    lab_id: Uuid,
) -> EngineResult<HashMap<Uuid, Uuid>> {
    let masters = sub_category::Entity::find()
        .filter(sub_category::Column::CategoryId.eq(master_category.id))
        .filter(sub_category::Column::DeletedAt.is_null())
        .all(conn)
        .await?;

    let mut resolved = HashMap::with_capacity(masters.len());
    for master in masters {
        let existing = sub_category::Entity::find()
            .filter(sub_category::Column::CategoryId.eq(lab_category.id))
            .filter(sub_category::Column::Name.eq(master.name.as_str()))
            .filter(sub_category::Column::DeletedAt.is_null())
            .one(conn)
            .await?;

        let lab_sub = match existing {
            Some(found) => found,
            None => {
                let now = Utc::now();
                let (owner_type, owner_id) = Owner::Lab(lab_id).to_columns();
                let mut copy = master.replicate();
                copy.id = Set(Uuid::new_v4());
                copy.category_id = Set(lab_category.id);
                copy.owner_type = Set(owner_type);
                copy.owner_id = Set(owner_id);
                copy.parent_id = Set(ClonedFrom(master.id).as_column());
                copy.created_at = Set(now);
                copy.updated_at = Set(now);
                copy.deleted_at = Set(None);
                copy.insert(conn).await?
            }
        };
        resolved.insert(master.id, lab_sub.id);
    }

    Ok(resolved)
}

/// Clone a master template and its current version into the lab
async fn clone_template<C: ConnectionTrait>(
    conn: &C,
    link: &document_version_template::Model,
    lab_id: Uuid,
    actor: Uuid,
) -> EngineResult<(template::Model, Uuid)> {
    let master = template::Entity::find_by_id(link.template_id)
        .filter(template::Column::DeletedAt.is_null())
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::not_found("template", link.template_id))?;

    let master_version = match current_template_version(conn, master.id).await? {
        Some(current) => current,
        None => pinned_template_version(conn, link).await?,
    };

    let now = Utc::now();
    let (owner_type, owner_id) = Owner::Lab(lab_id).to_columns();
    let mut copy = master.replicate();
    copy.id = Set(Uuid::new_v4());
    copy.owner_type = Set(owner_type);
    copy.owner_id = Set(owner_id);
    copy.parent_id = Set(ClonedFrom(master.id).as_column());
    copy.created_by = Set(Some(actor));
    copy.created_at = Set(now);
    copy.updated_at = Set(now);
    copy.deleted_at = Set(None);
    let copy = copy.insert(conn).await?;

    let version = insert_initial_version(conn, copy.id, master_version.replicate(), actor).await?;

    Ok((copy, version.id))
}

/// The pinned version, used when a master template has no current version
async fn pinned_template_version<C: ConnectionTrait>(
    conn: &C,
    link: &document_version_template::Model,
) -> EngineResult<template_version::Model> {
    template_version::Entity::find_by_id(link.template_version_id)
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::not_found("template version", link.template_version_id))
}

/// Replicates master data into labs
#[derive(Clone)]
pub struct LabCloner {
    db: DatabaseConnection,
}

impl LabCloner {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Clone one master document into `lab_id`
    ///
    /// Runs in a single transaction: on error nothing from this call persists.
    /// Constraint violations are reported as [`EngineError::CloneConflict`].
    pub async fn clone_document_for_lab(
        &self,
        master_document_id: Uuid,
        lab_id: Uuid,
        actor: Uuid,
    ) -> EngineResult<DocumentWithVersion> {
        self.clone_in_transaction(master_document_id, lab_id, actor)
            .await
            .map_err(|err| match err {
                EngineError::Database(db_err) => {
                    EngineError::from_clone_failure(master_document_id, db_err)
                }
                other => other,
            })
    }

    async fn clone_in_transaction(
        &self,
        master_document_id: Uuid,
        lab_id: Uuid,
        actor: Uuid,
    ) -> EngineResult<DocumentWithVersion> {
        let txn = self.db.begin().await?;

        lab::Entity::find_by_id(lab_id)
            .filter(lab::Column::DeletedAt.is_null())
            .one(&txn)
            .await?
            .ok_or_else(|| EngineError::not_found("lab", lab_id))?;

        let master = document::Entity::find_by_id(master_document_id)
            .filter(document::Column::DeletedAt.is_null())
            .one(&txn)
            .await?
            .ok_or_else(|| EngineError::not_found("document", master_document_id))?;

        let master_category = category::Entity::find_by_id(master.category_id)
            .one(&txn)
            .await?
            .ok_or_else(|| EngineError::not_found("category", master.category_id))?;

        let lab_category = resolve_category(&txn, &master_category, lab_id).await?;
        let sub_categories =
            resolve_sub_categories(&txn, &master_category, &lab_category, lab_id).await?;

        let number = allocate_number(&txn, &master.number).await?;

        let now = Utc::now();
        let (owner_type, owner_id) = Owner::Lab(lab_id).to_columns();
        let mut copy = master.replicate();
        copy.id = Set(Uuid::new_v4());
        copy.number = Set(number);
        copy.category_id = Set(lab_category.id);
        copy.sub_category_id = Set(master
            .sub_category_id
            .and_then(|id| sub_categories.get(&id).copied()));
        copy.owner_type = Set(owner_type);
        copy.owner_id = Set(owner_id);
        copy.parent_id = Set(ClonedFrom(master.id).as_column());
        copy.created_by = Set(Some(actor));
        copy.created_at = Set(now);
        copy.updated_at = Set(now);
        copy.deleted_at = Set(None);
        let document = copy.insert(&txn).await?;

        let master_links = document_department::Entity::find()
            .filter(document_department::Column::DocumentId.eq(master.id))
            .all(&txn)
            .await?;
        for link in master_links {
            let lab_department = department::Entity::find()
                .filter(lab_owned(
                    lab_id,
                    department::Column::OwnerType,
                    department::Column::OwnerId,
                ))
                .filter(department::Column::ParentId.eq(link.department_id))
                .filter(department::Column::DeletedAt.is_null())
                .one(&txn)
                .await?;

            match lab_department {
                Some(found) => link_department(&txn, document.id, found.id).await?,
                None => warn!(
                    "Lab {} has no copy of department {}, link skipped for {}",
                    lab_id, link.department_id, document.number
                ),
            }
        }

        let master_version = document_version::Entity::find()
            .filter(document_version::Column::DocumentId.eq(master.id))
            .filter(document_version::Column::IsCurrent.eq(true))
            .filter(document_version::Column::DeletedAt.is_null())
            .one(&txn)
            .await?
            .ok_or_else(|| EngineError::not_found("current document version", master.id))?;

        let version =
            seed_first_version(&txn, &document, master_version.replicate(), actor).await?;

        if document.mode == DocumentMode::Create {
            let template_links = document_version_template::Entity::find()
                .filter(document_version_template::Column::DocumentVersionId.eq(master_version.id))
                .all(&txn)
                .await?;
            for link in &template_links {
                let (lab_template, lab_template_version) =
                    clone_template(&txn, link, lab_id, actor).await?;
                link_template(&txn, version.id, lab_template.id, lab_template_version).await?;
            }
        }

        txn.commit().await?;

        info!(
            "Cloned document {} as {} into lab {} ({:?} mode)",
            master.number, document.number, lab_id, document.mode
        );

        Ok(DocumentWithVersion { document, version })
    }

    /// Copy every master department the lab does not have yet
    ///
    /// Returns all of the lab's departments that descend from a master row.
    pub async fn clone_departments_for_lab(
        &self,
        lab_id: Uuid,
    ) -> EngineResult<Vec<department::Model>> {
        let txn = self.db.begin().await?;

        let masters = department::Entity::find()
            .filter(Owner::SuperAdmin.scope(
                department::Column::OwnerType,
                department::Column::OwnerId,
            ))
            .filter(department::Column::DeletedAt.is_null())
            .all(&txn)
            .await?;

        let mut lab_departments = Vec::with_capacity(masters.len());
        for master in masters {
            let existing = department::Entity::find()
                .filter(lab_owned(
                    lab_id,
                    department::Column::OwnerType,
                    department::Column::OwnerId,
                ))
                .filter(department::Column::ParentId.eq(master.id))
                .filter(department::Column::DeletedAt.is_null())
                .one(&txn)
                .await?;

            let resolved = match existing {
                Some(found) => found,
                None => {
                    let now = Utc::now();
                    let (owner_type, owner_id) = Owner::Lab(lab_id).to_columns();
                    let mut copy = master.replicate();
                    copy.id = Set(Uuid::new_v4());
                    copy.owner_type = Set(owner_type);
                    copy.owner_id = Set(owner_id);
                    copy.parent_id = Set(ClonedFrom(master.id).as_column());
                    copy.created_at = Set(now);
                    copy.updated_at = Set(now);
                    copy.deleted_at = Set(None);
                    copy.insert(&txn).await?
                }
            };
            lab_departments.push(resolved);
        }

        txn.commit().await?;

        debug!(
            "Lab {} holds {} master-derived departments",
            lab_id,
            lab_departments.len()
        );

        Ok(lab_departments)
    }
}
