//! Predicate-scoped unique indexes
//!
//! Master-data names are unique per owner, never globally, and at most one
//! version per document/template may be flagged current. Both PostgreSQL and
//! SQLite accept `CREATE UNIQUE INDEX ... WHERE`, so the statements are shared.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SCOPED_INDEXES: &[(&str, &str)] = &[
    (
        "uq_categories_lab_name",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_categories_lab_name \
         ON categories (owner_id, name) \
         WHERE owner_type = 'lab' AND deleted_at IS NULL",
    ),
    (
        "uq_categories_master_name",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_categories_master_name \
         ON categories (name) \
         WHERE owner_type = 'super_admin' AND deleted_at IS NULL",
    ),
    (
        "uq_categories_lab_identifier",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_categories_lab_identifier \
         ON categories (owner_id, identifier) \
         WHERE owner_type = 'lab' AND identifier IS NOT NULL AND deleted_at IS NULL",
    ),
    (
        "uq_categories_master_identifier",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_categories_master_identifier \
         ON categories (identifier) \
         WHERE owner_type = 'super_admin' AND identifier IS NOT NULL AND deleted_at IS NULL",
    ),
    (
        "uq_sub_categories_category_name",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_sub_categories_category_name \
         ON sub_categories (category_id, name) \
         WHERE deleted_at IS NULL",
    ),
    (
        "uq_departments_lab_name",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_departments_lab_name \
         ON departments (owner_id, name) \
         WHERE owner_type = 'lab' AND deleted_at IS NULL",
    ),
    (
        "uq_departments_master_name",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_departments_master_name \
         ON departments (name) \
         WHERE owner_type = 'super_admin' AND deleted_at IS NULL",
    ),
    (
        "uq_document_versions_current",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_document_versions_current \
         ON document_versions (document_id) \
         WHERE is_current = TRUE",
    ),
    (
        "uq_template_versions_current",
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_template_versions_current \
         ON template_versions (template_id) \
         WHERE is_current = TRUE",
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        for (_, sql) in SCOPED_INDEXES {
            db.execute_unprepared(sql).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        for (name, _) in SCOPED_INDEXES.iter().rev() {
            db.execute_unprepared(&format!("DROP INDEX IF EXISTS {}", name))
                .await?;
        }

        Ok(())
    }
}
