//! Consolidated initial schema migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn now_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

fn owner_type_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .string_len(32)
        .not_null()
        .default("super_admin")
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // 1. Labs and lab membership
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Lab::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lab::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Lab::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Lab::Code)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Lab::Email).string_len(255))
                    .col(now_column(Lab::CreatedAt))
                    .col(now_column(Lab::UpdatedAt))
                    .col(ColumnDef::new(Lab::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LabUser::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LabUser::LabId).uuid().not_null())
                    .col(ColumnDef::new(LabUser::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(LabUser::Role)
                            .string_len(32)
                            .not_null()
                            .default("member"),
                    )
                    .col(now_column(LabUser::JoinedAt))
                    .primary_key(Index::create().col(LabUser::LabId).col(LabUser::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lab_users_lab_id")
                            .from(LabUser::Table, LabUser::LabId)
                            .to(Lab::Table, Lab::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lab_users_user_id")
                    .table(LabUser::Table)
                    .col(LabUser::UserId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 2. Master data: departments, categories, sub-categories
        //
        // parent_id is a lineage pointer and deliberately has no FK.
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Department::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Department::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Department::Name).string_len(255).not_null())
                    .col(owner_type_column(Department::OwnerType))
                    .col(ColumnDef::new(Department::OwnerId).uuid())
                    .col(ColumnDef::new(Department::ParentId).uuid())
                    .col(now_column(Department::CreatedAt))
                    .col(now_column(Department::UpdatedAt))
                    .col(ColumnDef::new(Department::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Category::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Category::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Category::Identifier).string_len(64))
                    .col(ColumnDef::new(Category::Description).text())
                    .col(owner_type_column(Category::OwnerType))
                    .col(ColumnDef::new(Category::OwnerId).uuid())
                    .col(ColumnDef::new(Category::ParentId).uuid())
                    .col(now_column(Category::CreatedAt))
                    .col(now_column(Category::UpdatedAt))
                    .col(ColumnDef::new(Category::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_categories_owner")
                    .table(Category::Table)
                    .col(Category::OwnerType)
                    .col(Category::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubCategory::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubCategory::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(SubCategory::Name).string_len(255).not_null())
                    .col(ColumnDef::new(SubCategory::Identifier).string_len(64))
                    .col(ColumnDef::new(SubCategory::Description).text())
                    .col(owner_type_column(SubCategory::OwnerType))
                    .col(ColumnDef::new(SubCategory::OwnerId).uuid())
                    .col(ColumnDef::new(SubCategory::ParentId).uuid())
                    .col(now_column(SubCategory::CreatedAt))
                    .col(now_column(SubCategory::UpdatedAt))
                    .col(ColumnDef::new(SubCategory::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_categories_category_id")
                            .from(SubCategory::Table, SubCategory::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sub_categories_category_id")
                    .table(SubCategory::Table)
                    .col(SubCategory::CategoryId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 3. Templates and template versions
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Template::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Template::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Template::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Template::Description).text())
                    .col(owner_type_column(Template::OwnerType))
                    .col(ColumnDef::new(Template::OwnerId).uuid())
                    .col(ColumnDef::new(Template::ParentId).uuid())
                    .col(ColumnDef::new(Template::CreatedBy).uuid())
                    .col(now_column(Template::CreatedAt))
                    .col(now_column(Template::UpdatedAt))
                    .col(ColumnDef::new(Template::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TemplateVersion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TemplateVersion::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TemplateVersion::TemplateId).uuid().not_null())
                    .col(
                        ColumnDef::new(TemplateVersion::MajorVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(TemplateVersion::MinorVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TemplateVersion::FullVersion)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplateVersion::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TemplateVersion::ChangeType)
                            .string_len(16)
                            .not_null()
                            .default("major"),
                    )
                    .col(ColumnDef::new(TemplateVersion::Message).text())
                    .col(ColumnDef::new(TemplateVersion::Content).json())
                    .col(ColumnDef::new(TemplateVersion::FormFields).json())
                    .col(ColumnDef::new(TemplateVersion::CreatedBy).uuid())
                    .col(now_column(TemplateVersion::CreatedAt))
                    .col(now_column(TemplateVersion::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_template_versions_template_id")
                            .from(TemplateVersion::Table, TemplateVersion::TemplateId)
                            .to(Template::Table, Template::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_template_versions_template_id")
                    .table(TemplateVersion::Table)
                    .col(TemplateVersion::TemplateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TemplateChangeHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TemplateChangeHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TemplateChangeHistory::TemplateId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplateChangeHistory::TemplateVersionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplateChangeHistory::ChangeContext)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplateChangeHistory::FieldName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TemplateChangeHistory::OldValue).json())
                    .col(ColumnDef::new(TemplateChangeHistory::NewValue).json())
                    .col(
                        ColumnDef::new(TemplateChangeHistory::ChangedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(now_column(TemplateChangeHistory::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_template_change_histories_template_id")
                            .from(
                                TemplateChangeHistory::Table,
                                TemplateChangeHistory::TemplateId,
                            )
                            .to(Template::Table, Template::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_template_change_histories_template_id")
                    .table(TemplateChangeHistory::Table)
                    .col(TemplateChangeHistory::TemplateId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 4. Documents and their department links
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Document::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Document::Number)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Document::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Document::Description).text())
                    .col(ColumnDef::new(Document::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(Document::SubCategoryId).uuid())
                    .col(
                        ColumnDef::new(Document::Status)
                            .string_len(32)
                            .not_null()
                            .default("controlled"),
                    )
                    .col(
                        ColumnDef::new(Document::Mode)
                            .string_len(16)
                            .not_null()
                            .default("create"),
                    )
                    .col(owner_type_column(Document::OwnerType))
                    .col(ColumnDef::new(Document::OwnerId).uuid())
                    .col(ColumnDef::new(Document::ParentId).uuid())
                    .col(ColumnDef::new(Document::CreatedBy).uuid())
                    .col(now_column(Document::CreatedAt))
                    .col(now_column(Document::UpdatedAt))
                    .col(ColumnDef::new(Document::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_category_id")
                            .from(Document::Table, Document::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_documents_owner")
                    .table(Document::Table)
                    .col(Document::OwnerType)
                    .col(Document::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DocumentDepartment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentDepartment::DocumentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentDepartment::DepartmentId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DocumentDepartment::DocumentId)
                            .col(DocumentDepartment::DepartmentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_departments_document_id")
                            .from(DocumentDepartment::Table, DocumentDepartment::DocumentId)
                            .to(Document::Table, Document::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_departments_department_id")
                            .from(DocumentDepartment::Table, DocumentDepartment::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 5. Document versions and their owned audit rows
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(DocumentVersion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentVersion::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DocumentVersion::DocumentId).uuid().not_null())
                    .col(
                        ColumnDef::new(DocumentVersion::MajorVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(DocumentVersion::MinorVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DocumentVersion::FullVersion)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersion::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(DocumentVersion::WorkflowState).string_len(32))
                    .col(
                        ColumnDef::new(DocumentVersion::VersionStatus)
                            .string_len(32)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(DocumentVersion::EffectiveDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(DocumentVersion::SchemaPayload).json())
                    .col(ColumnDef::new(DocumentVersion::FormFields).json())
                    .col(ColumnDef::new(DocumentVersion::CreatedBy).uuid())
                    .col(now_column(DocumentVersion::CreatedAt))
                    .col(now_column(DocumentVersion::UpdatedAt))
                    .col(ColumnDef::new(DocumentVersion::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_versions_document_id")
                            .from(DocumentVersion::Table, DocumentVersion::DocumentId)
                            .to(Document::Table, Document::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_document_versions_document_id")
                    .table(DocumentVersion::Table)
                    .col(DocumentVersion::DocumentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DocumentVersionAmendment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentVersionAmendment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersionAmendment::DocumentVersionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersionAmendment::AmendmentType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersionAmendment::AmendmentNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentVersionAmendment::Reason).text())
                    .col(
                        ColumnDef::new(DocumentVersionAmendment::AmendedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(now_column(DocumentVersionAmendment::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_version_amendments_version_id")
                            .from(
                                DocumentVersionAmendment::Table,
                                DocumentVersionAmendment::DocumentVersionId,
                            )
                            .to(DocumentVersion::Table, DocumentVersion::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Amendment numbers are unique per version
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_document_version_amendments_number")
                    .table(DocumentVersionAmendment::Table)
                    .col(DocumentVersionAmendment::DocumentVersionId)
                    .col(DocumentVersionAmendment::AmendmentNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DocumentVersionWorkflowLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentVersionWorkflowLog::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersionWorkflowLog::DocumentVersionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersionWorkflowLog::StepType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersionWorkflowLog::StepStatus)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersionWorkflowLog::PerformedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentVersionWorkflowLog::Comments).text())
                    .col(now_column(DocumentVersionWorkflowLog::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_version_workflow_logs_version_id")
                            .from(
                                DocumentVersionWorkflowLog::Table,
                                DocumentVersionWorkflowLog::DocumentVersionId,
                            )
                            .to(DocumentVersion::Table, DocumentVersion::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_document_version_workflow_logs_version_id")
                    .table(DocumentVersionWorkflowLog::Table)
                    .col(DocumentVersionWorkflowLog::DocumentVersionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DocumentVersionTemplate::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentVersionTemplate::DocumentVersionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersionTemplate::TemplateId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentVersionTemplate::TemplateVersionId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DocumentVersionTemplate::DocumentVersionId)
                            .col(DocumentVersionTemplate::TemplateId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_version_templates_version_id")
                            .from(
                                DocumentVersionTemplate::Table,
                                DocumentVersionTemplate::DocumentVersionId,
                            )
                            .to(DocumentVersion::Table, DocumentVersion::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_version_templates_template_id")
                            .from(
                                DocumentVersionTemplate::Table,
                                DocumentVersionTemplate::TemplateId,
                            )
                            .to(Template::Table, Template::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_version_templates_template_version_id")
                            .from(
                                DocumentVersionTemplate::Table,
                                DocumentVersionTemplate::TemplateVersionId,
                            )
                            .to(TemplateVersion::Table, TemplateVersion::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order (respecting foreign keys)
        manager
            .drop_table(Table::drop().table(DocumentVersionTemplate::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(DocumentVersionWorkflowLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DocumentVersionAmendment::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DocumentVersion::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DocumentDepartment::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Document::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TemplateChangeHistory::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TemplateVersion::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Template::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SubCategory::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Department::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(LabUser::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lab::Table).to_owned())
            .await?;

        Ok(())
    }
}

// ============================================================
// Table identifiers
// ============================================================

#[derive(DeriveIden)]
enum Lab {
    #[sea_orm(iden = "labs")]
    Table,
    Id,
    Name,
    Code,
    Email,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum LabUser {
    #[sea_orm(iden = "lab_users")]
    Table,
    LabId,
    UserId,
    Role,
    JoinedAt,
}

#[derive(DeriveIden)]
enum Department {
    #[sea_orm(iden = "departments")]
    Table,
    Id,
    Name,
    OwnerType,
    OwnerId,
    ParentId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Category {
    #[sea_orm(iden = "categories")]
    Table,
    Id,
    Name,
    Identifier,
    Description,
    OwnerType,
    OwnerId,
    ParentId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum SubCategory {
    #[sea_orm(iden = "sub_categories")]
    Table,
    Id,
    CategoryId,
    Name,
    Identifier,
    Description,
    OwnerType,
    OwnerId,
    ParentId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Template {
    #[sea_orm(iden = "templates")]
    Table,
    Id,
    Name,
    Description,
    OwnerType,
    OwnerId,
    ParentId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum TemplateVersion {
    #[sea_orm(iden = "template_versions")]
    Table,
    Id,
    TemplateId,
    MajorVersion,
    MinorVersion,
    FullVersion,
    IsCurrent,
    ChangeType,
    Message,
    Content,
    FormFields,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TemplateChangeHistory {
    #[sea_orm(iden = "template_change_histories")]
    Table,
    Id,
    TemplateId,
    TemplateVersionId,
    ChangeContext,
    FieldName,
    OldValue,
    NewValue,
    ChangedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Document {
    #[sea_orm(iden = "documents")]
    Table,
    Id,
    Number,
    Name,
    Description,
    CategoryId,
    SubCategoryId,
    Status,
    Mode,
    OwnerType,
    OwnerId,
    ParentId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum DocumentDepartment {
    #[sea_orm(iden = "document_departments")]
    Table,
    DocumentId,
    DepartmentId,
}

#[derive(DeriveIden)]
enum DocumentVersion {
    #[sea_orm(iden = "document_versions")]
    Table,
    Id,
    DocumentId,
    MajorVersion,
    MinorVersion,
    FullVersion,
    IsCurrent,
    WorkflowState,
    VersionStatus,
    EffectiveDate,
    SchemaPayload,
    FormFields,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum DocumentVersionAmendment {
    #[sea_orm(iden = "document_version_amendments")]
    Table,
    Id,
    DocumentVersionId,
    AmendmentType,
    AmendmentNumber,
    Reason,
    AmendedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DocumentVersionWorkflowLog {
    #[sea_orm(iden = "document_version_workflow_logs")]
    Table,
    Id,
    DocumentVersionId,
    StepType,
    StepStatus,
    PerformedBy,
    Comments,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DocumentVersionTemplate {
    #[sea_orm(iden = "document_version_templates")]
    Table,
    DocumentVersionId,
    TemplateId,
    TemplateVersionId,
}
