//! Database entities

pub mod category;
pub mod common;
pub mod department;
pub mod document;
pub mod document_department;
pub mod document_version;
pub mod document_version_amendment;
pub mod document_version_template;
pub mod document_version_workflow_log;
pub mod lab;
pub mod lab_user;
pub mod sub_category;
pub mod template;
pub mod template_change_history;
pub mod template_version;

pub use category::Entity as Category;
pub use department::Entity as Department;
pub use document::Entity as Document;
pub use document_department::Entity as DocumentDepartment;
pub use document_version::Entity as DocumentVersion;
pub use document_version_amendment::Entity as DocumentVersionAmendment;
pub use document_version_template::Entity as DocumentVersionTemplate;
pub use document_version_workflow_log::Entity as DocumentVersionWorkflowLog;
pub use lab::Entity as Lab;
pub use lab_user::Entity as LabUser;
pub use sub_category::Entity as SubCategory;
pub use template::Entity as Template;
pub use template_change_history::Entity as TemplateChangeHistory;
pub use template_version::Entity as TemplateVersion;

pub mod prelude {
    pub use super::category::Entity as Category;
    pub use super::common::{ChangeType, OwnerType};
    pub use super::department::Entity as Department;
    pub use super::document::Entity as Document;
    pub use super::document_department::Entity as DocumentDepartment;
    pub use super::document_version::Entity as DocumentVersion;
    pub use super::document_version_amendment::Entity as DocumentVersionAmendment;
    pub use super::document_version_template::Entity as DocumentVersionTemplate;
    pub use super::document_version_workflow_log::Entity as DocumentVersionWorkflowLog;
    pub use super::lab::Entity as Lab;
    pub use super::lab_user::Entity as LabUser;
    pub use super::sub_category::Entity as SubCategory;
    pub use super::template::Entity as Template;
    pub use super::template_change_history::Entity as TemplateChangeHistory;
    pub use super::template_version::Entity as TemplateVersion;
}
