//! Content-only copies of rows
//!
//! [`Replicate::replicate`] produces an `ActiveModel` where only the content
//! columns are `Set`. Identity, ownership, lineage, numbering and timestamps stay
//! `NotSet` and must be assigned explicitly by the caller before insert.

use labdocs_db::entities::{
    category, department, document, document_version, sub_category, template, template_version,
};
use sea_orm::{ActiveModelTrait, Set};

pub trait Replicate {
    type Copy: ActiveModelTrait;

    fn replicate(&self) -> Self::Copy;
}

impl Replicate for department::Model {
    type Copy = department::ActiveModel;

    fn replicate(&self) -> Self::Copy {
        department::ActiveModel {
            name: Set(self.name.clone()),
            ..Default::default()
        }
    }
}

impl Replicate for category::Model {
    type Copy = category::ActiveModel;

    fn replicate(&self) -> Self::Copy {
        category::ActiveModel {
            name: Set(self.name.clone()),
            identifier: Set(self.identifier.clone()),
            description: Set(self.description.clone()),
            ..Default::default()
        }
    }
}

impl Replicate for sub_category::Model {
    type Copy = sub_category::ActiveModel;

    fn replicate(&self) -> Self::Copy {
        sub_category::ActiveModel {
            name: Set(self.name.clone()),
            identifier: Set(self.identifier.clone()),
            description: Set(self.description.clone()),
            ..Default::default()
        }
    }
}

impl Replicate for document::Model {
    type Copy = document::ActiveModel;

    fn replicate(&self) -> Self::Copy {
        document::ActiveModel {
            name: Set(self.name.clone()),
            description: Set(self.description.clone()),
            status: Set(self.status),
            mode: Set(self.mode),
            ..Default::default()
        }
    }
}

impl Replicate for document_version::Model {
    type Copy = document_version::ActiveModel;

    fn replicate(&self) -> Self::Copy {
        document_version::ActiveModel {
            schema_payload: Set(self.schema_payload.clone()),
            form_fields: Set(self.form_fields.clone()),
            ..Default::default()
        }
    }
}

impl Replicate for template::Model {
    type Copy = template::ActiveModel;

    fn replicate(&self) -> Self::Copy {
        template::ActiveModel {
            name: Set(self.name.clone()),
            description: Set(self.description.clone()),
            ..Default::default()
        }
    }
}

impl Replicate for template_version::Model {
    type Copy = template_version::ActiveModel;

    fn replicate(&self) -> Self::Copy {
        template_version::ActiveModel {
            content: Set(self.content.clone()),
            form_fields: Set(self.form_fields.clone()),
            ..Default::default()
        }
    }
}
