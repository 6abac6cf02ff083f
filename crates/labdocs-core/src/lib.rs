//! Document versioning and workflow engine for multi-tenant labs
//!
//! The engine sits behind a thin API layer and works directly on the
//! `labdocs-db` schema:
//!
//! - [`tenancy`]: owner context (`super_admin` or `lab:<id>`) from request headers
//! - [`versioning`]: `major.minor` numbering policy
//! - [`workflow`]: approval pipeline state machine with an audit log
//! - [`amendment`]: amendment numbering and version forks
//! - [`cloning`] and [`onboarding`]: replication of master data into labs
//! - [`template`] and [`history`]: template revisions and their change ledger
//!
//! # Example
//!
//! ```ignore
//! use labdocs_core::{WorkflowEngine, workflow::parse_action};
//!
//! let engine = WorkflowEngine::new(db);
//! let state = engine
//!     .act(version_id, parse_action("completed")?, actor_id, None)
//!     .await?;
//! ```

pub mod amendment;
pub mod cloning;
pub mod document;
pub mod error;
pub mod history;
pub mod onboarding;
pub mod replicate;
pub mod template;
pub mod tenancy;
pub mod versioning;
pub mod workflow;

pub use amendment::AmendmentRecorder;
pub use cloning::LabCloner;
pub use document::{DocumentService, DocumentWithVersion, NewDocument};
pub use error::{EngineError, EngineResult};
pub use onboarding::{CloneFailure, LabOnboarding, NewLab, OnboardingReport};
pub use template::{NewTemplate, TemplateService, TemplateWithVersion};
pub use tenancy::{ClonedFrom, Owner, TenantResolver};
pub use versioning::{next_version, VersionNumber};
pub use workflow::{WorkflowAction, WorkflowEngine};
