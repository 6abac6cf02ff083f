//! Error types for the document engine

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by workflow, amendment, template and cloning operations
///
/// Every operation that writes runs inside a single transaction, so any of these
/// errors means nothing from that call was persisted.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The version's workflow state is not part of the approval pipeline
    #[error("version {version_id} is in state '{state}', which is not a workflow step")]
    InvalidState { version_id: Uuid, state: String },

    /// The action is forbidden in the version's current state
    #[error("action '{action}' is not allowed while the version is {state}")]
    ActionNotAllowed { action: String, state: String },

    /// Unknown workflow action
    #[error("invalid workflow action: {0}")]
    InvalidAction(String),

    /// Administrative transition requested from the wrong state
    #[error("cannot move version {version_id} from {from} to {to}")]
    InvalidTransition {
        version_id: Uuid,
        from: String,
        to: String,
    },

    /// Amendment attempted on an archived version
    #[error("version {version_id} is archived and cannot be amended")]
    ArchivedDocument { version_id: Uuid },

    /// Change type outside {major, minor}
    #[error("invalid change type: {0}")]
    InvalidChangeType(String),

    /// Tenant header value could not be interpreted
    #[error("invalid tenant: {0}")]
    InvalidTenant(String),

    /// Referenced row does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Cloning a document into a lab hit a conflicting row
    #[error("failed to clone document {document_id}: {reason}")]
    CloneConflict { document_id: Uuid, reason: String },

    /// Underlying store failure
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl EngineError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Wrap a store error raised while cloning `document_id`
    ///
    /// Constraint violations become [`EngineError::CloneConflict`]; other store
    /// errors are passed through unchanged.
    pub(crate) fn from_clone_failure(document_id: Uuid, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(reason))
            | Some(SqlErr::ForeignKeyConstraintViolation(reason)) => {
                Self::CloneConflict { document_id, reason }
            }
            _ => Self::Database(err),
        }
    }

    /// Whether the caller can fix the request and try again
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidState { .. }
                | Self::ActionNotAllowed { .. }
                | Self::InvalidAction(_)
                | Self::InvalidTransition { .. }
                | Self::ArchivedDocument { .. }
                | Self::InvalidChangeType(_)
                | Self::InvalidTenant(_)
                | Self::NotFound { .. }
        )
    }

    /// Whether retrying the same call unchanged may succeed
    ///
    /// Constraint violations outside cloning are deterministic and never retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::CloneConflict { .. } => true,
            Self::Database(err) => !matches!(
                err.sql_err(),
                Some(SqlErr::UniqueConstraintViolation(_))
                    | Some(SqlErr::ForeignKeyConstraintViolation(_))
            ),
            _ => false,
        }
    }
}

/// Result alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_client_errors() {
        let err = EngineError::InvalidAction("approve".to_string());
        assert!(err.is_client_error());
        assert!(!err.is_retryable());

        let err = EngineError::not_found("document version", Uuid::nil());
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "document version not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_persistence_errors_are_retryable() {
        let err = EngineError::Database(DbErr::Custom("connection reset".to_string()));
        assert!(err.is_retryable());
        assert!(!err.is_client_error());

        let err = EngineError::CloneConflict {
            document_id: Uuid::nil(),
            reason: "duplicate number".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_non_constraint_clone_failure_passes_through() {
        let err = EngineError::from_clone_failure(Uuid::nil(), DbErr::Custom("boom".into()));
        assert!(matches!(err, EngineError::Database(_)));
    }
}
