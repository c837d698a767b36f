use crate::entry_limits::EntryLimitViolation;
use crate::types::DbId;

/// Message returned when a confirmation no longer matches a live hold.
pub const SESSION_EXPIRED_MESSAGE: &str = "missing lock for entry";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Entities not found: {entity} with ids {ids:?}")]
    NotFoundMany {
        entity: &'static str,
        ids: Vec<DbId>,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A requested band is neither confirmed nor held by the presented session.
    #[error("{SESSION_EXPIRED_MESSAGE}")]
    SessionExpired,

    /// The requested band set breaks a per-day business limit.
    #[error(transparent)]
    EntryLimit(#[from] EntryLimitViolation),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
