use diesel::r2d2::PoolError;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors surfaced by the storage adapter.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Referenced record does not exist.
    #[error("not found")]
    NotFound,
    /// A unique index rejected the write. The duplicate-check-then-insert
    /// race resolves here: the index is authoritative, not the pre-check.
    #[error("conflict: {0}")]
    Conflict(String),
    /// A stored value failed domain validation while being mapped out.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// A concurrent query worker terminated abnormally.
    #[error("concurrent query worker failed")]
    WorkerFailure,
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("database error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

/// Convenient alias for results returned from repository methods.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
