use std::fmt::{Display, Formatter};

use thiserror::Error;

/// The step a cascade delete had reached when it failed. Together with the
/// entity id this is enough to drive a manual or automated repair pass; the
/// service never retries a cascade on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStage {
    /// Deleting software records referencing the parent.
    Software,
    /// Deleting the subcategory record itself.
    SubCategoryRecord,
    /// Deleting the category record itself.
    CategoryRecord,
}

impl CascadeStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Software => "software",
            Self::SubCategoryRecord => "subcategory record",
            Self::CategoryRecord => "category record",
        }
    }
}

impl Display for CascadeStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request payload failed validation; never reaches storage.
    #[error("{0}")]
    Form(String),
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// A uniqueness invariant rejected the write.
    #[error("{0}")]
    Conflict(String),
    /// A cascade delete failed part-way through, leaving a recoverable but
    /// inconsistent intermediate state.
    #[error("cascade delete of {entity} {id} failed at the {stage} stage: {message}")]
    Cascade {
        entity: &'static str,
        id: i32,
        stage: CascadeStage,
        message: String,
    },
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
