use thiserror::Error;

/// Typed failure reasons returned by every service function.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Caller input was malformed: bad zipcode, missing field, unknown
    /// category and so on.
    #[error("validation failed: {0}")]
    ValidationFailure(String),
    /// Referenced entity does not exist.
    #[error("not found")]
    NotFound,
    /// The viewer is not allowed to perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// The store could not answer; not attributable to caller input.
    #[error("query failed: {0}")]
    QueryFailure(String),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
