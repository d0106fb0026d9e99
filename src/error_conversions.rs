//! Error conversion glue between the domain, form, repository and service
//! layers.
//!
//! The domain layer must not depend on service/repository error types, so
//! the conversions live here instead of next to either side.

use crate::domain::types::TypeConstraintError;
use crate::forms::notes::AddNoteFormError;
use crate::forms::resources::{
    CreateResourceFormError, ResourceFilterFormError, UpdateResourceFormError,
};
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::ValidationFailure(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::QueryFailure(other.to_string()),
        }
    }
}

impl From<CreateResourceFormError> for ServiceError {
    fn from(val: CreateResourceFormError) -> Self {
        ServiceError::ValidationFailure(val.to_string())
    }
}

impl From<UpdateResourceFormError> for ServiceError {
    fn from(val: UpdateResourceFormError) -> Self {
        ServiceError::ValidationFailure(val.to_string())
    }
}

impl From<ResourceFilterFormError> for ServiceError {
    fn from(val: ResourceFilterFormError) -> Self {
        ServiceError::ValidationFailure(val.to_string())
    }
}

impl From<AddNoteFormError> for ServiceError {
    fn from(val: AddNoteFormError) -> Self {
        ServiceError::ValidationFailure(val.to_string())
    }
}
