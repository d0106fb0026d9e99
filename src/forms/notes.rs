use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{NoteContent, TypeConstraintError};

#[derive(Debug, Deserialize, Validate)]
pub struct AddNoteForm {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddNoteFormPayload {
    pub content: NoteContent,
}

#[derive(Debug, Error)]
pub enum AddNoteFormError {
    #[error("Add note form validation failed: {0}")]
    Validation(String),
    #[error("Add note form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddNoteFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddNoteFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddNoteForm> for AddNoteFormPayload {
    type Error = AddNoteFormError;

    fn try_from(value: AddNoteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            content: NoteContent::new(value.content)?,
        })
    }
}
