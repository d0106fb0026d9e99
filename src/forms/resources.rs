use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidateEmail, ValidationErrors};

use crate::domain::resource::{ContactDetails, NewResource, ResourceFilter, ResourceUpdate};
use crate::domain::types::{
    OrganizationName, ProgramName, ResourceCategory, ResourceStatus, TypeConstraintError, Zipcode,
};

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims every text field of the contact document, drops blank ones and
/// checks the email address when one is given.
fn normalize_contact_details(
    details: ContactDetails,
) -> Result<ContactDetails, TypeConstraintError> {
    let clean_list = |list: Option<Vec<String>>| {
        list.map(|items| {
            items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|items| !items.is_empty())
    };

    let email = blank_to_none(details.email);
    if let Some(email) = &email {
        if !email.as_str().validate_email() {
            return Err(TypeConstraintError::InvalidValue(format!(
                "contact email: {email}"
            )));
        }
    }

    Ok(ContactDetails {
        address: blank_to_none(details.address),
        phone: blank_to_none(details.phone),
        email,
        website: blank_to_none(details.website),
        description: blank_to_none(details.description),
        services: clean_list(details.services),
        eligibility: clean_list(details.eligibility),
        hours: details.hours.filter(|hours| !hours.is_empty()),
    })
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceForm {
    #[validate(length(min = 1, max = 255))]
    pub organization: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub program: Option<String>,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contact_details: ContactDetails,
    #[validate(length(min = 5, max = 10))]
    pub zipcode: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateResourceFormPayload {
    pub organization: OrganizationName,
    pub program: Option<ProgramName>,
    pub category: ResourceCategory,
    pub status: ResourceStatus,
    pub contact_details: ContactDetails,
    pub zipcode: Zipcode,
}

impl CreateResourceFormPayload {
    /// Stamp both timestamps with `now`.
    pub fn into_new_resource(self, now: NaiveDateTime) -> NewResource {
        NewResource {
            organization: self.organization,
            program: self.program,
            category: self.category,
            status: self.status,
            contact_details: self.contact_details,
            zipcode: self.zipcode,
            created_at: now,
            last_updated: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateResourceFormError {
    #[error("Create resource form validation failed: {0}")]
    Validation(String),
    #[error("Create resource form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateResourceFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateResourceFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateResourceForm> for CreateResourceFormPayload {
    type Error = CreateResourceFormError;

    fn try_from(value: CreateResourceForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            organization: OrganizationName::new(value.organization)?,
            program: blank_to_none(value.program)
                .map(ProgramName::new)
                .transpose()?,
            category: ResourceCategory::try_from(value.category)?,
            status: blank_to_none(value.status)
                .map(ResourceStatus::try_from)
                .transpose()?
                .unwrap_or_default(),
            contact_details: normalize_contact_details(value.contact_details)?,
            zipcode: Zipcode::new(value.zipcode)?,
        })
    }
}

/// Partial update of a resource's status and contact details.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceForm {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contact_details: Option<ContactDetails>,
    /// Accepted from older clients and ignored.
    #[serde(default, alias = "suggest_removal")]
    pub suggest_removal: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResourceFormPayload {
    pub status: Option<ResourceStatus>,
    pub contact_details: Option<ContactDetails>,
}

impl UpdateResourceFormPayload {
    pub fn into_update(self, now: NaiveDateTime) -> ResourceUpdate {
        ResourceUpdate {
            status: self.status,
            contact_details: self.contact_details,
            last_updated: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdateResourceFormError {
    #[error("Update resource form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for UpdateResourceFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateResourceForm> for UpdateResourceFormPayload {
    type Error = UpdateResourceFormError;

    fn try_from(value: UpdateResourceForm) -> Result<Self, Self::Error> {
        Ok(Self {
            status: blank_to_none(value.status)
                .map(ResourceStatus::try_from)
                .transpose()?,
            contact_details: value
                .contact_details
                .map(normalize_contact_details)
                .transpose()?,
        })
    }
}

/// Listing filter as received from query strings. Blank values mean "any".
///
/// `status` is a comma-separated list, e.g. `AVAILABLE,LIMITED`.
#[derive(Debug, Default, Deserialize)]
pub struct ResourceFilterForm {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Error)]
pub enum ResourceFilterFormError {
    #[error("Resource filter contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for ResourceFilterFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ResourceFilterForm> for ResourceFilter {
    type Error = ResourceFilterFormError;

    fn try_from(value: ResourceFilterForm) -> Result<Self, Self::Error> {
        let mut filter = ResourceFilter {
            category: blank_to_none(value.category)
                .map(ResourceCategory::try_from)
                .transpose()?,
            zipcode: blank_to_none(value.zipcode).map(Zipcode::new).transpose()?,
            query: blank_to_none(value.query),
            statuses: Vec::new(),
        };

        if let Some(statuses) = blank_to_none(value.status) {
            for status in statuses.split(',').filter(|s| !s.trim().is_empty()) {
                filter = filter.status(ResourceStatus::try_from(status)?);
            }
        }

        Ok(filter)
    }
}
