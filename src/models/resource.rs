use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::resource::{
    ContactDetails, NewResource as DomainNewResource, Resource as DomainResource,
    ResourceUpdate as DomainResourceUpdate,
};
use crate::domain::types::{
    OrganizationName, ProgramName, ResourceCategory, ResourceStatus, TypeConstraintError, Zipcode,
};

/// Diesel model representing the `resources` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::resources)]
pub struct Resource {
    pub id: i32,
    pub organization: String,
    pub program: Option<String>,
    pub category: String,
    pub status: String,
    pub contact_details: String,
    pub zipcode: String,
    pub created_at: NaiveDateTime,
    pub last_updated: NaiveDateTime,
}

/// Insertable form of [`Resource`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::resources)]
pub struct NewResource {
    pub organization: String,
    pub program: Option<String>,
    pub category: String,
    pub status: String,
    pub contact_details: String,
    pub zipcode: String,
    pub created_at: NaiveDateTime,
    pub last_updated: NaiveDateTime,
}

/// Partial update applied to a `resources` row; `None` columns are skipped.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::resources)]
pub struct ResourceChangeset {
    pub status: Option<String>,
    pub contact_details: Option<String>,
    pub last_updated: NaiveDateTime,
}

fn encode_contact_details(details: &ContactDetails) -> Result<String, TypeConstraintError> {
    serde_json::to_string(details)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("contact details: {e}")))
}

fn decode_contact_details(raw: &str) -> Result<ContactDetails, TypeConstraintError> {
    if raw.trim().is_empty() {
        return Ok(ContactDetails::default());
    }
    serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("contact details: {e}")))
}

impl TryFrom<Resource> for DomainResource {
    type Error = TypeConstraintError;

    fn try_from(resource: Resource) -> Result<Self, Self::Error> {
        Ok(Self {
            id: resource.id.try_into()?,
            organization: OrganizationName::new(resource.organization)?,
            // Blank programs are stored by older rows; treat them as absent.
            program: resource
                .program
                .filter(|program| !program.trim().is_empty())
                .map(ProgramName::new)
                .transpose()?,
            category: ResourceCategory::try_from(resource.category)?,
            status: ResourceStatus::try_from(resource.status)?,
            contact_details: decode_contact_details(&resource.contact_details)?,
            zipcode: Zipcode::new(resource.zipcode)?,
            created_at: resource.created_at,
            last_updated: resource.last_updated,
        })
    }
}

impl TryFrom<&DomainNewResource> for NewResource {
    type Error = TypeConstraintError;

    fn try_from(resource: &DomainNewResource) -> Result<Self, Self::Error> {
        Ok(Self {
            organization: resource.organization.as_str().to_string(),
            program: resource.program.as_ref().map(|p| p.as_str().to_string()),
            category: resource.category.as_str().to_string(),
            status: resource.status.as_str().to_string(),
            contact_details: encode_contact_details(&resource.contact_details)?,
            zipcode: resource.zipcode.as_str().to_string(),
            created_at: resource.created_at,
            last_updated: resource.last_updated,
        })
    }
}

impl TryFrom<&DomainResourceUpdate> for ResourceChangeset {
    type Error = TypeConstraintError;

    fn try_from(update: &DomainResourceUpdate) -> Result<Self, Self::Error> {
        Ok(Self {
            status: update.status.map(|s| s.as_str().to_string()),
            contact_details: update
                .contact_details
                .as_ref()
                .map(encode_contact_details)
                .transpose()?,
            last_updated: update.last_updated,
        })
    }
}
