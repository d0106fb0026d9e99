use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::note::Note;
use crate::domain::types::{
    OrganizationName, ProgramName, ResourceCategory, ResourceId, ResourceStatus, Zipcode,
};
use crate::pagination::total_pages;

/// Opening hours for a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HoursEntry {
    pub day: String,
    pub hours: String,
}

/// Structured contact document stored alongside a resource.
///
/// Every field is optional; an empty document serializes to `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Vec<HoursEntry>>,
}

/// A social-service listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub organization: OrganizationName,
    pub program: Option<ProgramName>,
    pub category: ResourceCategory,
    pub status: ResourceStatus,
    pub contact_details: ContactDetails,
    pub zipcode: Zipcode,
    pub created_at: NaiveDateTime,
    pub last_updated: NaiveDateTime,
}

/// Information required to create a new [`Resource`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewResource {
    pub organization: OrganizationName,
    pub program: Option<ProgramName>,
    pub category: ResourceCategory,
    pub status: ResourceStatus,
    pub contact_details: ContactDetails,
    pub zipcode: Zipcode,
    pub created_at: NaiveDateTime,
    pub last_updated: NaiveDateTime,
}

/// Partial update of a resource. `None` fields keep their stored value,
/// `last_updated` is always written.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUpdate {
    pub status: Option<ResourceStatus>,
    pub contact_details: Option<ContactDetails>,
    pub last_updated: NaiveDateTime,
}

/// A resource together with its notes and the viewer's saved flag.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDetails {
    #[serde(flatten)]
    pub resource: Resource,
    /// Newest first.
    pub notes: Vec<Note>,
    pub saved: bool,
}

/// Criteria applied to a resource listing. Absent criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    /// Exact category match.
    pub category: Option<ResourceCategory>,
    /// Exact zipcode match.
    pub zipcode: Option<Zipcode>,
    /// Case-insensitive substring over organization, program and category.
    pub query: Option<String>,
    /// Any of these statuses; empty means all.
    pub statuses: Vec<ResourceStatus>,
}

impl ResourceFilter {
    pub fn category(mut self, category: ResourceCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn zipcode(mut self, zipcode: Zipcode) -> Self {
        self.zipcode = Some(zipcode);
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn status(mut self, status: ResourceStatus) -> Self {
        if !self.statuses.contains(&status) {
            self.statuses.push(status);
        }
        self
    }
}

/// One page of a resource listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePage {
    pub resources: Vec<Resource>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_resources: usize,
}

impl ResourcePage {
    pub fn new(resources: Vec<Resource>, page: usize, total: usize, per_page: usize) -> Self {
        Self {
            resources,
            current_page: page.max(1),
            total_pages: total_pages(total, per_page),
            total_resources: total,
        }
    }
}
