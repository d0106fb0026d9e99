use diesel::prelude::*;

use crate::domain::saved_resource::SavedResource as DomainSavedResource;

/// Insertable form of a `saved_resources` association.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::saved_resources)]
pub struct NewSavedResource {
    pub resource_id: i32,
    pub user_id: Option<i32>,
}

impl From<&DomainSavedResource> for NewSavedResource {
    fn from(saved: &DomainSavedResource) -> Self {
        Self {
            resource_id: saved.resource_id.get(),
            user_id: saved.user_id.map(|id| id.get()),
        }
    }
}
