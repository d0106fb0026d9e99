use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::note::{NewNote, Note};
use crate::domain::resource::{NewResource, Resource, ResourceFilter, ResourceUpdate};
use crate::domain::saved_resource::SavedResource;
use crate::domain::types::{ResourceCategory, ResourceId, ResourceStatus, UserId, Zipcode};
use crate::pagination::Pagination;

pub mod errors;
pub mod note;
pub mod resource;
pub mod saved_resource;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing or searching resources.
///
/// Results are always ordered by `last_updated` descending, then `id`
/// descending, so consecutive pages never overlap.
#[derive(Debug, Clone, Default)]
pub struct ResourceListQuery {
    /// Filter by category.
    pub category: Option<ResourceCategory>,
    /// Filter by exact zipcode.
    pub zipcode: Option<Zipcode>,
    /// Case-insensitive substring search string.
    pub search: Option<String>,
    /// Restrict to any of these statuses.
    pub statuses: Vec<ResourceStatus>,
    /// Restrict to resources updated at or after this instant.
    pub updated_since: Option<NaiveDateTime>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ResourceListQuery {
    pub fn category(mut self, category: ResourceCategory) -> Self {
        self.category = Some(category);
        self
    }
    pub fn zipcode(mut self, zipcode: Zipcode) -> Self {
        self.zipcode = Some(zipcode);
        self
    }
    /// Blank search strings are ignored.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let trimmed = search.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }
    pub fn statuses(mut self, statuses: Vec<ResourceStatus>) -> Self {
        self.statuses = statuses;
        self
    }
    pub fn updated_since(mut self, since: NaiveDateTime) -> Self {
        self.updated_since = Some(since);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

impl From<&ResourceFilter> for ResourceListQuery {
    fn from(filter: &ResourceFilter) -> Self {
        let mut query = Self {
            category: filter.category,
            zipcode: filter.zipcode.clone(),
            statuses: filter.statuses.clone(),
            ..Self::default()
        };
        if let Some(search) = &filter.query {
            query = query.search(search.as_str());
        }
        query
    }
}

/// Read-only operations for resource entities.
pub trait ResourceReader {
    /// List resources matching the supplied query, returning the total
    /// number of matches alongside the requested page.
    fn list_resources(&self, query: ResourceListQuery)
    -> RepositoryResult<(usize, Vec<Resource>)>;
    /// Retrieve a resource by its identifier.
    fn get_resource_by_id(&self, id: ResourceId) -> RepositoryResult<Option<Resource>>;
    /// Resolve many identifiers in a single lookup. Unknown ids are skipped.
    fn get_resources_by_ids(&self, ids: &[ResourceId]) -> RepositoryResult<Vec<Resource>>;
}

/// Write operations for resource entities.
pub trait ResourceWriter {
    /// Persist a new resource and return the stored row.
    fn create_resource(&self, resource: &NewResource) -> RepositoryResult<Resource>;
    /// Apply a partial update. Returns `None` when the id does not exist.
    fn update_resource(
        &self,
        id: ResourceId,
        update: &ResourceUpdate,
    ) -> RepositoryResult<Option<Resource>>;
}

/// Read-only operations for resource notes.
pub trait NoteReader {
    /// Notes for a resource, newest first.
    fn list_notes(&self, resource_id: ResourceId) -> RepositoryResult<Vec<Note>>;
}

/// Append-only writes for resource notes.
pub trait NoteWriter {
    fn create_note(&self, note: &NewNote) -> RepositoryResult<Note>;
}

/// Read-only operations for the saved-resource association.
pub trait SavedResourceReader {
    /// Identifiers saved by the given viewer (`None` is the anonymous slot).
    fn list_saved_resource_ids(&self, user_id: Option<UserId>)
    -> RepositoryResult<Vec<ResourceId>>;
    fn is_resource_saved(
        &self,
        resource_id: ResourceId,
        user_id: Option<UserId>,
    ) -> RepositoryResult<bool>;
}

/// Write operations for the saved-resource association.
pub trait SavedResourceWriter {
    /// Insert the association. Fails with
    /// [`RepositoryError::UniqueViolation`] when it already exists.
    fn save_resource(&self, saved: &SavedResource) -> RepositoryResult<usize>;
    /// Delete the association, returning the number of rows removed.
    fn unsave_resource(&self, saved: &SavedResource) -> RepositoryResult<usize>;
}
