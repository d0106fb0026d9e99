use crate::domain::resource::Resource;
use crate::domain::saved_resource::SavedResource;
use crate::domain::types::ResourceId;
use crate::domain::viewer::Viewer;
use crate::repository::{
    RepositoryError, ResourceReader, SavedResourceReader, SavedResourceWriter,
};

use super::{ServiceError, ServiceResult};

fn existing_resource<R>(resource_id: i32, repo: &R) -> ServiceResult<ResourceId>
where
    R: ResourceReader,
{
    let resource_id = ResourceId::new(resource_id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_resource_by_id(resource_id) {
        Ok(Some(_)) => Ok(resource_id),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get resource {resource_id}: {e}");
            Err(ServiceError::QueryFailure(e.to_string()))
        }
    }
}

/// Marks a resource as saved for the viewer.
///
/// Saving an already saved resource succeeds without adding a second
/// association; the store's unique index decides concurrent races.
pub fn save_resource<R>(resource_id: i32, viewer: &Viewer, repo: &R) -> ServiceResult<()>
where
    R: ResourceReader + SavedResourceWriter,
{
    let resource_id = existing_resource(resource_id, repo)?;
    let saved = SavedResource {
        resource_id,
        user_id: viewer.user_id,
    };

    match repo.save_resource(&saved) {
        Ok(_) => Ok(()),
        Err(RepositoryError::UniqueViolation(_)) => {
            log::debug!("Resource {resource_id} already saved");
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to save resource {resource_id}: {e}");
            Err(ServiceError::QueryFailure(e.to_string()))
        }
    }
}

/// Removes the viewer's saved mark. Removing a mark that does not exist
/// succeeds.
pub fn unsave_resource<R>(resource_id: i32, viewer: &Viewer, repo: &R) -> ServiceResult<()>
where
    R: SavedResourceWriter,
{
    // Unknown or malformed ids have nothing to delete.
    let Ok(resource_id) = ResourceId::new(resource_id) else {
        return Ok(());
    };
    let saved = SavedResource {
        resource_id,
        user_id: viewer.user_id,
    };

    match repo.unsave_resource(&saved) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to unsave resource {resource_id}: {e}");
            Err(ServiceError::QueryFailure(e.to_string()))
        }
    }
}

/// Resolves the viewer's saved set into full resources with a single
/// batched lookup.
pub fn list_saved<R>(viewer: &Viewer, repo: &R) -> ServiceResult<Vec<Resource>>
where
    R: ResourceReader + SavedResourceReader,
{
    let ids = repo.list_saved_resource_ids(viewer.user_id).map_err(|e| {
        log::error!("Failed to list saved resource ids: {e}");
        ServiceError::QueryFailure(e.to_string())
    })?;

    if ids.is_empty() {
        return Ok(vec![]);
    }

    repo.get_resources_by_ids(&ids).map_err(|e| {
        log::error!("Failed to resolve saved resources: {e}");
        ServiceError::QueryFailure(e.to_string())
    })
}

/// Whether the viewer has saved the resource. Unknown ids are unsaved.
pub fn is_saved<R>(resource_id: i32, viewer: &Viewer, repo: &R) -> ServiceResult<bool>
where
    R: SavedResourceReader,
{
    let Ok(resource_id) = ResourceId::new(resource_id) else {
        return Ok(false);
    };

    repo.is_resource_saved(resource_id, viewer.user_id)
        .map_err(|e| {
            log::error!("Failed to read saved state for resource {resource_id}: {e}");
            ServiceError::QueryFailure(e.to_string())
        })
}
