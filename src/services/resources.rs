use chrono::{NaiveDateTime, Utc};

use crate::domain::resource::{Resource, ResourceDetails, ResourceFilter, ResourcePage};
use crate::domain::types::ResourceId;
use crate::domain::viewer::Viewer;
use crate::forms::resources::{
    CreateResourceForm, CreateResourceFormPayload, UpdateResourceForm, UpdateResourceFormPayload,
};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{
    NoteReader, ResourceListQuery, ResourceReader, ResourceWriter, SavedResourceReader,
};

use super::{ServiceError, ServiceResult};

/// Run a listing query and wrap the result in a [`ResourcePage`].
fn load_page<R>(query: ResourceListQuery, page: usize, repo: &R) -> ServiceResult<ResourcePage>
where
    R: ResourceReader,
{
    let page = page.max(1);
    let query = query.paginate(page, DEFAULT_ITEMS_PER_PAGE);

    match repo.list_resources(query) {
        Ok((total, resources)) => Ok(ResourcePage::new(
            resources,
            page,
            total,
            DEFAULT_ITEMS_PER_PAGE,
        )),
        Err(e) => {
            log::error!("Failed to list resources: {e}");
            Err(ServiceError::QueryFailure(e.to_string()))
        }
    }
}

/// Lists resources matching `filter`, newest update first, 15 per page.
///
/// Page 0 is treated as page 1. A filter that matches nothing yields an
/// empty page with `total_pages == 1`.
pub fn list_resources<R>(
    filter: &ResourceFilter,
    page: usize,
    repo: &R,
) -> ServiceResult<ResourcePage>
where
    R: ResourceReader,
{
    load_page(ResourceListQuery::from(filter), page, repo)
}

/// Same as [`list_resources`] with the free-text criterion taken from `query`.
///
/// A blank `query` behaves as a plain listing.
pub fn search_resources<R>(
    query: &str,
    filter: &ResourceFilter,
    page: usize,
    repo: &R,
) -> ServiceResult<ResourcePage>
where
    R: ResourceReader,
{
    let list_query = ResourceListQuery::from(filter).search(query);
    load_page(list_query, page, repo)
}

/// Resources whose `last_updated` is at or after `since`.
pub fn list_recently_updated<R>(
    since: NaiveDateTime,
    page: usize,
    repo: &R,
) -> ServiceResult<ResourcePage>
where
    R: ResourceReader,
{
    load_page(ResourceListQuery::default().updated_since(since), page, repo)
}

/// Fetches a single resource with its notes (newest first) and whether the
/// viewer has saved it.
pub fn get_resource_by_id<R>(
    resource_id: i32,
    viewer: &Viewer,
    repo: &R,
) -> ServiceResult<ResourceDetails>
where
    R: ResourceReader + NoteReader + SavedResourceReader,
{
    let resource_id = ResourceId::new(resource_id).map_err(|_| ServiceError::NotFound)?;

    let resource = match repo.get_resource_by_id(resource_id) {
        Ok(Some(resource)) => resource,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get resource {resource_id}: {e}");
            return Err(ServiceError::QueryFailure(e.to_string()));
        }
    };

    let notes = repo.list_notes(resource_id).map_err(|e| {
        log::error!("Failed to list notes for resource {resource_id}: {e}");
        ServiceError::QueryFailure(e.to_string())
    })?;

    let saved = repo
        .is_resource_saved(resource_id, viewer.user_id)
        .map_err(|e| {
            log::error!("Failed to read saved state for resource {resource_id}: {e}");
            ServiceError::QueryFailure(e.to_string())
        })?;

    Ok(ResourceDetails {
        resource,
        notes,
        saved,
    })
}

/// Validates and stores a new resource.
///
/// Only case managers and admins may contribute. Validation happens before
/// the store is touched; `status` defaults to `AVAILABLE`.
pub fn create_resource<R>(
    form: CreateResourceForm,
    viewer: &Viewer,
    repo: &R,
) -> ServiceResult<Resource>
where
    R: ResourceWriter,
{
    if !viewer.can_contribute() {
        return Err(ServiceError::Unauthorized);
    }

    let payload = CreateResourceFormPayload::try_from(form)?;
    let new_resource = payload.into_new_resource(Utc::now().naive_utc());

    match repo.create_resource(&new_resource) {
        Ok(resource) => {
            log::info!(
                "Resource {} created by user {:?}",
                resource.id,
                viewer.user_id.map(|id| id.get())
            );
            Ok(resource)
        }
        Err(e) => {
            log::error!("Failed to create resource: {e}");
            Err(ServiceError::QueryFailure(e.to_string()))
        }
    }
}

/// Applies a partial status/contact update and refreshes `last_updated`,
/// even when neither field is supplied.
pub fn update_resource_details<R>(
    resource_id: i32,
    form: UpdateResourceForm,
    repo: &R,
) -> ServiceResult<Resource>
where
    R: ResourceWriter,
{
    let resource_id = ResourceId::new(resource_id).map_err(|_| ServiceError::NotFound)?;
    let payload = UpdateResourceFormPayload::try_from(form)?;
    let update = payload.into_update(Utc::now().naive_utc());

    match repo.update_resource(resource_id, &update) {
        Ok(Some(resource)) => {
            log::debug!("Resource {resource_id} updated");
            Ok(resource)
        }
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update resource {resource_id}: {e}");
            Err(ServiceError::from(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::ContactDetails;
    use crate::domain::types::{
        OrganizationName, ProgramName, ResourceCategory, ResourceStatus, UserId, UserRole,
        Username, Zipcode,
    };
    use crate::repository::test::TestRepository;
    use chrono::DateTime;
    use std::collections::HashSet;

    fn case_manager() -> Viewer {
        Viewer::user(
            UserId::new(1).unwrap(),
            Username::new("casey").unwrap(),
            UserRole::CaseManager,
        )
    }

    fn sample_resource(id: i32, category: ResourceCategory, zipcode: &str) -> Resource {
        let ts = DateTime::from_timestamp(1_700_000_000 + i64::from(id) * 60, 0)
            .unwrap()
            .naive_utc();
        Resource {
            id: ResourceId::new(id).unwrap(),
            organization: OrganizationName::new(format!("Org {id}")).unwrap(),
            program: Some(ProgramName::new(format!("Program {id}")).unwrap()),
            category,
            status: ResourceStatus::Available,
            contact_details: ContactDetails {
                phone: Some("555-0100".into()),
                ..ContactDetails::default()
            },
            zipcode: Zipcode::new(zipcode).unwrap(),
            created_at: ts,
            last_updated: ts,
        }
    }

    fn create_form(zipcode: &str) -> CreateResourceForm {
        CreateResourceForm {
            organization: "Mission Food Bank".into(),
            program: None,
            category: "Food".into(),
            status: None,
            contact_details: ContactDetails::default(),
            zipcode: zipcode.into(),
        }
    }

    #[test]
    fn pages_are_disjoint_and_cover_the_result_set() {
        let resources = (1..=40)
            .map(|id| sample_resource(id, ResourceCategory::Housing, "94103"))
            .collect();
        let repo = TestRepository::new(resources);
        let filter = ResourceFilter::default();

        let first = list_resources(&filter, 1, &repo).unwrap();
        assert_eq!(first.total_resources, 40);
        assert_eq!(first.total_pages, 3);

        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            let result = list_resources(&filter, page, &repo).unwrap();
            assert_eq!(result.current_page, page);
            seen.extend(result.resources.into_iter().map(|r| r.id.get()));
        }

        let expected: Vec<i32> = (1..=40).rev().collect();
        assert_eq!(seen, expected);
        assert_eq!(seen.iter().collect::<HashSet<_>>().len(), 40);
    }

    #[test]
    fn empty_listing_reports_one_page() {
        let repo = TestRepository::default();
        let page = list_resources(&ResourceFilter::default(), 1, &repo).unwrap();
        assert!(page.resources.is_empty());
        assert_eq!(page.total_resources, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn unmatched_filter_is_not_an_error() {
        let repo = TestRepository::new(vec![sample_resource(1, ResourceCategory::Food, "94103")]);
        let filter = ResourceFilter::default().category(ResourceCategory::Legal);
        let page = list_resources(&filter, 1, &repo).unwrap();
        assert_eq!(page.total_resources, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let repo = TestRepository::new(vec![sample_resource(1, ResourceCategory::Food, "94103")]);
        let page = list_resources(&ResourceFilter::default(), 5, &repo).unwrap();
        assert!(page.resources.is_empty());
        assert_eq!(page.total_resources, 1);
        assert_eq!(page.current_page, 5);
    }

    #[test]
    fn huge_page_numbers_are_empty() {
        let repo = TestRepository::new(vec![sample_resource(1, ResourceCategory::Food, "94103")]);
        for page in [usize::MAX, 1_000_000_000_000_000_000] {
            let result = list_resources(&ResourceFilter::default(), page, &repo).unwrap();
            assert!(result.resources.is_empty());
            assert_eq!(result.current_page, page);
            assert_eq!(result.total_resources, 1);
        }
    }

    #[test]
    fn page_zero_is_clamped() {
        let repo = TestRepository::new(vec![sample_resource(1, ResourceCategory::Food, "94103")]);
        let page = list_resources(&ResourceFilter::default(), 0, &repo).unwrap();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.resources.len(), 1);
    }

    #[test]
    fn filters_by_category_and_zipcode() {
        let repo = TestRepository::new(vec![
            sample_resource(1, ResourceCategory::Food, "94103"),
            sample_resource(2, ResourceCategory::Food, "94110"),
            sample_resource(3, ResourceCategory::Housing, "94103"),
        ]);
        let filter = ResourceFilter::default()
            .category(ResourceCategory::Food)
            .zipcode(Zipcode::new("94103").unwrap());

        let page = list_resources(&filter, 1, &repo).unwrap();
        assert_eq!(page.total_resources, 1);
        assert_eq!(page.resources[0].id, 1);
    }

    #[test]
    fn search_matches_organization_case_insensitively() {
        let repo = TestRepository::new(vec![
            sample_resource(1, ResourceCategory::Food, "94103"),
            sample_resource(2, ResourceCategory::Housing, "94103"),
        ]);

        let page = search_resources("oRG 2", &ResourceFilter::default(), 1, &repo).unwrap();
        assert_eq!(page.total_resources, 1);
        assert_eq!(page.resources[0].id, 2);

        let by_category = search_resources("hous", &ResourceFilter::default(), 1, &repo).unwrap();
        assert_eq!(by_category.total_resources, 1);
        assert_eq!(by_category.resources[0].id, 2);
    }

    #[test]
    fn blank_search_lists_everything() {
        let repo = TestRepository::new(vec![
            sample_resource(1, ResourceCategory::Food, "94103"),
            sample_resource(2, ResourceCategory::Housing, "94103"),
        ]);
        let page = search_resources("   ", &ResourceFilter::default(), 1, &repo).unwrap();
        assert_eq!(page.total_resources, 2);
    }

    #[test]
    fn recently_updated_respects_cutoff() {
        let repo = TestRepository::new(
            (1..=5)
                .map(|id| sample_resource(id, ResourceCategory::Food, "94103"))
                .collect(),
        );
        let since = DateTime::from_timestamp(1_700_000_000 + 3 * 60, 0)
            .unwrap()
            .naive_utc();

        let page = list_recently_updated(since, 1, &repo).unwrap();
        let ids: Vec<i32> = page.resources.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![5, 4, 3]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn backend_failure_is_a_query_failure() {
        let repo = TestRepository::failing();
        let result = list_resources(&ResourceFilter::default(), 1, &repo);
        assert!(matches!(result, Err(ServiceError::QueryFailure(_))));
    }

    #[test]
    fn create_resource_rejects_bad_zipcode() {
        let repo = TestRepository::default();
        let result = create_resource(create_form("abcde"), &case_manager(), &repo);
        assert!(matches!(result, Err(ServiceError::ValidationFailure(_))));
    }

    #[test]
    fn create_resource_accepts_valid_input() {
        let repo = TestRepository::default();
        let resource = create_resource(create_form("94103"), &case_manager(), &repo).unwrap();
        assert_eq!(resource.zipcode.as_str(), "94103");
        assert_eq!(resource.status, ResourceStatus::Available);
        assert_eq!(resource.created_at, resource.last_updated);
    }

    #[test]
    fn anonymous_viewer_cannot_create() {
        let repo = TestRepository::default();
        let result = create_resource(create_form("94103"), &Viewer::anonymous(), &repo);
        assert_eq!(result.unwrap_err(), ServiceError::Unauthorized);
    }

    #[test]
    fn created_resource_is_listed_under_its_filter() {
        let repo = TestRepository::default();
        let created = create_resource(create_form("94103"), &case_manager(), &repo).unwrap();

        let filter = ResourceFilter::default()
            .category(ResourceCategory::Food)
            .zipcode(Zipcode::new("94103").unwrap());
        let page = list_resources(&filter, 1, &repo).unwrap();

        assert!(page.total_resources >= 1);
        assert!(page.resources.iter().any(|r| r.id == created.id));
    }

    #[test]
    fn status_update_leaves_contact_details_untouched() {
        let original = sample_resource(1, ResourceCategory::Food, "94103");
        let repo = TestRepository::new(vec![original.clone()]);

        let form = UpdateResourceForm {
            status: Some("LIMITED".into()),
            ..UpdateResourceForm::default()
        };
        let updated = update_resource_details(1, form, &repo).unwrap();

        assert_eq!(updated.status, ResourceStatus::Limited);
        assert_eq!(updated.contact_details, original.contact_details);
        assert_eq!(updated.organization, original.organization);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.last_updated > original.last_updated);
    }

    #[test]
    fn empty_update_still_refreshes_last_updated() {
        let original = sample_resource(1, ResourceCategory::Food, "94103");
        let repo = TestRepository::new(vec![original.clone()]);

        let updated = update_resource_details(1, UpdateResourceForm::default(), &repo).unwrap();
        assert_eq!(updated.status, original.status);
        assert!(updated.last_updated > original.last_updated);
    }

    #[test]
    fn updating_unknown_resource_is_not_found() {
        let repo = TestRepository::default();
        let form = UpdateResourceForm {
            status: Some("LIMITED".into()),
            ..UpdateResourceForm::default()
        };
        assert_eq!(
            update_resource_details(99, form, &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn get_resource_by_unknown_id_is_not_found() {
        let repo = TestRepository::default();
        assert_eq!(
            get_resource_by_id(42, &Viewer::anonymous(), &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(
            get_resource_by_id(-1, &Viewer::anonymous(), &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }
}
