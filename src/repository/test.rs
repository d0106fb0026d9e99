use std::sync::Mutex;

use crate::db::fold_case;
use crate::domain::note::{NewNote, Note};
use crate::domain::resource::{NewResource, Resource, ResourceUpdate};
use crate::domain::saved_resource::SavedResource;
use crate::domain::types::{NoteId, ResourceId, UserId};
use crate::repository::{
    NoteReader, NoteWriter, RepositoryError, RepositoryResult, ResourceListQuery, ResourceReader,
    ResourceWriter, SavedResourceReader, SavedResourceWriter,
};

#[derive(Default)]
struct State {
    resources: Vec<Resource>,
    notes: Vec<Note>,
    saved: Vec<SavedResource>,
}

/// Simple in-memory repository used for unit tests.
///
/// Mirrors the ordering and uniqueness rules of the SQLite schema. Setting
/// `fail` makes every call return a database error.
#[derive(Default)]
pub struct TestRepository {
    state: Mutex<State>,
    fail: bool,
}

impl TestRepository {
    pub fn new(resources: Vec<Resource>) -> Self {
        Self {
            state: Mutex::new(State {
                resources,
                ..State::default()
            }),
            fail: false,
        }
    }

    /// A repository whose every operation fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of stored associations for a resource, across all viewers.
    pub fn saved_count(&self, resource_id: ResourceId) -> usize {
        self.state
            .lock()
            .unwrap()
            .saved
            .iter()
            .filter(|s| s.resource_id == resource_id)
            .count()
    }

    fn check(&self) -> RepositoryResult<()> {
        if self.fail {
            Err(RepositoryError::ConnectionError("test repository offline".into()))
        } else {
            Ok(())
        }
    }

    fn sorted(mut items: Vec<Resource>) -> Vec<Resource> {
        items.sort_by(|a, b| {
            b.last_updated
                .cmp(&a.last_updated)
                .then_with(|| b.id.cmp(&a.id))
        });
        items
    }
}

impl ResourceReader for TestRepository {
    fn list_resources(
        &self,
        query: ResourceListQuery,
    ) -> RepositoryResult<(usize, Vec<Resource>)> {
        self.check()?;
        let needle = query.search.as_deref().map(fold_case);
        let state = self.state.lock().unwrap();
        let mut items: Vec<Resource> = state.resources.clone();
        drop(state);

        if let Some(category) = query.category {
            items.retain(|r| r.category == category);
        }
        if let Some(zipcode) = &query.zipcode {
            items.retain(|r| &r.zipcode == zipcode);
        }
        if !query.statuses.is_empty() {
            items.retain(|r| query.statuses.contains(&r.status));
        }
        if let Some(since) = query.updated_since {
            items.retain(|r| r.last_updated >= since);
        }
        if let Some(needle) = needle {
            items.retain(|r| {
                fold_case(&r.organization).contains(&needle)
                    || r.program
                        .as_ref()
                        .is_some_and(|p| fold_case(p).contains(&needle))
                    || fold_case(r.category.as_str()).contains(&needle)
            });
        }

        let total = items.len();
        let mut items = Self::sorted(items);
        if let Some(pagination) = query.pagination {
            items = match pagination.offset() {
                Some(offset) => items
                    .into_iter()
                    .skip(offset)
                    .take(pagination.limit())
                    .collect(),
                None => vec![],
            };
        }
        Ok((total, items))
    }

    fn get_resource_by_id(&self, id: ResourceId) -> RepositoryResult<Option<Resource>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.resources.iter().find(|r| r.id == id).cloned())
    }

    fn get_resources_by_ids(&self, ids: &[ResourceId]) -> RepositoryResult<Vec<Resource>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let items = state
            .resources
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect();
        Ok(Self::sorted(items))
    }
}

impl ResourceWriter for TestRepository {
    fn create_resource(&self, resource: &NewResource) -> RepositoryResult<Resource> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let next_id = state.resources.iter().map(|r| r.id.get()).max().unwrap_or(0) + 1;
        let created = Resource {
            id: ResourceId::new(next_id)?,
            organization: resource.organization.clone(),
            program: resource.program.clone(),
            category: resource.category,
            status: resource.status,
            contact_details: resource.contact_details.clone(),
            zipcode: resource.zipcode.clone(),
            created_at: resource.created_at,
            last_updated: resource.last_updated,
        };
        state.resources.push(created.clone());
        Ok(created)
    }

    fn update_resource(
        &self,
        id: ResourceId,
        update: &ResourceUpdate,
    ) -> RepositoryResult<Option<Resource>> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let Some(resource) = state.resources.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(status) = update.status {
            resource.status = status;
        }
        if let Some(contact_details) = &update.contact_details {
            resource.contact_details = contact_details.clone();
        }
        resource.last_updated = update.last_updated;
        Ok(Some(resource.clone()))
    }
}

impl NoteReader for TestRepository {
    fn list_notes(&self, resource_id: ResourceId) -> RepositoryResult<Vec<Note>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let mut notes: Vec<Note> = state
            .notes
            .iter()
            .filter(|n| n.resource_id == resource_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(notes)
    }
}

impl NoteWriter for TestRepository {
    fn create_note(&self, note: &NewNote) -> RepositoryResult<Note> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let created = Note {
            id: NoteId::new(state.notes.len() as i32 + 1)?,
            resource_id: note.resource_id,
            user_id: note.user_id,
            username: note.username.clone(),
            content: note.content.clone(),
            created_at: note.created_at,
        };
        state.notes.push(created.clone());
        Ok(created)
    }
}

impl SavedResourceReader for TestRepository {
    fn list_saved_resource_ids(
        &self,
        user_id: Option<UserId>,
    ) -> RepositoryResult<Vec<ResourceId>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .saved
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.resource_id)
            .collect())
    }

    fn is_resource_saved(
        &self,
        resource_id: ResourceId,
        user_id: Option<UserId>,
    ) -> RepositoryResult<bool> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .saved
            .iter()
            .any(|s| s.resource_id == resource_id && s.user_id == user_id))
    }
}

impl SavedResourceWriter for TestRepository {
    fn save_resource(&self, saved: &SavedResource) -> RepositoryResult<usize> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if state.saved.contains(saved) {
            return Err(RepositoryError::UniqueViolation(
                "saved_resources.resource_id, saved_resources.user_id".into(),
            ));
        }
        state.saved.push(*saved);
        Ok(1)
    }

    fn unsave_resource(&self, saved: &SavedResource) -> RepositoryResult<usize> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let before = state.saved.len();
        state.saved.retain(|s| s != saved);
        Ok(before - state.saved.len())
    }
}
