use chrono::Utc;

use crate::domain::note::{ANONYMOUS_USERNAME, NewNote, Note};
use crate::domain::types::{ResourceId, Username};
use crate::domain::viewer::Viewer;
use crate::forms::notes::{AddNoteForm, AddNoteFormPayload};
use crate::repository::{NoteWriter, ResourceReader};

use super::{ServiceError, ServiceResult};

/// Appends a note to a resource.
///
/// Notes are attributed to the anonymous placeholder author whoever the
/// viewer is, and adding one leaves the resource's `last_updated` alone.
pub fn add_note<R>(
    resource_id: i32,
    form: AddNoteForm,
    viewer: &Viewer,
    repo: &R,
) -> ServiceResult<Note>
where
    R: ResourceReader + NoteWriter,
{
    let resource_id = ResourceId::new(resource_id).map_err(|_| ServiceError::NotFound)?;
    let payload = AddNoteFormPayload::try_from(form)?;

    match repo.get_resource_by_id(resource_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get resource {resource_id}: {e}");
            return Err(ServiceError::QueryFailure(e.to_string()));
        }
    }

    let note = NewNote {
        resource_id,
        user_id: None,
        username: Username::new(ANONYMOUS_USERNAME)?,
        content: payload.content,
        created_at: Utc::now().naive_utc(),
    };

    match repo.create_note(&note) {
        Ok(note) => {
            log::debug!(
                "Note {} added to resource {resource_id} (viewer {:?})",
                note.id,
                viewer.user_id.map(|id| id.get())
            );
            Ok(note)
        }
        Err(e) => {
            log::error!("Failed to add note to resource {resource_id}: {e}");
            Err(ServiceError::QueryFailure(e.to_string()))
        }
    }
}
