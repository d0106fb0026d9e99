use diesel::prelude::*;

use crate::domain::note::{NewNote, Note};
use crate::domain::types::ResourceId;
use crate::models::note::{NewNote as DbNewNote, Note as DbNote};
use crate::repository::{DieselRepository, NoteReader, NoteWriter, RepositoryResult};

impl NoteReader for DieselRepository {
    fn list_notes(&self, resource_id: ResourceId) -> RepositoryResult<Vec<Note>> {
        use crate::schema::resource_notes;

        let mut conn = self.conn()?;

        let notes = resource_notes::table
            .filter(resource_notes::resource_id.eq(resource_id.get()))
            .order((resource_notes::created_at.desc(), resource_notes::id.desc()))
            .load::<DbNote>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Note>, _>>()?;

        Ok(notes)
    }
}

impl NoteWriter for DieselRepository {
    fn create_note(&self, note: &NewNote) -> RepositoryResult<Note> {
        use crate::schema::resource_notes;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(resource_notes::table)
            .values(DbNewNote::from(note))
            .get_result::<DbNote>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
