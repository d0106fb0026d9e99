use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::note::{NewNote as DomainNewNote, Note as DomainNote};
use crate::domain::types::{NoteContent, TypeConstraintError, UserId, Username};

/// Diesel model representing the `resource_notes` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::resource_notes)]
pub struct Note {
    pub id: i32,
    pub resource_id: i32,
    pub user_id: Option<i32>,
    pub username: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Note`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::resource_notes)]
pub struct NewNote<'a> {
    pub resource_id: i32,
    pub user_id: Option<i32>,
    pub username: &'a str,
    pub content: &'a str,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Note> for DomainNote {
    type Error = TypeConstraintError;

    fn try_from(note: Note) -> Result<Self, Self::Error> {
        Ok(Self {
            id: note.id.try_into()?,
            resource_id: note.resource_id.try_into()?,
            user_id: note.user_id.map(UserId::new).transpose()?,
            username: Username::new(note.username)?,
            content: NoteContent::new(note.content)?,
            created_at: note.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewNote> for NewNote<'a> {
    fn from(note: &'a DomainNewNote) -> Self {
        Self {
            resource_id: note.resource_id.get(),
            user_id: note.user_id.map(|id| id.get()),
            username: note.username.as_str(),
            content: note.content.as_str(),
            created_at: note.created_at,
        }
    }
}
