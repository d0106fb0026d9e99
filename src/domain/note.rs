use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{NoteContent, NoteId, ResourceId, UserId, Username};

/// Display name used for notes that carry no author.
pub const ANONYMOUS_USERNAME: &str = "Anonymous";

/// A free-text note attached to a resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub resource_id: ResourceId,
    pub user_id: Option<UserId>,
    pub username: Username,
    pub content: NoteContent,
    #[serde(rename = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// Data required to append a [`Note`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewNote {
    pub resource_id: ResourceId,
    pub user_id: Option<UserId>,
    pub username: Username,
    pub content: NoteContent,
    pub created_at: NaiveDateTime,
}
