use serde::{Deserialize, Serialize};

use crate::domain::types::{ResourceId, UserId};

/// Association between a viewer and a bookmarked resource.
///
/// Anonymous viewers share the `user_id = None` slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SavedResource {
    pub resource_id: ResourceId,
    pub user_id: Option<UserId>,
}
