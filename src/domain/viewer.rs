use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, UserRole, Username};

/// The actor on whose behalf a service call runs.
///
/// Built by the caller from its session and passed explicitly to every
/// operation that depends on who is asking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub user_id: Option<UserId>,
    pub username: Option<Username>,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
}

impl Viewer {
    /// A viewer without a session.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            username: None,
            full_name: None,
            role: None,
        }
    }

    /// An authenticated user with the given role.
    pub fn user(user_id: UserId, username: Username, role: UserRole) -> Self {
        Self {
            user_id: Some(user_id),
            username: Some(username),
            full_name: None,
            role: Some(role),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Case managers and admins may contribute new listings.
    pub fn can_contribute(&self) -> bool {
        self.is_authenticated()
            && matches!(self.role, Some(UserRole::CaseManager | UserRole::Admin))
    }
}
