use std::collections::HashMap;

use crate::model::user::UserSummaryDto;

pub const UNKNOWN_USER_NAME: &str = "Unknown";
pub const UNKNOWN_USER_EMAIL: &str = "unknown@email.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl UserSummary {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
        }
    }

    /// Stand-in for a weak reference whose user no longer exists.
    pub fn placeholder(id: i32) -> Self {
        Self {
            id,
            name: UNKNOWN_USER_NAME.to_string(),
            email: UNKNOWN_USER_EMAIL.to_string(),
        }
    }

    pub fn into_dto(self) -> UserSummaryDto {
        UserSummaryDto {
            id: self.id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Users loaded for one response, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<i32, UserSummary>,
}

impl UserDirectory {
    pub fn new(users: Vec<UserSummary>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    /// Looks up a user, falling back to the placeholder for stale ids.
    pub fn resolve(&self, id: i32) -> UserSummary {
        self.users
            .get(&id)
            .cloned()
            .unwrap_or_else(|| UserSummary::placeholder(id))
    }
}
