//! User account events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, Timestamp, UserId};

use super::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub event_id: EventId,
    pub user_id: UserId,
    pub registered_at: Timestamp,
}

domain_event!(
    UserRegistered,
    event_type = "user.registered.v1",
    schema_version = 1,
    aggregate_id = user_id,
    aggregate_type = "User",
    occurred_at = registered_at,
    event_id = event_id
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDeleted {
    pub event_id: EventId,
    pub user_id: UserId,
    /// True when an admin removed the account rather than its owner.
    pub by_admin: bool,
    pub deleted_at: Timestamp,
}

domain_event!(
    UserDeleted,
    event_type = "user.deleted.v1",
    schema_version = 1,
    aggregate_id = user_id,
    aggregate_type = "User",
    occurred_at = deleted_at,
    event_id = event_id
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRoleChanged {
    pub event_id: EventId,
    pub user_id: UserId,
    pub role: Role,
    pub changed_at: Timestamp,
}

domain_event!(
    UserRoleChanged,
    event_type = "user.role_changed.v1",
    schema_version = 1,
    aggregate_id = user_id,
    aggregate_type = "User",
    occurred_at = changed_at,
    event_id = event_id
);
