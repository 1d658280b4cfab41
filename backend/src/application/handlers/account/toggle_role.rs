//! ToggleRoleHandler - flips a user between `user` and `admin`.

use std::sync::Arc;

use crate::domain::foundation::{EventId, UserId};
use crate::domain::user::{User, UserRoleChanged};
use crate::ports::{Clock, EventPublisher, UserRepository};

use super::AccountError;
use crate::application::handlers::publish::publish_or_warn;

#[derive(Debug, Clone)]
pub struct ToggleRoleCommand {
    pub user_id: UserId,
}

pub struct ToggleRoleHandler {
    users: Arc<dyn UserRepository>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl ToggleRoleHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            events,
            clock,
        }
    }

    pub async fn handle(&self, cmd: ToggleRoleCommand) -> Result<User, AccountError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(AccountError::user_not_found)?;

        let role = user.toggle_role()?;
        self.users.save(&user).await?;

        tracing::info!(user_id = %user.id, role = %role, "user role changed");

        let event = UserRoleChanged {
            event_id: EventId::new(),
            user_id: user.id,
            role,
            changed_at: self.clock.now(),
        };
        publish_or_warn(self.events.as_ref(), &event, &user.id).await;

        Ok(user)
    }
}
