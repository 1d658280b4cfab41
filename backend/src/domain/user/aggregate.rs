//! User aggregate.
//!
//! A user owns at most one subscription record. Only the subscription
//! handlers mutate it, through the methods below, which enforce the
//! status state machine and the rule that admins never subscribe.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, ValidationError};
use crate::domain::subscription::{SubscriptionError, SubscriptionRecord};

use super::{Email, Role};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Checks a plaintext password against the registration policy.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::empty_field("password"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::too_short("password", MIN_PASSWORD_LEN));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// PHC-format hash. Never the plaintext.
    pub password_hash: String,
    pub role: Role,
    pub subscription: SubscriptionRecord,
    pub created_at: Timestamp,
}

impl User {
    /// Creates a new account with the `user` role and no subscription.
    pub fn register(
        name: &str,
        email: Email,
        password_hash: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            id: UserId::new(),
            name: name.to_string(),
            email,
            password_hash: password_hash.into(),
            role: Role::User,
            subscription: SubscriptionRecord::default(),
            created_at: now,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Subscriber-only resources are open to active subscribers and admins.
    pub fn can_access_subscriber_content(&self) -> bool {
        self.subscription.is_active() || self.is_admin()
    }

    /// Attaches a new gateway subscription in `created` status.
    pub fn start_subscription(
        &mut self,
        gateway_subscription_id: impl Into<String>,
    ) -> Result<(), SubscriptionError> {
        self.ensure_not_admin()?;
        self.subscription.begin(gateway_subscription_id)
    }

    /// Marks the subscription paid after signature verification.
    pub fn activate_subscription(&mut self) -> Result<(), SubscriptionError> {
        self.ensure_not_admin()?;
        self.subscription.activate()
    }

    /// Cancels the active subscription and clears the record.
    ///
    /// Returns the gateway subscription id that was removed.
    pub fn end_subscription(&mut self) -> Result<String, SubscriptionError> {
        let id = self.subscription.cancel()?;
        self.subscription.clear()?;
        Ok(id)
    }

    /// Drops an unpaid checkout so the user can subscribe again.
    ///
    /// Returns the gateway subscription id that was removed.
    pub fn abandon_subscription(&mut self) -> Result<String, SubscriptionError> {
        self.subscription.abandon()
    }

    /// Flips between `user` and `admin`.
    ///
    /// A user holding a subscription cannot be promoted.
    pub fn toggle_role(&mut self) -> Result<Role, DomainError> {
        if !self.is_admin() && !self.subscription.is_empty() {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Cancel the user's subscription before promoting to admin",
            ));
        }
        self.role = self.role.toggled();
        Ok(self.role)
    }

    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
    }

    /// Applies whichever of `name` and `email` is given. Blank names are rejected.
    pub fn update_profile(
        &mut self,
        name: Option<&str>,
        email: Option<Email>,
    ) -> Result<(), ValidationError> {
        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ValidationError::empty_field("name"));
            }
            self.name = name.to_string();
        }
        if let Some(email) = email {
            self.email = email;
        }
        Ok(())
    }

    fn ensure_not_admin(&self) -> Result<(), SubscriptionError> {
        if self.is_admin() {
            return Err(SubscriptionError::ForbiddenRole);
        }
        Ok(())
    }
}
