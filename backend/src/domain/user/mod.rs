//! User domain module.
//!
//! Accounts, roles and the subscription sub-record each user carries.

mod aggregate;
mod email;
mod events;
mod role;

pub use aggregate::{validate_password, User, MIN_PASSWORD_LEN};
pub use email::Email;
pub use events::{UserDeleted, UserRegistered, UserRoleChanged};
pub use role::Role;
