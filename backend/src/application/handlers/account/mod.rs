//! Account handlers.
//!
//! ## Commands
//! - Register, log in
//! - Change password, update name/email
//! - Delete own account / admin delete
//! - Admin role toggle
//!
//! ## Queries
//! - Own profile
//! - Admin user listing

mod change_password;
mod delete_account;
mod errors;
mod get_profile;
mod list_users;
mod login;
mod register;
mod toggle_role;
mod update_profile;

#[cfg(test)]
mod test_fixture;

pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use delete_account::{DeleteAccountCommand, DeleteAccountHandler, DeleteAccountResult};
pub use errors::AccountError;
pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use list_users::ListUsersHandler;
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use register::{RegisterCommand, RegisterHandler, RegisterResult};
pub use toggle_role::{ToggleRoleCommand, ToggleRoleHandler};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
