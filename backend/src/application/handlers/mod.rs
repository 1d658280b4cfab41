//! Application handlers.
//!
//! One Command/Query, Result and Handler per operation, grouped by area.

pub mod account;
mod publish;
pub mod stats;
pub mod subscription;

pub use account::{
    AccountError, ChangePasswordCommand, ChangePasswordHandler, DeleteAccountCommand,
    DeleteAccountHandler, DeleteAccountResult, GetProfileHandler, GetProfileQuery,
    ListUsersHandler, LoginCommand, LoginHandler, LoginResult, RegisterCommand, RegisterHandler,
    RegisterResult, ToggleRoleCommand, ToggleRoleHandler, UpdateProfileCommand,
    UpdateProfileHandler,
};
pub use stats::{GetDashboardStatsHandler, MonthlySnapshotTask, StatsUpdater, STATS_EVENT_TYPES};
pub use subscription::{
    BillingSettings, CancelSubscriptionCommand, CancelSubscriptionHandler,
    CancelSubscriptionResult, CreateSubscriptionCommand, CreateSubscriptionHandler,
    CreateSubscriptionResult, GetGatewayKeyHandler, GetGatewayKeyResult, RefundOutcome,
    VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult,
};
