//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `user` - Accounts and roles
//! - `subscription` - Subscription lifecycle, payments, refund policy
//! - `stats` - Monthly snapshots and the admin dashboard

pub mod foundation;
pub mod stats;
pub mod subscription;
pub mod user;
