//! Clock port.
//!
//! Refund eligibility and monthly snapshots depend on "now"; handlers read
//! it through this port so tests can pin it.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
