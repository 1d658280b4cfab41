//! Payment repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PaymentId};
use crate::domain::subscription::Payment;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// # Errors
    ///
    /// `ErrorCode::Conflict` if the gateway payment id is already recorded.
    async fn create(&self, payment: &Payment) -> Result<(), DomainError>;

    async fn find_by_subscription_id(
        &self,
        gateway_subscription_id: &str,
    ) -> Result<Option<Payment>, DomainError>;

    async fn find_by_gateway_payment_id(
        &self,
        gateway_payment_id: &str,
    ) -> Result<Option<Payment>, DomainError>;

    /// Deleting a missing payment is not an error.
    async fn delete(&self, id: &PaymentId) -> Result<(), DomainError>;
}
