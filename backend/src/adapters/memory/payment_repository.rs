//! In-memory payment store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId};
use crate::domain::subscription::Payment;
use crate::ports::PaymentRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<PaymentId, Payment>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.payments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payments.read().await.is_empty()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self.payments.write().await;
        if payments
            .values()
            .any(|p| p.gateway_payment_id == payment.gateway_payment_id)
        {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("payment {} already recorded", payment.gateway_payment_id),
            ));
        }
        payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn find_by_subscription_id(
        &self,
        gateway_subscription_id: &str,
    ) -> Result<Option<Payment>, DomainError> {
        // Newest wins if a subscription ever collected more than one payment
        Ok(self
            .payments
            .read()
            .await
            .values()
            .filter(|p| p.gateway_subscription_id == gateway_subscription_id)
            .max_by_key(|p| p.created_at)
            .cloned())
    }

    async fn find_by_gateway_payment_id(
        &self,
        gateway_payment_id: &str,
    ) -> Result<Option<Payment>, DomainError> {
        Ok(self
            .payments
            .read()
            .await
            .values()
            .find(|p| p.gateway_payment_id == gateway_payment_id)
            .cloned())
    }

    async fn delete(&self, id: &PaymentId) -> Result<(), DomainError> {
        self.payments.write().await.remove(id);
        Ok(())
    }
}
