//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, Timestamp};
use crate::domain::subscription::Payment;
use crate::ports::PaymentRepository;

const GATEWAY_PAYMENT_UNIQUE_CONSTRAINT: &str = "payments_gateway_payment_id_key";

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    gateway_payment_id: String,
    gateway_subscription_id: String,
    signature: String,
    created_at: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: PaymentId::from_uuid(row.id),
            gateway_payment_id: row.gateway_payment_id,
            gateway_subscription_id: row.gateway_subscription_id,
            signature: row.signature,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "failed to {}", action);
    DomainError::database(format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, gateway_payment_id, gateway_subscription_id, signature, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(&payment.gateway_payment_id)
        .bind(&payment.gateway_subscription_id)
        .bind(&payment.signature)
        .bind(payment.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(GATEWAY_PAYMENT_UNIQUE_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::Conflict,
                        format!("payment {} already recorded", payment.gateway_payment_id),
                    );
                }
            }
            db_error("create payment", e)
        })?;

        Ok(())
    }

    async fn find_by_subscription_id(
        &self,
        gateway_subscription_id: &str,
    ) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, gateway_payment_id, gateway_subscription_id, signature, created_at
            FROM payments
            WHERE gateway_subscription_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(gateway_subscription_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find payment by subscription", e))?;

        Ok(row.map(Payment::from))
    }

    async fn find_by_gateway_payment_id(
        &self,
        gateway_payment_id: &str,
    ) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, gateway_payment_id, gateway_subscription_id, signature, created_at
            FROM payments
            WHERE gateway_payment_id = $1
            "#,
        )
        .bind(gateway_payment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find payment", e))?;

        Ok(row.map(Payment::from))
    }

    async fn delete(&self, id: &PaymentId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete payment", e))?;
        Ok(())
    }
}
