//! Deadline wrapper for gateway calls.

use std::future::Future;
use std::time::Duration;

use crate::domain::subscription::SubscriptionError;
use crate::ports::PaymentGatewayError;

/// Awaits `call` for at most `limit`. Never retries.
pub(crate) async fn with_deadline<T, F>(
    operation: &'static str,
    limit: Duration,
    call: F,
) -> Result<T, SubscriptionError>
where
    F: Future<Output = Result<T, PaymentGatewayError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            tracing::warn!(operation, error = %e, retryable = e.retryable, "gateway call failed");
            Err(e.into())
        }
        Err(_) => {
            tracing::warn!(operation, timeout_secs = limit.as_secs(), "gateway call timed out");
            Err(SubscriptionError::gateway_timeout(operation, limit.as_secs()))
        }
    }
}
