//! Best-effort event publication after a committed write.

use crate::domain::foundation::{SerializableDomainEvent, UserId};
use crate::ports::EventPublisher;

/// Publishes `event` and logs instead of failing.
///
/// The write the event describes has already been persisted, so a broken
/// subscriber must not turn a successful request into an error.
pub(crate) async fn publish_or_warn<E>(publisher: &dyn EventPublisher, event: &E, user_id: &UserId)
where
    E: SerializableDomainEvent,
{
    let envelope = match event.to_envelope() {
        Ok(envelope) => envelope.with_user_id(user_id.to_string()),
        Err(e) => {
            tracing::warn!(event_type = event.event_type(), error = %e, "could not serialize event");
            return;
        }
    };

    if let Err(e) = publisher.publish(envelope).await {
        tracing::warn!(
            event_type = event.event_type(),
            user_id = %user_id,
            error = %e,
            "event publication failed"
        );
    }
}
