//! In-process event bus.
//!
//! Delivers each event to its subscribers inline, in subscription order,
//! before `publish` returns. Used by the server and by tests; tests turn
//! on recording to assert on what was published.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// In-process event bus.
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::recording());
/// bus.subscribe("user.registered.v1", stats_updater);
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("user.registered.v1"));
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: Option<RwLock<Vec<EventEnvelope>>>,
}

impl InMemoryEventBus {
    /// Creates a bus that only dispatches.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: None,
        }
    }

    /// Creates a bus that also keeps every published envelope.
    pub fn recording() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: Some(RwLock::new(Vec::new())),
        }
    }

    // === Recording helpers ===

    /// Returns all recorded events. Empty unless built with `recording()`.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .as_ref()
            .map(|log| read(log).clone())
            .unwrap_or_default()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .as_ref()
            .map(|log| read(log).iter().any(|e| e.event_type == event_type))
            .unwrap_or(false)
    }

    pub fn event_count(&self) -> usize {
        self.published
            .as_ref()
            .map(|log| read(log).len())
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Some(log) = &self.published {
            write(log).clear();
        }
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

// A panicking handler must not take the bus down with it, so poisoned
// locks are recovered rather than propagated.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if let Some(log) = &self.published {
            write(log).push(event.clone());
        }

        // Clone handlers to release the lock before awaiting
        let type_handlers: Vec<Arc<dyn EventHandler>> = read(&self.handlers)
            .get(&event.event_type)
            .cloned()
            .unwrap_or_default();

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                tracing::warn!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    error = %e,
                    "event handler failed"
                );
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        write(&self.handlers)
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = write(&self.handlers);
        for event_type in event_types {
            handlers
                .entry((*event_type).to_string())
                .or_default()
                .push(handler.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingHandler {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _event: EventEnvelope) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DomainError::database("boom"));
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    fn envelope(event_type: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, "agg-1", "User", json!({}))
    }

    #[tokio::test]
    async fn publish_invokes_only_matching_handlers() {
        let bus = InMemoryEventBus::new();
        let registered = CountingHandler::new(false);
        let deleted = CountingHandler::new(false);
        bus.subscribe("user.registered.v1", registered.clone());
        bus.subscribe("user.deleted.v1", deleted.clone());

        bus.publish(envelope("user.registered.v1")).await.unwrap();

        assert_eq!(registered.calls(), 1);
        assert_eq!(deleted.calls(), 0);
    }

    #[tokio::test]
    async fn subscribe_all_registers_each_type() {
        let bus = InMemoryEventBus::new();
        let handler = CountingHandler::new(false);
        bus.subscribe_all(&["a.v1", "b.v1"], handler.clone());

        bus.publish_all(vec![envelope("a.v1"), envelope("b.v1"), envelope("c.v1")])
            .await
            .unwrap();

        assert_eq!(handler.calls(), 2);
    }

    #[tokio::test]
    async fn handler_error_is_reported_after_all_handlers_ran() {
        let bus = InMemoryEventBus::new();
        let failing = CountingHandler::new(true);
        let healthy = CountingHandler::new(false);
        bus.subscribe("x.v1", failing.clone());
        bus.subscribe("x.v1", healthy.clone());

        let result = bus.publish(envelope("x.v1")).await;

        assert!(result.is_err());
        assert_eq!(healthy.calls(), 1);
    }

    #[tokio::test]
    async fn recording_bus_keeps_published_events() {
        let bus = InMemoryEventBus::recording();
        bus.publish(envelope("x.v1")).await.unwrap();

        assert!(bus.has_event("x.v1"));
        assert_eq!(bus.event_count(), 1);
        assert_eq!(bus.events_of_type("x.v1").len(), 1);

        bus.clear();
        assert_eq!(bus.event_count(), 0);
    }

    #[tokio::test]
    async fn plain_bus_records_nothing() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("x.v1")).await.unwrap();
        assert!(!bus.has_event("x.v1"));
    }
}
