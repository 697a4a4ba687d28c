use std::sync::{Mutex, PoisonError};

use tracing::{debug, error, warn};
use vidtally_models::{Event, Status};

/// Receiver of progress [`Event`]s.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

impl<F> EventSink for F
where
    F: Fn(Event) + Send + Sync,
{
    fn emit(&self, event: Event) {
        self(event);
    }
}

/// Forwards events to `tracing`, at a level matching their status.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: Event) {
        match event.status() {
            Status::Error => error!(target: "vidtally::events", "{event}"),
            Status::Warning => warn!(target: "vidtally::events", "{event}"),
            Status::Info | Status::Success | Status::Skipped => debug!(target: "vidtally::events", "{event}"),
        }
    }
}

/// Keeps every event in memory, for front-ends that poll instead of render.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<Event>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: Event) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}
