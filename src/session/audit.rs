//! Drag session audit utilities.
//!
//! Lightweight instrumentation hooks so hosts can observe the lifecycle of a
//! `DragController`. Records capture a stage plus structured metadata so
//! callers can log, buffer, or replay the session without touching the
//! controller's control flow.

use std::sync::Mutex;
use std::time::SystemTime;

use serde_json::Value;

/// Lifecycle checkpoints emitted by `DragController`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAuditStage {
    /// A drag captured its active item.
    DragStarted,
    /// The hover target changed.
    HoverChanged,
    /// A drop produced a new layout.
    DropCommitted,
    /// A drop left the layout untouched.
    DropSkipped,
    /// The drag was aborted.
    DragCancelled,
    /// An edit outside a drag produced a new layout.
    EditCommitted,
    /// Listeners received the committed layout.
    ListenersNotified,
}

/// Structured audit entry.
#[derive(Debug, Clone)]
pub struct SessionAuditEvent {
    pub timestamp: SystemTime,
    pub stage: SessionAuditStage,
    pub details: Vec<(String, Value)>,
}

impl SessionAuditEvent {
    fn new(stage: SessionAuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
        }
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

/// Builder helper to append fields ergonomically.
pub struct SessionAuditEventBuilder {
    event: SessionAuditEvent,
}

impl SessionAuditEventBuilder {
    pub fn new(stage: SessionAuditStage) -> Self {
        Self {
            event: SessionAuditEvent::new(stage),
        }
    }

    pub fn detail(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.event.details.push((key.into(), value));
        self
    }

    pub fn finish(self) -> SessionAuditEvent {
        self.event
    }
}

/// Trait implemented by any audit sink.
pub trait SessionAudit: Send + Sync {
    fn record(&self, event: SessionAuditEvent);
}

/// No-op implementation used when auditing is disabled.
#[derive(Debug, Default)]
pub struct NullSessionAudit;

impl SessionAudit for NullSessionAudit {
    fn record(&self, _event: SessionAuditEvent) {}
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct BufferedAudit {
    events: Mutex<Vec<SessionAuditEvent>>,
}

impl BufferedAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionAuditEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<SessionAuditStage> {
        self.events().into_iter().map(|event| event.stage).collect()
    }
}

impl SessionAudit for BufferedAudit {
    fn record(&self, event: SessionAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}
