//! Assignment context for rule evaluation.

use crate::models::EventWindow;

/// Event-level state passed to assignment rules.
#[derive(Debug, Clone, Default)]
pub struct AssignmentContext {
    /// Event being assigned.
    pub event_id: String,
    /// Past events that count toward repeats.
    pub window: EventWindow,
}

impl AssignmentContext {
    /// Creates a context with an empty window.
    pub fn for_event(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            window: EventWindow::default(),
        }
    }

    /// Sets the look-back window.
    pub fn with_window(mut self, window: EventWindow) -> Self {
        self.window = window;
        self
    }
}
