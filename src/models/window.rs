//! Look-back window over past events.

use serde::{Deserialize, Serialize};

/// The most recent past events that count toward history-based scores.
///
/// Built from the full chronological list of past events; only the last
/// `look_back` entries are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWindow {
    events: Vec<String>,
}

impl EventWindow {
    /// Keeps the last `look_back` events of a chronological list.
    pub fn new(past_events: &[String], look_back: usize) -> Self {
        let start = past_events.len().saturating_sub(look_back);
        Self {
            events: past_events[start..].to_vec(),
        }
    }

    /// Events in the window, oldest first.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Iterates over event ids in the window.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(String::as_str)
    }

    /// Number of events in the window.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
