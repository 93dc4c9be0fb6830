//! Ranking context.

use std::collections::HashSet;

use crate::models::EventWindow;

/// Event-level facts needed to derive ranks.
///
/// The crew/owner sets describe the *current* state of the event (who is
/// already assigned, who is selected), supplied by the caller between runs.
#[derive(Debug, Clone, Default)]
pub struct RankingContext {
    /// Event being ranked for.
    pub event_id: String,
    /// Past events that count toward absence.
    pub window: EventWindow,
    /// Crew keys already assigned to a boat for this event.
    pub assigned_crews: HashSet<String>,
    /// Crew keys selected to sail this event.
    pub selected_crews: HashSet<String>,
    /// Owner crew keys whose boats are selected this event.
    pub selected_boat_owners: HashSet<String>,
}

impl RankingContext {
    /// Creates a context for an event with an empty window.
    pub fn for_event(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            ..Default::default()
        }
    }

    /// Sets the look-back window.
    pub fn with_window(mut self, window: EventWindow) -> Self {
        self.window = window;
        self
    }

    /// Marks a crew member as already assigned.
    pub fn with_assigned_crew(mut self, crew_key: impl Into<String>) -> Self {
        self.assigned_crews.insert(crew_key.into());
        self
    }

    /// Marks a crew member as selected.
    pub fn with_selected_crew(mut self, crew_key: impl Into<String>) -> Self {
        self.selected_crews.insert(crew_key.into());
        self
    }

    /// Marks an owner's boat as selected.
    pub fn with_selected_boat_owner(mut self, owner_key: impl Into<String>) -> Self {
        self.selected_boat_owners.insert(owner_key.into());
        self
    }
}
