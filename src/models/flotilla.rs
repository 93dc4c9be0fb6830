//! Flotilla (result) model.
//!
//! The per-event output handed to the persistence layer: which boats sail
//! with which crew, plus the boat and crew waitlists.

use serde::{Deserialize, Serialize};

use super::{Boat, Crew, CrewedBoat};

/// The full result of one event's selection and assignment.
///
/// Waitlists are ordered highest priority first: the first entry is the
/// next to be promoted, the most deprioritized entry is last.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Flotilla {
    /// Event this flotilla was computed for.
    pub event_id: String,
    /// Boats that sail, each with its assigned crew.
    pub crewed_boats: Vec<CrewedBoat>,
    /// Boats offered but not selected.
    pub waitlisted_boats: Vec<Boat>,
    /// Available crew not placed on a boat.
    pub waitlisted_crews: Vec<Crew>,
}

impl Flotilla {
    /// Creates an empty flotilla for an event.
    pub fn empty(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            ..Default::default()
        }
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.crewed_boats.is_empty()
    }

    /// Total number of crew placed on boats.
    pub fn assigned_crew_count(&self) -> usize {
        self.crewed_boats.iter().map(CrewedBoat::crew_count).sum()
    }

    /// Finds the crewed boat by boat key.
    pub fn crewed_boat(&self, boat_key: &str) -> Option<&CrewedBoat> {
        self.crewed_boats.iter().find(|cb| cb.boat.key == boat_key)
    }

    /// Finds the boat a crew member was placed on.
    pub fn boat_of(&self, crew_key: &str) -> Option<&Boat> {
        self.crewed_boats
            .iter()
            .find(|cb| cb.has_crew(crew_key))
            .map(|cb| &cb.boat)
    }

    /// Whether a crew member is on the waitlist.
    pub fn is_crew_waitlisted(&self, crew_key: &str) -> bool {
        self.waitlisted_crews.iter().any(|c| c.key == crew_key)
    }

    /// Whether a boat is on the waitlist.
    pub fn is_boat_waitlisted(&self, boat_key: &str) -> bool {
        self.waitlisted_boats.iter().any(|b| b.key == boat_key)
    }
}
