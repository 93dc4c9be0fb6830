//! Flotilla assembly.

use tracing::debug;

use crate::models::{Boat, Crew, CrewedBoat, Flotilla};

/// Collects the pieces of one event's plan into a [`Flotilla`].
///
/// Waitlists keep the order they are added in, so callers add
/// selection waitlists before assignment leftovers.
///
/// # Example
///
/// ```
/// use u_flotilla::builder::FlotillaBuilder;
/// use u_flotilla::models::{Boat, Crew, CrewedBoat};
///
/// let flotilla = FlotillaBuilder::new("E1")
///     .with_crewed_boats(vec![CrewedBoat::new(Boat::new("Gull", "Owner"))
///         .with_crew(Crew::new("Ada", "L"))])
///     .with_waitlisted_crews(vec![Crew::new("Bob", "M")])
///     .build();
///
/// assert_eq!(flotilla.assigned_crew_count(), 1);
/// assert!(flotilla.is_crew_waitlisted("bob-m"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlotillaBuilder {
    event_id: String,
    crewed_boats: Vec<CrewedBoat>,
    waitlisted_boats: Vec<Boat>,
    waitlisted_crews: Vec<Crew>,
}

impl FlotillaBuilder {
    /// Starts a flotilla for an event.
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            ..Default::default()
        }
    }

    /// Adds crewed boats.
    pub fn with_crewed_boats(mut self, crewed_boats: Vec<CrewedBoat>) -> Self {
        self.crewed_boats.extend(crewed_boats);
        self
    }

    /// Appends boats to the boat waitlist.
    pub fn with_waitlisted_boats(mut self, boats: Vec<Boat>) -> Self {
        self.waitlisted_boats.extend(boats);
        self
    }

    /// Appends crew to the crew waitlist.
    pub fn with_waitlisted_crews(mut self, crews: Vec<Crew>) -> Self {
        self.waitlisted_crews.extend(crews);
        self
    }

    /// Builds the flotilla.
    pub fn build(self) -> Flotilla {
        debug!(
            event_id = %self.event_id,
            boats = self.crewed_boats.len(),
            waitlisted_boats = self.waitlisted_boats.len(),
            waitlisted_crews = self.waitlisted_crews.len(),
            "flotilla built"
        );
        Flotilla {
            event_id: self.event_id,
            crewed_boats: self.crewed_boats,
            waitlisted_boats: self.waitlisted_boats,
            waitlisted_crews: self.waitlisted_crews,
        }
    }
}
