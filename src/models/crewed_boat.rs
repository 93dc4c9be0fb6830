//! Working unit of an assignment run: a boat and its crew list.

use serde::{Deserialize, Serialize};

use super::{Boat, Crew, Skill};

/// A boat paired with the crew currently assigned to it.
///
/// Created once per selected boat; the crew list is mutated in place by
/// swaps during optimization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewedBoat {
    /// The boat.
    pub boat: Boat,
    /// Assigned crew, in placement order.
    pub crews: Vec<Crew>,
}

impl CrewedBoat {
    /// Creates an empty crewed boat.
    pub fn new(boat: Boat) -> Self {
        let capacity = boat.occupied_berths.max(0) as usize;
        Self {
            boat,
            crews: Vec::with_capacity(capacity),
        }
    }

    /// Adds a crew member.
    pub fn with_crew(mut self, crew: Crew) -> Self {
        self.crews.push(crew);
        self
    }

    /// Number of assigned crew.
    #[inline]
    pub fn crew_count(&self) -> usize {
        self.crews.len()
    }

    /// Whether the crew list has reached the boat's occupied berths.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.crews.len() as i32 >= self.boat.occupied_berths
    }

    /// Whether a crew member with this key is aboard.
    pub fn has_crew(&self, crew_key: &str) -> bool {
        self.crews.iter().any(|c| c.key == crew_key)
    }

    /// Number of advanced sailors aboard.
    pub fn advanced_count(&self) -> usize {
        self.crews
            .iter()
            .filter(|c| c.skill == Skill::Advanced)
            .count()
    }

    /// Max skill level minus min skill level aboard (0 when empty).
    pub fn skill_spread(&self) -> i64 {
        let levels = self.crews.iter().map(|c| c.skill.level());
        match (levels.clone().max(), levels.min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }

    /// Crew keys aboard, in placement order.
    pub fn crew_keys(&self) -> Vec<&str> {
        self.crews.iter().map(|c| c.key.as_str()).collect()
    }
}
