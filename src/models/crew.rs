//! Crew member model.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{derive_key, Availability, CrewRank, Skill};

/// A club member who can crew on boats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crew {
    /// Unique identity key (derived from first + last name).
    pub key: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Club membership number as entered by the member.
    pub membership_number: Option<String>,
    /// Partner's crew key. The relation is read per crew and may be
    /// one-sided.
    pub partner_key: Option<String>,
    /// Sailing skill.
    pub skill: Skill,
    /// Boat keys this crew prefers. Empty = no preference.
    pub whitelist: HashSet<String>,
    /// Declared status per event (event id → availability).
    pub availability: HashMap<String, Availability>,
    /// Boat sailed per past event (event id → boat key, empty = none).
    pub history: HashMap<String, String>,
    /// Priority rank for the current event.
    pub rank: CrewRank,
}

impl Crew {
    /// Creates a crew member, deriving the key from the full name.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let key = derive_key(&[&first_name, &last_name]);

        Self {
            key,
            first_name,
            last_name,
            membership_number: None,
            partner_key: None,
            skill: Skill::default(),
            whitelist: HashSet::new(),
            availability: HashMap::new(),
            history: HashMap::new(),
            rank: CrewRank::default(),
        }
    }

    /// Overrides the derived key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the membership number.
    pub fn with_membership_number(mut self, number: impl Into<String>) -> Self {
        self.membership_number = Some(number.into());
        self
    }

    /// Sets the partner's crew key.
    pub fn with_partner(mut self, partner_key: impl Into<String>) -> Self {
        self.partner_key = Some(partner_key.into());
        self
    }

    /// Sets the skill level.
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skill = skill;
        self
    }

    /// Adds a boat to the whitelist.
    pub fn with_whitelisted(mut self, boat_key: impl Into<String>) -> Self {
        self.whitelist.insert(boat_key.into());
        self
    }

    /// Declares availability for an event.
    pub fn with_availability(mut self, event_id: impl Into<String>, status: Availability) -> Self {
        self.availability.insert(event_id.into(), status);
        self
    }

    /// Records the boat sailed in a past event.
    pub fn with_history(mut self, event_id: impl Into<String>, boat_key: impl Into<String>) -> Self {
        self.history.insert(event_id.into(), boat_key.into());
        self
    }

    /// Sets the priority rank.
    pub fn with_rank(mut self, rank: CrewRank) -> Self {
        self.rank = rank;
        self
    }

    /// Availability for an event (`Unavailable` if nothing was declared).
    pub fn availability_for(&self, event_id: &str) -> Availability {
        self.availability.get(event_id).copied().unwrap_or_default()
    }

    /// Boat sailed in a past event, if any.
    pub fn boat_sailed(&self, event_id: &str) -> Option<&str> {
        self.history
            .get(event_id)
            .map(String::as_str)
            .filter(|k| !k.is_empty())
    }

    /// Whether `boat_key` is acceptable under this crew's whitelist.
    pub fn accepts_boat(&self, boat_key: &str) -> bool {
        self.whitelist.is_empty() || self.whitelist.contains(boat_key)
    }

    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
