//! Boat model.
//!
//! A boat offers a number of berths per event, bounded by the owner's
//! configured `[min_berths, max_berths]` range. Boats that need an
//! experienced hand aboard set `assistance_required`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{derive_key, BoatRank};

/// A boat that may sail in events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boat {
    /// Unique identity key (derived from the display name or owner name).
    pub key: String,
    /// Display name.
    pub name: String,
    /// Owner's full name.
    pub owner_name: String,
    /// Owner contact (email or phone).
    pub owner_contact: Option<String>,
    /// Crew key of the owner, when the owner is also a crew member.
    pub owner_key: Option<String>,
    /// Fewest crew the boat can sail with.
    pub min_berths: i32,
    /// Most crew the boat can carry.
    pub max_berths: i32,
    /// Whether an advanced sailor must be aboard.
    pub assistance_required: bool,
    /// Berths the owner offers per event (event id → berths).
    pub berths_offered: HashMap<String, i32>,
    /// Whether the boat sailed in past events (event id → participated).
    pub history: HashMap<String, bool>,
    /// Priority rank for the current event.
    pub rank: BoatRank,
    /// Seats filled during one assignment run. Not part of the record.
    #[serde(skip)]
    pub occupied_berths: i32,
}

impl Boat {
    /// Creates a boat, deriving its key from `name` (or `owner_name` when
    /// `name` is blank).
    pub fn new(name: impl Into<String>, owner_name: impl Into<String>) -> Self {
        let name = name.into();
        let owner_name = owner_name.into();
        let key = if name.trim().is_empty() {
            derive_key(&[&owner_name])
        } else {
            derive_key(&[&name])
        };

        Self {
            key,
            name,
            owner_name,
            owner_contact: None,
            owner_key: None,
            min_berths: 1,
            max_berths: 1,
            assistance_required: false,
            berths_offered: HashMap::new(),
            history: HashMap::new(),
            rank: BoatRank::default(),
            occupied_berths: 0,
        }
    }

    /// Overrides the derived key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the owner contact.
    pub fn with_owner_contact(mut self, contact: impl Into<String>) -> Self {
        self.owner_contact = Some(contact.into());
        self
    }

    /// Links the owner to their crew record.
    pub fn with_owner_key(mut self, crew_key: impl Into<String>) -> Self {
        self.owner_key = Some(crew_key.into());
        self
    }

    /// Sets the berth bounds.
    pub fn with_berths(mut self, min_berths: i32, max_berths: i32) -> Self {
        self.min_berths = min_berths;
        self.max_berths = max_berths;
        self
    }

    /// Marks the boat as needing an advanced sailor aboard.
    pub fn with_assistance_required(mut self, required: bool) -> Self {
        self.assistance_required = required;
        self
    }

    /// Declares the berths offered for an event.
    pub fn with_offer(mut self, event_id: impl Into<String>, berths: i32) -> Self {
        self.berths_offered.insert(event_id.into(), berths);
        self
    }

    /// Records past participation.
    pub fn with_participation(mut self, event_id: impl Into<String>, sailed: bool) -> Self {
        self.history.insert(event_id.into(), sailed);
        self
    }

    /// Sets the priority rank.
    pub fn with_rank(mut self, rank: BoatRank) -> Self {
        self.rank = rank;
        self
    }

    /// Berths offered for an event (0 if nothing was declared).
    pub fn offered_for(&self, event_id: &str) -> i32 {
        self.berths_offered.get(event_id).copied().unwrap_or(0)
    }

    /// Whether the boat sailed in a past event.
    pub fn participated_in(&self, event_id: &str) -> bool {
        self.history.get(event_id).copied().unwrap_or(false)
    }

    /// Seats above the minimum that can still be filled for an event.
    #[inline]
    pub fn spare_berths(&self, event_id: &str) -> i32 {
        self.offered_for(event_id) - self.occupied_berths
    }
}
