//! Crew skill levels and per-event availability.

use serde::{Deserialize, Serialize};

/// Sailing skill level.
///
/// Ordered: `Novice < Intermediate < Advanced`. The ordinal is used
/// directly for skill-gap and skill-spread calculations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Skill {
    /// New to sailing; needs an experienced hand aboard.
    #[default]
    Novice,
    /// Comfortable crewing without supervision.
    Intermediate,
    /// Experienced; can assist boats that require help.
    Advanced,
}

impl Skill {
    /// Ordinal level (0 = novice, 2 = advanced).
    #[inline]
    pub fn level(self) -> i64 {
        match self {
            Skill::Novice => 0,
            Skill::Intermediate => 1,
            Skill::Advanced => 2,
        }
    }

    /// Levels missing to reach `Advanced`.
    #[inline]
    pub fn gap_to_advanced(self) -> i64 {
        Skill::Advanced.level() - self.level()
    }
}

/// A crew member's declared status for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Availability {
    /// Not sailing (default when nothing was declared).
    #[default]
    Unavailable,
    /// Wants to sail.
    Available,
    /// Promised a place (e.g. after a previous assignment run).
    Guaranteed,
    /// Was available, then pulled out.
    Withdrawn,
}

impl Availability {
    /// Whether this status makes the crew eligible for selection.
    #[inline]
    pub fn is_available(self) -> bool {
        matches!(self, Availability::Available | Availability::Guaranteed)
    }
}
