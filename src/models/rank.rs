//! Priority rank vectors.
//!
//! A rank is an ordered tuple of integer dimensions compared
//! lexicographically: an earlier dimension always dominates every later
//! one. Ranks are never summed.
//!
//! Both rank types implement [`Ord`] such that `Greater` means
//! *higher priority* (selected first, cut last).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Named rank dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankDimension {
    /// How firmly the crew committed to the event (0..=3).
    Commitment,
    /// Whether the entity is free to be moved or cut (0 or 1).
    Flexibility,
    /// Whether the crew holds a valid membership (0 or 1).
    Membership,
    /// Past events missed within the look-back window.
    Absence,
}

/// Boat priority rank.
///
/// Compared by `flexibility` **ascending** (0 = the owner is sailing as
/// crew elsewhere, so the boat is the scarcer resource), then by `absence`
/// descending (boats that sat out recently come first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoatRank {
    /// 0 if the owner is a selected crew member this event, else 1.
    pub flexibility: i32,
    /// Number of missed events within the look-back window.
    pub absence: i32,
}

impl BoatRank {
    /// Creates a boat rank.
    pub fn new(flexibility: i32, absence: i32) -> Self {
        Self {
            flexibility,
            absence,
        }
    }

    /// Rank dimensions in comparison order.
    pub fn dimensions(&self) -> [(RankDimension, i32); 2] {
        [
            (RankDimension::Flexibility, self.flexibility),
            (RankDimension::Absence, self.absence),
        ]
    }
}

impl Ord for BoatRank {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .flexibility
            .cmp(&self.flexibility)
            .then_with(|| self.absence.cmp(&other.absence))
    }
}

impl PartialOrd for BoatRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Crew priority rank.
///
/// Every dimension ranks higher when larger. Field order is comparison
/// order, so the derived `Ord` is the lexicographic comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct CrewRank {
    /// 0 unavailable, 1 admin override, 2 available, 3 guaranteed/assigned.
    pub commitment: i32,
    /// 0 if the crew owns a boat selected this event, else 1.
    pub flexibility: i32,
    /// 1 if the membership number is valid, else 0.
    pub membership: i32,
    /// Number of missed events within the look-back window.
    pub absence: i32,
}

impl CrewRank {
    /// Creates a crew rank.
    pub fn new(commitment: i32, flexibility: i32, membership: i32, absence: i32) -> Self {
        Self {
            commitment,
            flexibility,
            membership,
            absence,
        }
    }

    /// Rank dimensions in comparison order.
    pub fn dimensions(&self) -> [(RankDimension, i32); 4] {
        [
            (RankDimension::Commitment, self.commitment),
            (RankDimension::Flexibility, self.flexibility),
            (RankDimension::Membership, self.membership),
            (RankDimension::Absence, self.absence),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crew_rank_is_lexicographic() {
        // One commitment level beats any amount of absence.
        let committed = CrewRank::new(3, 0, 0, 0);
        let absent = CrewRank::new(2, 1, 1, 99);
        assert!(committed > absent);

        let a = CrewRank::new(2, 1, 0, 5);
        let b = CrewRank::new(2, 1, 1, 0);
        assert!(b > a);
    }

    #[test]
    fn test_boat_rank_inverts_flexibility() {
        let essential = BoatRank::new(0, 0);
        let flexible = BoatRank::new(1, 10);
        assert!(essential > flexible);

        let rested = BoatRank::new(1, 3);
        let busy = BoatRank::new(1, 1);
        assert!(rested > busy);
    }

    #[test]
    fn test_dimensions_order() {
        let rank = CrewRank::new(3, 1, 0, 2);
        let dims = rank.dimensions();
        assert_eq!(dims[0], (RankDimension::Commitment, 3));
        assert_eq!(dims[3], (RankDimension::Absence, 2));
        assert_eq!(
            BoatRank::new(0, 4).dimensions()[1],
            (RankDimension::Absence, 4)
        );
    }
}
