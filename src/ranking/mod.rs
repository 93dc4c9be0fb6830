//! Ranking service.
//!
//! Derives [`BoatRank`] and [`CrewRank`] vectors from availability,
//! membership, and history. Selection and assignment consume the ranks
//! stored on the records; this module is how callers refresh them.
//!
//! # Crew commitment
//!
//! | Condition | Commitment |
//! |-----------|-----------|
//! | Already assigned this event | 3 |
//! | Guaranteed | 3 |
//! | Available | 2 |
//! | Unavailable/withdrawn, stored override 1 | 1 (kept) |
//! | Unavailable/withdrawn, stored 3 | 2 |
//! | Unavailable/withdrawn, otherwise | 0 |

mod context;

pub use context::RankingContext;

use tracing::{debug, instrument};

use crate::models::{Availability, Boat, BoatRank, Crew, CrewRank};

/// Commitment for unavailable or withdrawn crew.
pub const COMMITMENT_NONE: i32 = 0;
/// Administrative override that survives re-derivation.
pub const COMMITMENT_OVERRIDE: i32 = 1;
/// Commitment for available crew.
pub const COMMITMENT_AVAILABLE: i32 = 2;
/// Commitment for guaranteed or already-assigned crew.
pub const COMMITMENT_GUARANTEED: i32 = 3;

/// Derives rank vectors for boats and crew.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker;

impl Ranker {
    /// Creates a ranker.
    pub fn new() -> Self {
        Self
    }

    /// Computes a boat's rank.
    pub fn rank_boat(&self, boat: &Boat, ctx: &RankingContext) -> BoatRank {
        let owner_sailing = boat
            .owner_key
            .as_ref()
            .is_some_and(|k| ctx.selected_crews.contains(k));
        let flexibility = if owner_sailing { 0 } else { 1 };

        let absence = ctx
            .window
            .iter()
            .filter(|e| !boat.participated_in(e))
            .count() as i32;

        BoatRank::new(flexibility, absence)
    }

    /// Computes a crew member's rank.
    ///
    /// The stored `crew.rank.commitment` is read to preserve overrides.
    pub fn rank_crew(&self, crew: &Crew, ctx: &RankingContext) -> CrewRank {
        let commitment = derive_commitment(
            crew.rank.commitment,
            crew.availability_for(&ctx.event_id),
            ctx.assigned_crews.contains(&crew.key),
        );
        let flexibility = if ctx.selected_boat_owners.contains(&crew.key) {
            0
        } else {
            1
        };
        let membership = crew
            .membership_number
            .as_deref()
            .is_some_and(is_valid_membership) as i32;
        let absence = ctx
            .window
            .iter()
            .filter(|e| crew.boat_sailed(e).is_none())
            .count() as i32;

        CrewRank::new(commitment, flexibility, membership, absence)
    }

    /// Re-ranks all boats and crew in place.
    #[instrument(skip_all, fields(event_id = %ctx.event_id, boats = boats.len(), crews = crews.len()))]
    pub fn refresh(&self, boats: &mut [Boat], crews: &mut [Crew], ctx: &RankingContext) {
        for boat in boats.iter_mut() {
            boat.rank = self.rank_boat(boat, ctx);
        }
        for crew in crews.iter_mut() {
            crew.rank = self.rank_crew(crew, ctx);
        }
        debug!("ranks refreshed");
    }
}

/// Re-derives commitment from availability, keeping explicit overrides.
pub fn derive_commitment(stored: i32, availability: Availability, assigned: bool) -> i32 {
    if assigned {
        return COMMITMENT_GUARANTEED;
    }
    match availability {
        Availability::Guaranteed => COMMITMENT_GUARANTEED,
        Availability::Available => COMMITMENT_AVAILABLE,
        Availability::Unavailable | Availability::Withdrawn => match stored {
            COMMITMENT_OVERRIDE => COMMITMENT_OVERRIDE,
            COMMITMENT_GUARANTEED => COMMITMENT_AVAILABLE,
            _ => COMMITMENT_NONE,
        },
    }
}

/// Loose membership number check: digits only once spaces and dashes are
/// removed, 4 to 9 digits long.
pub fn is_valid_membership(number: &str) -> bool {
    let digits: Vec<char> = number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    (4..=9).contains(&digits.len()) && digits.iter().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventWindow;

    fn window(ids: &[&str]) -> EventWindow {
        let events: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        EventWindow::new(&events, 5)
    }

    #[test]
    fn test_membership_validity() {
        assert!(is_valid_membership("1234"));
        assert!(is_valid_membership("12 34-567"));
        assert!(is_valid_membership("123456789"));
        assert!(!is_valid_membership("123"));
        assert!(!is_valid_membership("1234567890"));
        assert!(!is_valid_membership("12a45"));
        assert!(!is_valid_membership(""));
    }

    #[test]
    fn test_commitment_from_availability() {
        assert_eq!(derive_commitment(0, Availability::Available, false), 2);
        assert_eq!(derive_commitment(0, Availability::Guaranteed, false), 3);
        assert_eq!(derive_commitment(2, Availability::Withdrawn, false), 0);
        assert_eq!(derive_commitment(0, Availability::Unavailable, false), 0);
    }

    #[test]
    fn test_commitment_assigned_wins() {
        assert_eq!(derive_commitment(1, Availability::Unavailable, true), 3);
        assert_eq!(derive_commitment(0, Availability::Available, true), 3);
    }

    #[test]
    fn test_commitment_override_survives() {
        assert_eq!(derive_commitment(1, Availability::Unavailable, false), 1);
        assert_eq!(derive_commitment(1, Availability::Withdrawn, false), 1);
        // Availability re-derives over the override.
        assert_eq!(derive_commitment(1, Availability::Available, false), 2);
    }

    #[test]
    fn test_commitment_stale_guarantee_resets() {
        assert_eq!(derive_commitment(3, Availability::Unavailable, false), 2);
    }

    #[test]
    fn test_rank_crew() {
        let crew = Crew::new("Ada", "L")
            .with_membership_number("12345")
            .with_availability("E5", Availability::Available)
            .with_history("E1", "gull")
            .with_history("E2", "")
            .with_history("E3", "tern");
        let ctx = RankingContext::for_event("E5")
            .with_window(window(&["E1", "E2", "E3", "E4"]))
            .with_selected_boat_owner("ada-l");

        let rank = Ranker::new().rank_crew(&crew, &ctx);
        assert_eq!(rank, CrewRank::new(2, 0, 1, 2));
    }

    #[test]
    fn test_rank_boat() {
        let boat = Boat::new("Gull", "Owner")
            .with_owner_key("owner")
            .with_participation("E1", true)
            .with_participation("E2", false);
        let ctx = RankingContext::for_event("E4").with_window(window(&["E1", "E2", "E3"]));

        let ranker = Ranker::new();
        assert_eq!(ranker.rank_boat(&boat, &ctx), BoatRank::new(1, 2));

        let ctx = ctx.with_selected_crew("owner");
        assert_eq!(ranker.rank_boat(&boat, &ctx), BoatRank::new(0, 2));
    }

    #[test]
    fn test_refresh_in_place() {
        let mut boats = vec![Boat::new("Gull", "Owner")];
        let mut crews = vec![Crew::new("Ada", "L").with_availability("E1", Availability::Guaranteed)];
        let ctx = RankingContext::for_event("E1").with_window(window(&["E0"]));

        Ranker::new().refresh(&mut boats, &mut crews, &ctx);
        assert_eq!(boats[0].rank, BoatRank::new(1, 1));
        assert_eq!(crews[0].rank, CrewRank::new(3, 1, 0, 1));
    }
}
