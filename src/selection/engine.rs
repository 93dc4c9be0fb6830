//! Boat and crew selection for one event.
//!
//! # Algorithm
//!
//! 1. Keep boats offering berths and crew that are available/guaranteed.
//! 2. Order both by rank, highest first (ties: seeded shuffle).
//! 3. While total minimum berths exceed the crew count, cut the
//!    lowest-priority boat.
//! 4. While crew exceed the remaining offered berths, cut the
//!    lowest-priority crew.
//! 5. Start every boat at its minimum and deal the remaining seats one
//!    per boat per pass, in priority order, up to each boat's offer.
//!
//! After step 5 the occupied berths sum to the selected crew count and
//! each boat stays within `[min_berths, offered]`.

use rand::Rng;
use tracing::{debug, info, instrument};

use super::shuffle::priority_order;
use crate::models::{Boat, Crew};

/// How supply and demand compared before any cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCase {
    /// No eligible boats or no eligible crew.
    Empty,
    /// `sum(min) <= crew <= sum(offered)`.
    Fit,
    /// `crew < sum(min)`: boats are cut.
    TooFewCrew,
    /// `crew > sum(offered)`: crew are cut.
    TooManyCrew,
}

/// Outcome of selection for one event.
///
/// Selected boats and crew are in priority order; boats carry their
/// resolved `occupied_berths`, which is always at least 1. A boat that
/// would sail empty (minimum 0, no seat dealt) is waitlisted instead.
/// Waitlists are highest priority first.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Event selected for.
    pub event_id: String,
    /// Comparison of supply and demand before cutting.
    pub case: SelectionCase,
    /// Boats that sail.
    pub boats: Vec<Boat>,
    /// Crew that sail.
    pub crews: Vec<Crew>,
    /// Eligible boats that were cut.
    pub waitlisted_boats: Vec<Boat>,
    /// Eligible crew that were cut.
    pub waitlisted_crews: Vec<Crew>,
}

impl Selection {
    /// Sum of occupied berths over selected boats.
    pub fn occupied_berths(&self) -> i64 {
        self.boats.iter().map(|b| b.occupied_berths as i64).sum()
    }
}

/// Rank-driven selection engine.
///
/// # Example
///
/// ```
/// use u_flotilla::models::{Availability, Boat, Crew};
/// use u_flotilla::selection::{event_rng, SelectionEngine};
///
/// let boats = vec![Boat::new("Gull", "Owner").with_berths(1, 2).with_offer("E1", 2)];
/// let crews = vec![
///     Crew::new("Ada", "L").with_availability("E1", Availability::Available),
///     Crew::new("Bob", "M").with_availability("E1", Availability::Available),
/// ];
///
/// let selection = SelectionEngine::new().select("E1", &boats, &crews, &mut event_rng("E1"));
/// assert_eq!(selection.boats[0].occupied_berths, 2);
/// assert!(selection.waitlisted_crews.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionEngine;

impl SelectionEngine {
    /// Creates a selection engine.
    pub fn new() -> Self {
        Self
    }

    /// Selects boats and crew for an event.
    ///
    /// Boats are expected to have passed validation
    /// (`min_berths <= offered <= max_berths` for offered events).
    #[instrument(skip(self, boats, crews, rng), fields(boats = boats.len(), crews = crews.len()))]
    pub fn select<R: Rng + ?Sized>(
        &self,
        event_id: &str,
        boats: &[Boat],
        crews: &[Crew],
        rng: &mut R,
    ) -> Selection {
        let eligible_boats: Vec<&Boat> = boats
            .iter()
            .filter(|b| b.offered_for(event_id) > 0)
            .collect();
        let eligible_crews: Vec<&Crew> = crews
            .iter()
            .filter(|c| c.availability_for(event_id).is_available())
            .collect();

        let boat_order = priority_order(&eligible_boats, |b| b.rank, &mut *rng);
        let crew_order = priority_order(&eligible_crews, |c| c.rank, &mut *rng);

        let mut boats: Vec<Boat> = boat_order
            .iter()
            .map(|&i| eligible_boats[i].clone())
            .collect();
        let mut crews: Vec<Crew> = crew_order
            .iter()
            .map(|&i| eligible_crews[i].clone())
            .collect();
        for boat in &mut boats {
            boat.occupied_berths = 0;
        }

        if boats.is_empty() || crews.is_empty() {
            info!(
                waitlisted_boats = boats.len(),
                waitlisted_crews = crews.len(),
                "nothing to select"
            );
            return Selection {
                event_id: event_id.to_string(),
                case: SelectionCase::Empty,
                boats: Vec::new(),
                crews: Vec::new(),
                waitlisted_boats: boats,
                waitlisted_crews: crews,
            };
        }

        let crew_count = crews.len() as i64;
        let case = if crew_count < total_min(&boats) {
            SelectionCase::TooFewCrew
        } else if crew_count > total_offered(&boats, event_id) {
            SelectionCase::TooManyCrew
        } else {
            SelectionCase::Fit
        };

        // Lowest priority sits at the end; cut from there.
        let mut cut_boats = Vec::new();
        while total_min(&boats) > crew_count {
            match boats.pop() {
                Some(boat) => {
                    debug!(boat = %boat.key, "boat cut");
                    cut_boats.push(boat);
                }
                None => break,
            }
        }
        cut_boats.reverse();

        let capacity = total_offered(&boats, event_id).max(0) as usize;
        let cut_crews = if crews.len() > capacity {
            crews.split_off(capacity)
        } else {
            Vec::new()
        };

        distribute_berths(&mut boats, crews.len(), event_id);

        // A boat with no minimum can come out of distribution without a
        // seat; it does not sail. Unmanned boats outrank every cut boat.
        let (boats, mut waitlisted_boats): (Vec<Boat>, Vec<Boat>) =
            boats.into_iter().partition(|b| b.occupied_berths > 0);
        for boat in &waitlisted_boats {
            debug!(boat = %boat.key, "boat left unmanned");
        }
        waitlisted_boats.extend(cut_boats);

        info!(
            ?case,
            selected_boats = boats.len(),
            selected_crews = crews.len(),
            waitlisted_boats = waitlisted_boats.len(),
            waitlisted_crews = cut_crews.len(),
            "selection complete"
        );

        Selection {
            event_id: event_id.to_string(),
            case,
            boats,
            crews,
            waitlisted_boats,
            waitlisted_crews: cut_crews,
        }
    }
}

fn total_min(boats: &[Boat]) -> i64 {
    boats.iter().map(|b| b.min_berths as i64).sum()
}

fn total_offered(boats: &[Boat], event_id: &str) -> i64 {
    boats.iter().map(|b| b.offered_for(event_id) as i64).sum()
}

/// Sets `occupied_berths` so they sum to `seats`.
///
/// Each boat starts at its minimum; remaining seats go round-robin in
/// slice order to boats below their offer.
///
/// # Panics
/// If `seats` lies outside `[sum(min), sum(offered)]`.
pub fn distribute_berths(boats: &mut [Boat], seats: usize, event_id: &str) {
    for boat in boats.iter_mut() {
        boat.occupied_berths = boat.min_berths;
    }

    let mut remaining = seats as i64 - total_min(boats);
    assert!(
        remaining >= 0,
        "{seats} seats cannot cover minimum berths {}",
        total_min(boats)
    );

    while remaining > 0 {
        let mut dealt = false;
        for boat in boats.iter_mut() {
            if remaining == 0 {
                break;
            }
            if boat.spare_berths(event_id) > 0 {
                boat.occupied_berths += 1;
                remaining -= 1;
                dealt = true;
            }
        }
        assert!(dealt, "{remaining} seats left over after filling every offer");
    }
}
