//! Assignment engine: greedy placement plus best-improvement swaps.
//!
//! # Algorithm
//!
//! 1. Deal crew round-robin over the boats, in the priority order they
//!    arrive in, until each boat holds its `occupied_berths`.
//! 2. Recompute per-crew gradients from the current arrangement.
//! 3. Evaluate every swap of two unlocked crew on different boats; keep
//!    the one with the largest loss reduction (ties: larger combined
//!    gradient, then smaller crew key pair).
//! 4. Apply it if it strictly reduces total loss and repeat from 2;
//!    otherwise stop at the local optimum.
//!
//! Swaps never change boat crew counts, so capacity holds throughout.
//! Total loss is a nonnegative integer that strictly decreases with every
//! accepted swap, so the search terminates; `max_iterations` only bounds
//! the worst case.
//!
//! # Locks
//!
//! The only advanced sailor on a boat that requires assistance is
//! locked in place and never swapped.
//!
//! # Complexity
//! O(n² · k²) per iteration, n = crew, k = largest boat crew.

use tracing::{debug, info, instrument, warn};

use super::{AssignmentContext, Loss, LossReport, RuleSet};
use crate::config::{EngineConfig, DEFAULT_MAX_ITERATIONS};
use crate::models::{Boat, Crew, CrewedBoat, Skill};

/// Position of a crew member: (boat index, crew index).
type Seat = (usize, usize);

/// Optimizer statistics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Loss after the initial placement.
    pub initial_loss: Loss,
    /// Loss after optimization.
    pub final_loss: Loss,
    /// Neighbourhood evaluations performed.
    pub iterations: usize,
    /// Swaps applied.
    pub swaps: usize,
    /// Whether a local optimum was reached (false if the cap was hit).
    pub converged: bool,
    /// Total loss after the initial placement and after each swap.
    pub loss_trace: Vec<Loss>,
}

/// Result of an assignment run.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    /// Boats with their assigned crew; each holds `occupied_berths` crew.
    pub crewed_boats: Vec<CrewedBoat>,
    /// Crew beyond the total occupied berths, in arrival order.
    pub leftover: Vec<Crew>,
    /// Optimizer statistics.
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Copy)]
struct Swap {
    a: Seat,
    b: Seat,
    gain: Loss,
    gradient: Loss,
}

/// Rule-driven crew assignment engine.
///
/// # Example
///
/// ```
/// use u_flotilla::assignment::{AssignmentContext, AssignmentEngine};
/// use u_flotilla::models::{Boat, Crew, Skill};
///
/// let mut gull = Boat::new("Gull", "Owner").with_assistance_required(true);
/// gull.occupied_berths = 1;
/// let mut tern = Boat::new("Tern", "Owner");
/// tern.occupied_berths = 1;
/// let crews = vec![
///     Crew::new("Nov", "S").with_skill(Skill::Novice),
///     Crew::new("Pro", "S").with_skill(Skill::Advanced),
/// ];
///
/// let outcome = AssignmentEngine::new().assign(
///     vec![gull, tern],
///     crews,
///     &AssignmentContext::for_event("E1"),
/// );
/// assert_eq!(outcome.stats.final_loss, 0);
/// assert!(outcome.crewed_boats[0].has_crew("pro-s"));
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    rules: RuleSet,
    max_iterations: usize,
}

impl AssignmentEngine {
    /// Creates an engine with the standard rules.
    pub fn new() -> Self {
        Self {
            rules: RuleSet::standard(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Creates an engine from configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            rules: RuleSet::from_weights(&config.weights),
            max_iterations: config.max_iterations,
        }
    }

    /// Replaces the rule set.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// The rule set in use.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Places and optimizes crew on boats.
    ///
    /// `boats` carry their resolved `occupied_berths`; `crews` arrive in
    /// priority order.
    ///
    /// # Panics
    /// If there are fewer crew than total occupied berths, or if a boat
    /// ends up with a crew count different from its occupied berths.
    #[instrument(skip_all, fields(event_id = %ctx.event_id, boats = boats.len(), crews = crews.len()))]
    pub fn assign(
        &self,
        boats: Vec<Boat>,
        crews: Vec<Crew>,
        ctx: &AssignmentContext,
    ) -> AssignmentOutcome {
        let (mut crewed_boats, leftover) = initial_placement(boats, crews);
        let stats = self.optimize(&mut crewed_boats, ctx);

        for cb in &crewed_boats {
            assert_eq!(
                cb.crew_count() as i64,
                cb.boat.occupied_berths as i64,
                "boat {} holds {} crew for {} occupied berths",
                cb.boat.key,
                cb.crew_count(),
                cb.boat.occupied_berths
            );
        }

        info!(
            initial_loss = stats.initial_loss,
            final_loss = stats.final_loss,
            swaps = stats.swaps,
            converged = stats.converged,
            leftover = leftover.len(),
            "assignment complete"
        );

        AssignmentOutcome {
            crewed_boats,
            leftover,
            stats,
        }
    }

    /// Improves an arrangement in place by pairwise swaps.
    pub fn optimize(&self, boats: &mut [CrewedBoat], ctx: &AssignmentContext) -> SearchStats {
        let initial_loss = self.rules.total_loss(boats, ctx);
        let mut stats = SearchStats {
            initial_loss,
            final_loss: initial_loss,
            loss_trace: vec![initial_loss],
            ..Default::default()
        };

        stats.converged = loop {
            stats.iterations += 1;
            let Some(swap) = self.best_swap(boats, ctx) else {
                break true;
            };
            if stats.swaps >= self.max_iterations {
                break false;
            }

            swap_seats(boats, swap.a, swap.b);
            stats.swaps += 1;
            stats.final_loss -= swap.gain;
            stats.loss_trace.push(stats.final_loss);

            debug!(
                first = %boats[swap.b.0].crews[swap.b.1].key,
                second = %boats[swap.a.0].crews[swap.a.1].key,
                gain = swap.gain,
                loss = stats.final_loss,
                "swap applied"
            );
        };

        if !stats.converged {
            warn!(
                max_iterations = self.max_iterations,
                loss = stats.final_loss,
                "swap cap reached before a local optimum"
            );
        }

        stats
    }

    /// Total loss of an arrangement, split by rule.
    pub fn evaluate(&self, boats: &[CrewedBoat], ctx: &AssignmentContext) -> LossReport {
        self.rules.report(boats, ctx)
    }

    /// Finds the best strictly improving swap, if any.
    fn best_swap(&self, boats: &mut [CrewedBoat], ctx: &AssignmentContext) -> Option<Swap> {
        let boat_losses: Vec<Loss> = boats
            .iter()
            .map(|b| self.rules.boat_loss(b, ctx))
            .collect();
        let gradients: Vec<Vec<Loss>> = boats
            .iter()
            .map(|b| {
                b.crews
                    .iter()
                    .map(|c| self.rules.crew_gradient(c, b, ctx))
                    .collect()
            })
            .collect();
        let seats: Vec<Seat> = boats
            .iter()
            .enumerate()
            .flat_map(|(bi, b)| (0..b.crews.len()).map(move |ci| (bi, ci)))
            .filter(|&(bi, ci)| !is_locked(&boats[bi], &boats[bi].crews[ci]))
            .collect();

        let mut best: Option<Swap> = None;
        for (i, &a) in seats.iter().enumerate() {
            for &b in &seats[i + 1..] {
                if a.0 == b.0 {
                    continue;
                }

                let before = boat_losses[a.0] + boat_losses[b.0];
                swap_seats(boats, a, b);
                let after =
                    self.rules.boat_loss(&boats[a.0], ctx) + self.rules.boat_loss(&boats[b.0], ctx);
                swap_seats(boats, a, b);

                let gain = before - after;
                if gain <= 0 {
                    continue;
                }

                let candidate = Swap {
                    a,
                    b,
                    gain,
                    gradient: gradients[a.0][a.1] + gradients[b.0][b.1],
                };
                let better = match &best {
                    None => true,
                    Some(current) => prefer(boats, &candidate, current),
                };
                if better {
                    best = Some(candidate);
                }
            }
        }

        best
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Deals crew round-robin until each boat holds its occupied berths.
///
/// # Panics
/// If there are fewer crew than total occupied berths.
pub fn initial_placement(boats: Vec<Boat>, crews: Vec<Crew>) -> (Vec<CrewedBoat>, Vec<Crew>) {
    let mut crewed_boats: Vec<CrewedBoat> = boats.into_iter().map(CrewedBoat::new).collect();
    let needed: usize = crewed_boats
        .iter()
        .map(|cb| cb.boat.occupied_berths.max(0) as usize)
        .sum();
    assert!(
        crews.len() >= needed,
        "{} crew cannot fill {needed} occupied berths",
        crews.len()
    );

    let mut pool = crews.into_iter();
    let mut placed = 0;
    while placed < needed {
        for cb in crewed_boats.iter_mut().filter(|cb| !cb.is_full()) {
            if let Some(crew) = pool.next() {
                cb.crews.push(crew);
                placed += 1;
            }
        }
    }

    (crewed_boats, pool.collect())
}

/// Whether `crew` is the only advanced sailor on an assisted boat.
pub fn is_locked(boat: &CrewedBoat, crew: &Crew) -> bool {
    boat.boat.assistance_required && crew.skill == Skill::Advanced && boat.advanced_count() == 1
}

/// Swaps two crew on different boats. `a.0` must differ from `b.0`.
fn swap_seats(boats: &mut [CrewedBoat], a: Seat, b: Seat) {
    let (lo, hi) = if a.0 < b.0 { (a, b) } else { (b, a) };
    let (left, right) = boats.split_at_mut(hi.0);
    std::mem::swap(&mut left[lo.0].crews[lo.1], &mut right[0].crews[hi.1]);
}

/// Orders candidate swaps: larger gain, larger gradient, smaller key pair.
fn prefer(boats: &[CrewedBoat], candidate: &Swap, current: &Swap) -> bool {
    let key_pair = |s: &Swap| {
        let ka = boats[s.a.0].crews[s.a.1].key.as_str();
        let kb = boats[s.b.0].crews[s.b.1].key.as_str();
        if ka <= kb {
            (ka, kb)
        } else {
            (kb, ka)
        }
    };

    candidate
        .gain
        .cmp(&current.gain)
        .then(candidate.gradient.cmp(&current.gradient))
        .then_with(|| key_pair(current).cmp(&key_pair(candidate)))
        .is_gt()
}
