//! End-to-end flotilla planning for one event.
//!
//! # Pipeline
//!
//! 1. Validate boats and crew.
//! 2. Select boats and crew, resolving occupied berths (seeded by the
//!    event id, so a plan is reproducible).
//! 3. Assign selected crew to selected boats and optimize.
//! 4. Build the flotilla: selection waitlists first, then any crew the
//!    assignment left over.

use tracing::{info, instrument, warn};

use crate::assignment::{AssignmentContext, AssignmentEngine, SearchStats};
use crate::builder::FlotillaBuilder;
use crate::config::EngineConfig;
use crate::error::PlanError;
use crate::models::{Boat, Crew, Flotilla};
use crate::selection::{event_rng, SelectionCase, SelectionEngine};
use crate::validation::validate_input;

/// Input container for planning.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// Event to plan.
    pub event_id: String,
    /// Past event ids, oldest first.
    pub past_events: Vec<String>,
    /// All known boats.
    pub boats: Vec<Boat>,
    /// All known crew.
    pub crews: Vec<Crew>,
}

impl PlanRequest {
    /// Creates a request with no past events.
    pub fn new(event_id: impl Into<String>, boats: Vec<Boat>, crews: Vec<Crew>) -> Self {
        Self {
            event_id: event_id.into(),
            past_events: Vec::new(),
            boats,
            crews,
        }
    }

    /// Sets past event ids, oldest first.
    pub fn with_past_events<I, S>(mut self, past_events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.past_events = past_events.into_iter().map(Into::into).collect();
        self
    }
}

/// A computed plan.
#[derive(Debug, Clone)]
pub struct Plan {
    /// The flotilla for the event.
    pub flotilla: Flotilla,
    /// How supply and demand compared before selection cut anything.
    pub case: SelectionCase,
    /// Optimizer statistics.
    pub stats: SearchStats,
}

/// Validates, selects, and assigns in one call.
///
/// # Example
///
/// ```
/// use u_flotilla::models::{Availability, Boat, Crew};
/// use u_flotilla::planner::{FlotillaPlanner, PlanRequest};
///
/// let boats = vec![Boat::new("Gull", "Owner").with_berths(2, 2).with_offer("E1", 2)];
/// let crews = vec![
///     Crew::new("Ada", "L").with_availability("E1", Availability::Available),
///     Crew::new("Bob", "M").with_availability("E1", Availability::Guaranteed),
///     Crew::new("Cy", "N").with_availability("E1", Availability::Available),
/// ];
///
/// let plan = FlotillaPlanner::new()
///     .plan(&PlanRequest::new("E1", boats, crews))
///     .unwrap();
/// assert_eq!(plan.flotilla.assigned_crew_count(), 2);
/// assert_eq!(plan.flotilla.waitlisted_crews.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FlotillaPlanner {
    config: EngineConfig,
    selection: SelectionEngine,
    assignment: AssignmentEngine,
}

impl FlotillaPlanner {
    /// Creates a planner with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a planner from configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            assignment: AssignmentEngine::from_config(&config),
            selection: SelectionEngine::new(),
            config,
        }
    }

    /// Replaces the assignment engine.
    pub fn with_assignment_engine(mut self, engine: AssignmentEngine) -> Self {
        self.assignment = engine;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Plans one event.
    ///
    /// # Errors
    /// [`PlanError::EmptyEventId`] for a blank event id,
    /// [`PlanError::InvalidInput`] if validation finds any problem.
    #[instrument(skip_all, fields(event_id = %request.event_id))]
    pub fn plan(&self, request: &PlanRequest) -> Result<Plan, PlanError> {
        if request.event_id.trim().is_empty() {
            return Err(PlanError::EmptyEventId);
        }

        validate_input(&request.event_id, &request.boats, &request.crews).map_err(|errors| {
            warn!(problems = errors.len(), "input rejected");
            PlanError::InvalidInput {
                event_id: request.event_id.clone(),
                errors,
            }
        })?;

        let mut rng = event_rng(&request.event_id);
        let selection =
            self.selection
                .select(&request.event_id, &request.boats, &request.crews, &mut rng);
        let case = selection.case;

        let ctx = AssignmentContext::for_event(&request.event_id)
            .with_window(self.config.event_window(&request.past_events));
        let outcome = self.assignment.assign(selection.boats, selection.crews, &ctx);

        let flotilla = FlotillaBuilder::new(&request.event_id)
            .with_crewed_boats(outcome.crewed_boats)
            .with_waitlisted_boats(selection.waitlisted_boats)
            .with_waitlisted_crews(selection.waitlisted_crews)
            .with_waitlisted_crews(outcome.leftover)
            .build();

        info!(
            ?case,
            boats = flotilla.crewed_boats.len(),
            crews = flotilla.assigned_crew_count(),
            waitlisted_boats = flotilla.waitlisted_boats.len(),
            waitlisted_crews = flotilla.waitlisted_crews.len(),
            loss = outcome.stats.final_loss,
            "plan complete"
        );

        Ok(Plan {
            flotilla,
            case,
            stats: outcome.stats,
        })
    }
}

impl Default for FlotillaPlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::models::{Availability, BoatRank, CrewRank, Skill};
    use crate::validation::ValidationErrorKind;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("u_flotilla=debug")
            .with_test_writer()
            .try_init();
    }

    fn boat(name: &str, min: i32, max: i32, offered: i32) -> Boat {
        Boat::new(name, format!("{name} Owner"))
            .with_berths(min, max)
            .with_offer("E1", offered)
    }

    fn crew(first: &str, availability: Availability) -> Crew {
        Crew::new(first, "Sailor").with_availability("E1", availability)
    }

    fn available_crew(n: usize) -> Vec<Crew> {
        (0..n)
            .map(|i| crew(&format!("C{i}"), Availability::Available))
            .collect()
    }

    fn assert_capacity(flotilla: &Flotilla) {
        for cb in &flotilla.crewed_boats {
            assert_eq!(cb.crew_count() as i32, cb.boat.occupied_berths);
            assert!(cb.boat.occupied_berths >= cb.boat.min_berths);
            assert!(cb.boat.occupied_berths <= cb.boat.offered_for("E1"));
        }
    }

    fn assert_conserved(request: &PlanRequest, flotilla: &Flotilla) {
        let mut seen = HashSet::new();
        let placed = flotilla.crewed_boats.iter().flat_map(|cb| cb.crews.iter());
        for c in placed.chain(flotilla.waitlisted_crews.iter()) {
            assert!(seen.insert(c.key.clone()), "{} appears twice", c.key);
        }
        let expected: HashSet<String> = request
            .crews
            .iter()
            .filter(|c| c.availability_for("E1").is_available())
            .map(|c| c.key.clone())
            .collect();
        assert_eq!(seen, expected);

        let boats: HashSet<&str> = flotilla
            .crewed_boats
            .iter()
            .map(|cb| cb.boat.key.as_str())
            .chain(flotilla.waitlisted_boats.iter().map(|b| b.key.as_str()))
            .collect();
        let offered: HashSet<&str> = request
            .boats
            .iter()
            .filter(|b| b.offered_for("E1") > 0)
            .map(|b| b.key.as_str())
            .collect();
        assert_eq!(boats, offered);
    }

    #[test]
    fn test_perfect_fit() {
        init_tracing();
        let request = PlanRequest::new(
            "E1",
            vec![boat("Gull", 2, 2, 2), boat("Tern", 2, 2, 2)],
            available_crew(4),
        );
        let plan = FlotillaPlanner::new().plan(&request).unwrap();

        assert_eq!(plan.case, SelectionCase::Fit);
        assert_eq!(plan.flotilla.crewed_boats.len(), 2);
        assert_eq!(plan.flotilla.assigned_crew_count(), 4);
        assert!(plan.flotilla.waitlisted_boats.is_empty());
        assert!(plan.flotilla.waitlisted_crews.is_empty());
        assert_capacity(&plan.flotilla);
        assert_conserved(&request, &plan.flotilla);
    }

    #[test]
    fn test_too_few_crew() {
        init_tracing();
        let request = PlanRequest::new(
            "E1",
            vec![
                boat("Gull", 2, 3, 3),
                boat("Tern", 2, 3, 3),
                boat("Auk", 2, 3, 3),
            ],
            available_crew(4),
        );
        let plan = FlotillaPlanner::new().plan(&request).unwrap();

        assert_eq!(plan.case, SelectionCase::TooFewCrew);
        assert!(!plan.flotilla.waitlisted_boats.is_empty());
        let occupied: i32 = plan
            .flotilla
            .crewed_boats
            .iter()
            .map(|cb| cb.boat.occupied_berths)
            .sum();
        assert_eq!(occupied, 4);
        assert_capacity(&plan.flotilla);
        assert_conserved(&request, &plan.flotilla);
    }

    #[test]
    fn test_too_many_crew_waitlists_lowest_ranked() {
        init_tracing();
        let mut crews = available_crew(6);
        for (i, c) in crews.iter_mut().enumerate() {
            let commitment = if i == 1 || i == 4 { 2 } else { 3 };
            c.rank = CrewRank::new(commitment, 1, 1, 0);
        }
        let request = PlanRequest::new(
            "E1",
            vec![boat("Gull", 1, 2, 2), boat("Tern", 1, 2, 2)],
            crews,
        );
        let plan = FlotillaPlanner::new().plan(&request).unwrap();

        assert_eq!(plan.case, SelectionCase::TooManyCrew);
        let mut waitlisted: Vec<&str> = plan
            .flotilla
            .waitlisted_crews
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        waitlisted.sort();
        assert_eq!(waitlisted, vec!["c1-sailor", "c4-sailor"]);
        assert_capacity(&plan.flotilla);
        assert_conserved(&request, &plan.flotilla);
    }

    #[test]
    fn test_assist_boat_gets_advanced_sailor() {
        init_tracing();
        let boats = vec![
            boat("Gull", 2, 2, 2).with_assistance_required(true),
            boat("Tern", 2, 2, 2),
        ];
        let crews = vec![
            crew("Nov1", Availability::Available).with_skill(Skill::Novice),
            crew("Nov2", Availability::Available).with_skill(Skill::Novice),
            crew("Mid", Availability::Available).with_skill(Skill::Intermediate),
            crew("Pro", Availability::Available).with_skill(Skill::Advanced),
        ];
        let request = PlanRequest::new("E1", boats, crews);
        let plan = FlotillaPlanner::new().plan(&request).unwrap();

        let gull = plan.flotilla.crewed_boat("gull").unwrap();
        assert_eq!(gull.advanced_count(), 1);
        assert!(plan.stats.converged);
        assert!(plan.stats.final_loss <= plan.stats.initial_loss);
    }

    #[test]
    fn test_repeat_window_follows_look_back() {
        init_tracing();
        let boats = vec![boat("Gull", 1, 1, 1), boat("Tern", 1, 1, 1)];
        let crews = vec![
            crew("Ada", Availability::Guaranteed)
                .with_history("E0", "gull")
                .with_history("P1", "gull")
                .with_history("P2", "gull"),
            crew("Bob", Availability::Guaranteed),
        ];
        let request = PlanRequest::new("E1", boats, crews).with_past_events(["E0", "P1", "P2"]);
        let plan = FlotillaPlanner::new().plan(&request).unwrap();

        assert_eq!(plan.flotilla.boat_of("ada-sailor").unwrap().key, "tern");
        assert_eq!(plan.stats.final_loss, 0);
    }

    #[test]
    fn test_plan_is_idempotent() {
        let request = PlanRequest::new(
            "E1",
            vec![
                boat("Gull", 1, 3, 3),
                boat("Tern", 1, 3, 2),
                boat("Auk", 2, 3, 3),
            ],
            available_crew(9),
        );
        let planner = FlotillaPlanner::new();
        let first = planner.plan(&request).unwrap();
        let second = planner.plan(&request).unwrap();

        let layout = |plan: &Plan| -> Vec<(String, Vec<String>)> {
            plan.flotilla
                .crewed_boats
                .iter()
                .map(|cb| {
                    let keys = cb.crew_keys().into_iter().map(String::from).collect();
                    (cb.boat.key.clone(), keys)
                })
                .collect()
        };
        assert_eq!(layout(&first), layout(&second));
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_empty_inputs() {
        let planner = FlotillaPlanner::new();

        let no_crew = PlanRequest::new("E1", vec![boat("Gull", 1, 2, 2)], Vec::new());
        let plan = planner.plan(&no_crew).unwrap();
        assert_eq!(plan.case, SelectionCase::Empty);
        assert!(plan.flotilla.is_empty());
        assert!(plan.flotilla.is_boat_waitlisted("gull"));

        let no_boats = PlanRequest::new("E1", Vec::new(), available_crew(2));
        let plan = planner.plan(&no_boats).unwrap();
        assert!(plan.flotilla.is_empty());
        assert_eq!(plan.flotilla.waitlisted_crews.len(), 2);
    }

    #[test]
    fn test_unavailable_crew_excluded() {
        let request = PlanRequest::new(
            "E1",
            vec![boat("Gull", 1, 2, 2)],
            vec![
                crew("Ada", Availability::Available),
                crew("Bob", Availability::Withdrawn),
                crew("Cy", Availability::Unavailable),
            ],
        );
        let plan = FlotillaPlanner::new().plan(&request).unwrap();

        assert_eq!(plan.flotilla.assigned_crew_count(), 1);
        assert!(plan.flotilla.waitlisted_crews.is_empty());
        assert_conserved(&request, &plan.flotilla);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let request = PlanRequest::new(
            "E1",
            vec![boat("Gull", 3, 2, 2), boat("Gull", 1, 2, 2)],
            Vec::new(),
        );
        match FlotillaPlanner::new().plan(&request) {
            Err(PlanError::InvalidInput { event_id, errors }) => {
                assert_eq!(event_id, "E1");
                let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
                assert!(kinds.contains(&ValidationErrorKind::InvalidBerthRange));
                assert!(kinds.contains(&ValidationErrorKind::DuplicateKey));
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_blank_event_id() {
        let request = PlanRequest::new("  ", Vec::new(), Vec::new());
        assert_eq!(
            FlotillaPlanner::new().plan(&request).unwrap_err(),
            PlanError::EmptyEventId
        );
    }

    #[test]
    fn test_config_caps_swaps() {
        let config = EngineConfig::default().with_max_iterations(0);
        // Ranks fix the order, so Nov lands alone on the assisted boat.
        let boats = vec![
            boat("Gull", 1, 1, 1)
                .with_assistance_required(true)
                .with_rank(BoatRank::new(0, 0)),
            boat("Tern", 1, 1, 1).with_rank(BoatRank::new(1, 0)),
        ];
        let crews = vec![
            crew("Nov", Availability::Guaranteed)
                .with_skill(Skill::Novice)
                .with_rank(CrewRank::new(3, 1, 1, 0)),
            crew("Pro", Availability::Available)
                .with_skill(Skill::Advanced)
                .with_rank(CrewRank::new(2, 1, 1, 0)),
        ];
        let plan = FlotillaPlanner::with_config(config)
            .plan(&PlanRequest::new("E1", boats, crews))
            .unwrap();

        assert_eq!(plan.stats.swaps, 0);
        assert!(!plan.stats.converged);
        assert_eq!(plan.stats.final_loss, 2);
        assert_eq!(plan.flotilla.boat_of("nov-sailor").unwrap().key, "gull");
    }
}
