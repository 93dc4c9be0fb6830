//! Error types for flotilla planning.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by [`FlotillaPlanner::plan`](crate::planner::FlotillaPlanner::plan).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The request did not name an event.
    #[error("event id must not be empty")]
    EmptyEventId,

    /// Boats or crew failed validation.
    #[error("invalid input for event {event_id}: {} problem(s), first: {}", .errors.len(), first_message(.errors))]
    InvalidInput {
        /// Event being planned.
        event_id: String,
        /// Every problem found.
        errors: Vec<ValidationError>,
    },
}

fn first_message(errors: &[ValidationError]) -> String {
    errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}
