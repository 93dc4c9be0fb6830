//! Input validation for flotilla planning.
//!
//! Checks structural integrity of boats and crew before selection.
//! Detects:
//! - Duplicate or empty keys
//! - Negative berth counts
//! - Berth ranges with `min_berths > max_berths`
//! - Offers above `max_berths`, or (for the planned event) below `min_berths`
//!
//! Soft inconsistencies (one-sided partner links, whitelists naming
//! unknown boats) are tolerated and only logged.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::models::{Boat, Crew};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two boats or two crew share the same key.
    DuplicateKey,
    /// A boat or crew has an empty key.
    EmptyKey,
    /// A berth count is negative.
    NegativeBerths,
    /// `min_berths` exceeds `max_berths`.
    InvalidBerthRange,
    /// An offer exceeds `max_berths`.
    OfferExceedsCapacity,
    /// A positive offer for the planned event is below `min_berths`.
    OfferBelowMinimum,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a boat record on its own.
///
/// Checks:
/// 1. `min_berths` and `max_berths` are nonnegative
/// 2. `min_berths <= max_berths`
/// 3. Every offer is within `[0, max_berths]`
pub fn validate_boat(boat: &Boat) -> ValidationResult {
    let mut errors = Vec::new();

    if boat.min_berths < 0 || boat.max_berths < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeBerths,
            format!(
                "Boat '{}' has negative berth bounds [{}, {}]",
                boat.key, boat.min_berths, boat.max_berths
            ),
        ));
    }

    if boat.min_berths > boat.max_berths {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidBerthRange,
            format!(
                "Boat '{}' has min_berths {} above max_berths {}",
                boat.key, boat.min_berths, boat.max_berths
            ),
        ));
    }

    let mut offers: Vec<(&String, &i32)> = boat.berths_offered.iter().collect();
    offers.sort();
    for (event_id, &berths) in offers {
        if berths < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeBerths,
                format!(
                    "Boat '{}' offers {} berths for event '{}'",
                    boat.key, berths, event_id
                ),
            ));
        } else if berths > boat.max_berths {
            errors.push(ValidationError::new(
                ValidationErrorKind::OfferExceedsCapacity,
                format!(
                    "Boat '{}' offers {} berths for event '{}' but carries at most {}",
                    boat.key, berths, event_id, boat.max_berths
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the input data for planning one event.
///
/// Checks:
/// 1. Every boat passes [`validate_boat`]
/// 2. No empty or duplicate boat keys
/// 3. No empty or duplicate crew keys
/// 4. Every positive offer for `event_id` covers the boat's `min_berths`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(event_id: &str, boats: &[Boat], crews: &[Crew]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut boat_keys = HashSet::new();
    for boat in boats {
        if let Err(mut boat_errors) = validate_boat(boat) {
            errors.append(&mut boat_errors);
        }

        if boat.key.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyKey,
                format!("Boat '{}' has an empty key", boat.name),
            ));
        } else if !boat_keys.insert(boat.key.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateKey,
                format!("Duplicate boat key: {}", boat.key),
            ));
        }

        let offered = boat.offered_for(event_id);
        if offered > 0 && offered < boat.min_berths {
            errors.push(ValidationError::new(
                ValidationErrorKind::OfferBelowMinimum,
                format!(
                    "Boat '{}' offers {} berths for event '{}' but needs at least {}",
                    boat.key, offered, event_id, boat.min_berths
                ),
            ));
        }
    }

    let mut crew_by_key: HashMap<&str, &Crew> = HashMap::new();
    for crew in crews {
        if crew.key.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyKey,
                format!("Crew '{}' has an empty key", crew.full_name()),
            ));
        } else if crew_by_key.insert(crew.key.as_str(), crew).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateKey,
                format!("Duplicate crew key: {}", crew.key),
            ));
        }
    }

    log_soft_inconsistencies(&boat_keys, &crew_by_key);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn log_soft_inconsistencies(boat_keys: &HashSet<&str>, crew_by_key: &HashMap<&str, &Crew>) {
    for crew in crew_by_key.values() {
        if let Some(partner_key) = crew.partner_key.as_deref() {
            let mutual = crew_by_key
                .get(partner_key)
                .and_then(|p| p.partner_key.as_deref())
                == Some(crew.key.as_str());
            if !mutual {
                debug!(crew = %crew.key, partner = partner_key, "one-sided partner link");
            }
        }
        for boat_key in &crew.whitelist {
            if !boat_keys.contains(boat_key.as_str()) {
                debug!(crew = %crew.key, boat = %boat_key, "whitelist names unknown boat");
            }
        }
    }
}
