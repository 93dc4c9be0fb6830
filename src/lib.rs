//! Boat and crew planning for sailing club events.
//!
//! Decides, for one event, which boats sail, how many berths each fills,
//! which crew sail, and who sits on which boat. Everyone eligible but not
//! placed ends up on a waitlist.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Boat`, `Crew`, `CrewedBoat`, `Flotilla`,
//!   `BoatRank`, `CrewRank`, `EventWindow`
//! - **`ranking`**: Derives rank vectors from availability, membership, and history
//! - **`selection`**: Rank-ordered boat/crew selection and berth distribution
//! - **`assignment`**: Loss rules and the swap-based assignment optimizer
//! - **`builder`**: Assembles the per-event `Flotilla`
//! - **`planner`**: Validation → selection → assignment → flotilla in one call
//! - **`validation`**: Input integrity checks (duplicate keys, berth ranges, offers)
//! - **`config`**: Engine configuration (look-back, iteration cap, rule weights)
//! - **`error`**: Planning errors
//!
//! # Architecture
//!
//! Selection and assignment are pure functions of their input plus a
//! random generator seeded from the event id, so the same input always
//! yields the same flotilla. Persistence and notification belong to the
//! caller.

pub mod assignment;
pub mod builder;
pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod ranking;
pub mod selection;
pub mod validation;

pub use error::PlanError;
pub use planner::{FlotillaPlanner, Plan, PlanRequest};
