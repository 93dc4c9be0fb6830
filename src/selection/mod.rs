//! Event selection: which boats and crew sail, and who is waitlisted.
//!
//! Supply (berths offered) and demand (available crew) rarely match. The
//! selection engine reconciles them by cutting the lowest-ranked boats or
//! crew, then resolves each selected boat's occupied berths.
//!
//! # Usage
//!
//! ```
//! use u_flotilla::selection::{event_rng, SelectionEngine};
//!
//! let mut rng = event_rng("2024-06-01");
//! let selection = SelectionEngine::new().select("2024-06-01", &[], &[], &mut rng);
//! assert!(selection.boats.is_empty());
//! ```

mod engine;
mod shuffle;

pub use engine::{distribute_berths, Selection, SelectionCase, SelectionEngine};
pub use shuffle::{event_rng, event_seed, priority_order};
