//! Flotilla domain models.
//!
//! Plain data types supplied by the caller (boats, crew) and produced by
//! the engine (crewed boats, flotilla). The engine mutates only the
//! transient `Boat::occupied_berths` and never owns records beyond a call.
//!
//! # Domain Mappings
//!
//! | u-flotilla | Scheduling analogue |
//! |------------|---------------------|
//! | Boat | Resource with capacity |
//! | Crew | Task to place |
//! | CrewedBoat | Resource + assigned tasks |
//! | Flotilla | Schedule |

mod boat;
mod crew;
mod crewed_boat;
mod flotilla;
mod key;
mod rank;
mod skill;
mod window;

pub use boat::Boat;
pub use crew::Crew;
pub use crewed_boat::CrewedBoat;
pub use flotilla::Flotilla;
pub use key::derive_key;
pub use rank::{BoatRank, CrewRank, RankDimension};
pub use skill::{Availability, Skill};
pub use window::EventWindow;
