//! Crew-to-boat assignment and swap optimization.
//!
//! Soft preferences are expressed as rules that charge a nonnegative loss
//! for each crew-on-boat placement. The engine places crew greedily, then
//! applies the best loss-reducing pairwise swap until none remains.
//!
//! # Usage
//!
//! ```
//! use u_flotilla::assignment::{rules, AssignmentEngine, RuleSet};
//!
//! let rule_set = RuleSet::new()
//!     .with_rule(rules::Assist)
//!     .with_weighted_rule(rules::Repeat, 2);
//! let engine = AssignmentEngine::new().with_rules(rule_set);
//! ```

mod context;
mod engine;
mod rule_set;
pub mod rules;

pub use context::AssignmentContext;
pub use engine::{initial_placement, is_locked, AssignmentEngine, AssignmentOutcome, SearchStats};
pub use rule_set::{LossReport, RuleSet};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::{Crew, CrewedBoat};

/// Penalty charged by a rule. Never negative.
pub type Loss = i64;

/// Multiplier on a rule's loss. Unsigned, so weighting can scale or
/// disable a rule but never turn it into a reward.
pub type Weight = u32;

/// Identifies a built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleKind {
    /// Boat needing help has no advanced sailor.
    Assist,
    /// Crew placed outside their whitelist.
    Whitelist,
    /// Advanced sailor on a boat with a novice.
    HighSkill,
    /// Novice on a boat with an advanced sailor.
    LowSkill,
    /// Crew sailing with their partner.
    Partner,
    /// Crew back on a boat they sailed recently.
    Repeat,
}

/// A soft rule evaluated per crew-on-boat placement.
///
/// # Conventions
/// - `loss` is the penalty for `crew` sitting on `boat` given everyone
///   else currently aboard. `crew` is expected to be in `boat.crews`.
/// - `gradient` estimates how much total loss moving `crew` elsewhere
///   could remove; by default it equals the current loss.
pub trait AssignmentRule: Send + Sync + Debug {
    /// Rule identity.
    fn kind(&self) -> RuleKind;

    /// Rule name (e.g., "ASSIST").
    fn name(&self) -> &'static str;

    /// Loss for `crew` aboard `boat`.
    fn loss(&self, crew: &Crew, boat: &CrewedBoat, ctx: &AssignmentContext) -> Loss;

    /// Potential loss reduction from moving `crew` off `boat`.
    fn gradient(&self, crew: &Crew, boat: &CrewedBoat, ctx: &AssignmentContext) -> Loss {
        self.loss(crew, boat, ctx)
    }

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
