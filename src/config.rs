//! Engine configuration.
//!
//! Plain serde-friendly settings. Every field has a default, so a partial
//! document (or none at all) yields a working configuration; loading and
//! parsing the document is the caller's concern.

use serde::{Deserialize, Serialize};

use crate::assignment::Weight;
use crate::models::EventWindow;

/// Default number of past events considered for repeat counts.
pub const DEFAULT_LOOK_BACK: usize = 5;

/// Default cap on optimizer iterations (one applied swap per iteration).
pub const DEFAULT_MAX_ITERATIONS: usize = 500;

/// Settings shared by ranking, selection, and assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Past events (most recent) that count toward repeats. Ranking takes
    /// its absence window from the caller's `RankingContext`; build it
    /// with [`EngineConfig::event_window`] to use the same length.
    pub look_back: usize,
    /// Upper bound on swap iterations before the optimizer gives up.
    pub max_iterations: usize,
    /// Per-rule loss weights.
    pub weights: RuleWeights,
}

/// Multipliers applied to each rule's loss.
///
/// A weight of 0 disables a rule. Weights are unsigned, so a negative
/// value in a configuration document fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    /// Assisted boat without an advanced sailor.
    pub assist: Weight,
    /// Crew placed off their whitelist.
    pub whitelist: Weight,
    /// Advanced sailor sharing a boat with a novice.
    pub high_skill: Weight,
    /// Novice sharing a boat with an advanced sailor.
    pub low_skill: Weight,
    /// Partners on the same boat.
    pub partner: Weight,
    /// Crew back on a recently sailed boat.
    pub repeat: Weight,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            look_back: DEFAULT_LOOK_BACK,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            weights: RuleWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the look-back window.
    pub fn with_look_back(mut self, look_back: usize) -> Self {
        self.look_back = look_back;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the rule weights.
    pub fn with_weights(mut self, weights: RuleWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The last `look_back` of `past_events` (oldest first).
    pub fn event_window(&self, past_events: &[String]) -> EventWindow {
        EventWindow::new(past_events, self.look_back)
    }
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            assist: 1,
            whitelist: 1,
            high_skill: 1,
            low_skill: 1,
            partner: 1,
            repeat: 1,
        }
    }
}
