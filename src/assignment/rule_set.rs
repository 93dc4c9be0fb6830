//! Weighted rule composition.
//!
//! Total loss of an arrangement is the weighted sum, over every assigned
//! crew member and every rule, of that rule's loss.

use std::sync::Arc;

use super::{rules, AssignmentContext, AssignmentRule, Loss, RuleKind, Weight};
use crate::config::RuleWeights;
use crate::models::{Crew, CrewedBoat};

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn AssignmentRule>,
    weight: Weight,
}

impl WeightedRule {
    fn loss(&self, crew: &Crew, boat: &CrewedBoat, ctx: &AssignmentContext) -> Loss {
        self.rule.loss(crew, boat, ctx) * Loss::from(self.weight)
    }

    fn gradient(&self, crew: &Crew, boat: &CrewedBoat, ctx: &AssignmentContext) -> Loss {
        self.rule.gradient(crew, boat, ctx) * Loss::from(self.weight)
    }
}

/// Loss of an arrangement, split by rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossReport {
    /// Weighted total.
    pub total: Loss,
    /// Weighted loss per rule, in rule-set order.
    pub by_rule: Vec<(RuleKind, Loss)>,
}

impl LossReport {
    /// Weighted loss charged by one rule (0 if absent).
    pub fn loss_for(&self, kind: RuleKind) -> Loss {
        self.by_rule
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, l)| *l)
            .sum()
    }
}

/// An ordered, weighted set of assignment rules.
#[derive(Clone)]
pub struct RuleSet {
    rules: Vec<WeightedRule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// All built-in rules at weight 1.
    pub fn standard() -> Self {
        Self::from_weights(&RuleWeights::default())
    }

    /// All built-in rules with the given weights. Zero-weight rules are
    /// left out.
    pub fn from_weights(weights: &RuleWeights) -> Self {
        let mut set = Self::new();
        for rule in rules::standard() {
            let weight = match rule.kind() {
                RuleKind::Assist => weights.assist,
                RuleKind::Whitelist => weights.whitelist,
                RuleKind::HighSkill => weights.high_skill,
                RuleKind::LowSkill => weights.low_skill,
                RuleKind::Partner => weights.partner,
                RuleKind::Repeat => weights.repeat,
            };
            if weight > 0 {
                set.rules.push(WeightedRule {
                    rule: Arc::from(rule),
                    weight,
                });
            }
        }
        set
    }

    /// Adds a rule at weight 1.
    pub fn with_rule<R: AssignmentRule + 'static>(self, rule: R) -> Self {
        self.with_weighted_rule(rule, 1)
    }

    /// Adds a weighted rule.
    pub fn with_weighted_rule<R: AssignmentRule + 'static>(mut self, rule: R, weight: Weight) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Weighted loss of `crew` aboard `boat`.
    pub fn crew_loss(&self, crew: &Crew, boat: &CrewedBoat, ctx: &AssignmentContext) -> Loss {
        self.rules
            .iter()
            .map(|wr| wr.loss(crew, boat, ctx))
            .sum()
    }

    /// Weighted gradient of `crew` aboard `boat`.
    pub fn crew_gradient(&self, crew: &Crew, boat: &CrewedBoat, ctx: &AssignmentContext) -> Loss {
        self.rules
            .iter()
            .map(|wr| wr.gradient(crew, boat, ctx))
            .sum()
    }

    /// Weighted loss of everyone aboard one boat.
    pub fn boat_loss(&self, boat: &CrewedBoat, ctx: &AssignmentContext) -> Loss {
        boat.crews
            .iter()
            .map(|c| self.crew_loss(c, boat, ctx))
            .sum()
    }

    /// Weighted loss of a whole arrangement.
    pub fn total_loss(&self, boats: &[CrewedBoat], ctx: &AssignmentContext) -> Loss {
        boats.iter().map(|b| self.boat_loss(b, ctx)).sum()
    }

    /// Weighted loss of an arrangement, split by rule.
    pub fn report(&self, boats: &[CrewedBoat], ctx: &AssignmentContext) -> LossReport {
        let by_rule: Vec<(RuleKind, Loss)> = self
            .rules
            .iter()
            .map(|wr| {
                let loss: Loss = boats
                    .iter()
                    .flat_map(|b| b.crews.iter().map(move |c| (c, b)))
                    .map(|(c, b)| wr.loss(c, b, ctx))
                    .sum();
                (wr.rule.kind(), loss)
            })
            .collect();
        LossReport {
            total: by_rule.iter().map(|(_, l)| l).sum(),
            by_rule,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
