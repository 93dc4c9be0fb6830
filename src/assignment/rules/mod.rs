//! Built-in assignment rules.
//!
//! # Rules
//!
//! | Rule | Loss condition | Loss |
//! |------|----------------|------|
//! | ASSIST | boat needs help, no advanced aboard | skill gap to advanced |
//! | WHITELIST | whitelist set and boat not in it | 1 |
//! | HIGH_SKILL | skill spread ≥ 2, crew is advanced | 1 |
//! | LOW_SKILL | skill spread ≥ 2, crew is novice | 1 |
//! | PARTNER | partner aboard the same boat | 1 |
//! | REPEAT | sailed this boat in the window | times sailed |
//!
//! # Convention
//! All rules return 0 for a satisfied placement and a positive loss for
//! a violation.

use super::{AssignmentContext, AssignmentRule, Loss, RuleKind};
use crate::models::{Crew, CrewedBoat, Skill};

/// Skill spread at or above which mixed-skill rules apply.
const SPREAD_THRESHOLD: i64 = 2;

/// The six built-in rules, in evaluation order.
pub fn standard() -> Vec<Box<dyn AssignmentRule>> {
    vec![
        Box::new(Assist),
        Box::new(Whitelist),
        Box::new(HighSkill),
        Box::new(LowSkill),
        Box::new(Partner),
        Box::new(Repeat),
    ]
}

// ======================== Skill rules ========================

/// Boats that require assistance should carry an advanced sailor.
///
/// While no advanced sailor is aboard, every other crew member pays the
/// number of levels they lack (novice 2, intermediate 1). Once an
/// advanced sailor boards, the loss drops to 0 for everyone.
///
/// The gradient credits advanced sailors who are not the sole advanced
/// hand on an assisted boat: they could resolve a violation elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct Assist;

impl AssignmentRule for Assist {
    fn kind(&self) -> RuleKind {
        RuleKind::Assist
    }

    fn name(&self) -> &'static str {
        "ASSIST"
    }

    fn loss(&self, crew: &Crew, boat: &CrewedBoat, _ctx: &AssignmentContext) -> Loss {
        if boat.boat.assistance_required && boat.advanced_count() == 0 {
            crew.skill.gap_to_advanced()
        } else {
            0
        }
    }

    fn gradient(&self, crew: &Crew, boat: &CrewedBoat, ctx: &AssignmentContext) -> Loss {
        let needed_here = boat.boat.assistance_required && boat.advanced_count() <= 1;
        let spare_help = if crew.skill == Skill::Advanced && !needed_here {
            Skill::Advanced.level()
        } else {
            0
        };
        self.loss(crew, boat, ctx) + spare_help
    }

    fn description(&self) -> &'static str {
        "Assisted boats carry an advanced sailor"
    }
}

/// Advanced sailor on a boat whose skill spread reaches the threshold.
#[derive(Debug, Clone, Copy)]
pub struct HighSkill;

impl AssignmentRule for HighSkill {
    fn kind(&self) -> RuleKind {
        RuleKind::HighSkill
    }

    fn name(&self) -> &'static str {
        "HIGH_SKILL"
    }

    fn loss(&self, crew: &Crew, boat: &CrewedBoat, _ctx: &AssignmentContext) -> Loss {
        (crew.skill == Skill::Advanced && boat.skill_spread() >= SPREAD_THRESHOLD) as Loss
    }

    fn description(&self) -> &'static str {
        "Avoid advanced sailors alongside novices"
    }
}

/// Novice on a boat whose skill spread reaches the threshold.
#[derive(Debug, Clone, Copy)]
pub struct LowSkill;

impl AssignmentRule for LowSkill {
    fn kind(&self) -> RuleKind {
        RuleKind::LowSkill
    }

    fn name(&self) -> &'static str {
        "LOW_SKILL"
    }

    fn loss(&self, crew: &Crew, boat: &CrewedBoat, _ctx: &AssignmentContext) -> Loss {
        (crew.skill == Skill::Novice && boat.skill_spread() >= SPREAD_THRESHOLD) as Loss
    }

    fn description(&self) -> &'static str {
        "Avoid novices alongside advanced sailors"
    }
}

// ======================== Preference rules ========================

/// Crew with a whitelist should sail on a whitelisted boat.
#[derive(Debug, Clone, Copy)]
pub struct Whitelist;

impl AssignmentRule for Whitelist {
    fn kind(&self) -> RuleKind {
        RuleKind::Whitelist
    }

    fn name(&self) -> &'static str {
        "WHITELIST"
    }

    fn loss(&self, crew: &Crew, boat: &CrewedBoat, _ctx: &AssignmentContext) -> Loss {
        (!crew.accepts_boat(&boat.boat.key)) as Loss
    }

    fn description(&self) -> &'static str {
        "Crew sail on boats they whitelisted"
    }
}

/// Partners are spread over different boats.
///
/// Read from this crew's side only: a one-sided partner link charges
/// just the crew that declared it.
#[derive(Debug, Clone, Copy)]
pub struct Partner;

impl AssignmentRule for Partner {
    fn kind(&self) -> RuleKind {
        RuleKind::Partner
    }

    fn name(&self) -> &'static str {
        "PARTNER"
    }

    fn loss(&self, crew: &Crew, boat: &CrewedBoat, _ctx: &AssignmentContext) -> Loss {
        match crew.partner_key.as_deref() {
            Some(partner) if partner != crew.key => boat.has_crew(partner) as Loss,
            _ => 0,
        }
    }

    fn description(&self) -> &'static str {
        "Partners sail on different boats"
    }
}

// ======================== History rules ========================

/// Crew rotate through boats rather than repeating one.
///
/// Loss is the number of window events in which the crew sailed this
/// boat. The gradient adds the crew's empty history slots: crew with
/// little history can absorb a repeat-prone seat at no cost.
#[derive(Debug, Clone, Copy)]
pub struct Repeat;

impl AssignmentRule for Repeat {
    fn kind(&self) -> RuleKind {
        RuleKind::Repeat
    }

    fn name(&self) -> &'static str {
        "REPEAT"
    }

    fn loss(&self, crew: &Crew, boat: &CrewedBoat, ctx: &AssignmentContext) -> Loss {
        ctx.window
            .iter()
            .filter(|e| crew.boat_sailed(e) == Some(boat.boat.key.as_str()))
            .count() as Loss
    }

    fn gradient(&self, crew: &Crew, boat: &CrewedBoat, ctx: &AssignmentContext) -> Loss {
        let empty_slots = ctx
            .window
            .iter()
            .filter(|e| crew.boat_sailed(e).is_none())
            .count() as Loss;
        self.loss(crew, boat, ctx) + empty_slots
    }

    fn description(&self) -> &'static str {
        "Crew rotate through boats"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Boat, EventWindow};

    fn ctx(events: &[&str]) -> AssignmentContext {
        let events: Vec<String> = events.iter().map(|s| s.to_string()).collect();
        AssignmentContext::for_event("E9").with_window(EventWindow::new(&events, 10))
    }

    fn sailor(name: &str, skill: Skill) -> Crew {
        Crew::new(name, "Sailor").with_skill(skill)
    }

    fn assisted_boat() -> CrewedBoat {
        CrewedBoat::new(Boat::new("Gull", "Owner").with_assistance_required(true))
    }

    #[test]
    fn test_assist_novice_alone() {
        let novice = sailor("Nov", Skill::Novice);
        let cb = assisted_boat().with_crew(novice.clone());
        assert_eq!(Assist.loss(&novice, &cb, &ctx(&[])), 2);
    }

    #[test]
    fn test_assist_cleared_by_advanced() {
        let novice = sailor("Nov", Skill::Novice);
        let pro = sailor("Pro", Skill::Advanced);
        let cb = assisted_boat()
            .with_crew(novice.clone())
            .with_crew(pro.clone());
        assert_eq!(Assist.loss(&novice, &cb, &ctx(&[])), 0);
        assert_eq!(Assist.loss(&pro, &cb, &ctx(&[])), 0);
    }

    #[test]
    fn test_assist_intermediate_gap() {
        let mid = sailor("Mid", Skill::Intermediate);
        let cb = assisted_boat().with_crew(mid.clone());
        assert_eq!(Assist.loss(&mid, &cb, &ctx(&[])), 1);
    }

    #[test]
    fn test_assist_not_required() {
        let novice = sailor("Nov", Skill::Novice);
        let cb = CrewedBoat::new(Boat::new("Tern", "Owner")).with_crew(novice.clone());
        assert_eq!(Assist.loss(&novice, &cb, &ctx(&[])), 0);
    }

    #[test]
    fn test_assist_gradient_for_spare_advanced() {
        let pro = sailor("Pro", Skill::Advanced);
        let plain = CrewedBoat::new(Boat::new("Tern", "Owner")).with_crew(pro.clone());
        assert_eq!(Assist.gradient(&pro, &plain, &ctx(&[])), 2);

        // Sole advanced on an assisted boat is needed where it is.
        let needed = assisted_boat().with_crew(pro.clone());
        assert_eq!(Assist.gradient(&pro, &needed, &ctx(&[])), 0);
    }

    #[test]
    fn test_skill_spread_rules() {
        let novice = sailor("Nov", Skill::Novice);
        let pro = sailor("Pro", Skill::Advanced);
        let mid = sailor("Mid", Skill::Intermediate);
        let mixed = CrewedBoat::new(Boat::new("Tern", "Owner"))
            .with_crew(novice.clone())
            .with_crew(mid.clone())
            .with_crew(pro.clone());
        let c = ctx(&[]);

        assert_eq!(HighSkill.loss(&pro, &mixed, &c), 1);
        assert_eq!(HighSkill.loss(&novice, &mixed, &c), 0);
        assert_eq!(LowSkill.loss(&novice, &mixed, &c), 1);
        assert_eq!(LowSkill.loss(&mid, &mixed, &c), 0);

        let narrow = CrewedBoat::new(Boat::new("Tern", "Owner"))
            .with_crew(mid.clone())
            .with_crew(pro.clone());
        assert_eq!(HighSkill.loss(&pro, &narrow, &c), 0);
    }

    #[test]
    fn test_whitelist() {
        let picky = sailor("Picky", Skill::Novice).with_whitelisted("tern");
        let on_gull = CrewedBoat::new(Boat::new("Gull", "Owner")).with_crew(picky.clone());
        let on_tern = CrewedBoat::new(Boat::new("Tern", "Owner")).with_crew(picky.clone());
        assert_eq!(Whitelist.loss(&picky, &on_gull, &ctx(&[])), 1);
        assert_eq!(Whitelist.loss(&picky, &on_tern, &ctx(&[])), 0);
    }

    #[test]
    fn test_partner_same_boat() {
        let a = sailor("A", Skill::Novice).with_partner("b-sailor");
        let b = sailor("B", Skill::Novice).with_partner("a-sailor");
        let together = CrewedBoat::new(Boat::new("Gull", "Owner"))
            .with_crew(a.clone())
            .with_crew(b.clone());
        assert_eq!(Partner.loss(&a, &together, &ctx(&[])), 1);
        assert_eq!(Partner.loss(&b, &together, &ctx(&[])), 1);

        let apart = CrewedBoat::new(Boat::new("Gull", "Owner")).with_crew(a.clone());
        assert_eq!(Partner.loss(&a, &apart, &ctx(&[])), 0);
    }

    #[test]
    fn test_partner_one_sided() {
        let a = sailor("A", Skill::Novice).with_partner("b-sailor");
        let b = sailor("B", Skill::Novice);
        let together = CrewedBoat::new(Boat::new("Gull", "Owner"))
            .with_crew(a.clone())
            .with_crew(b.clone());
        assert_eq!(Partner.loss(&a, &together, &ctx(&[])), 1);
        assert_eq!(Partner.loss(&b, &together, &ctx(&[])), 0);
    }

    #[test]
    fn test_repeat_counts_window() {
        let crew = sailor("Rep", Skill::Novice)
            .with_history("E1", "boat-x")
            .with_history("E2", "boat-x")
            .with_history("E3", "boat-x")
            .with_history("E4", "boat-y");
        let x = CrewedBoat::new(Boat::new("Boat X", "Owner")).with_crew(crew.clone());
        let y = CrewedBoat::new(Boat::new("Boat Y", "Owner")).with_crew(crew.clone());
        let c = ctx(&["E1", "E2", "E3", "E4"]);

        assert_eq!(Repeat.loss(&crew, &x, &c), 3);
        assert_eq!(Repeat.loss(&crew, &y, &c), 1);

        // Only events inside the window count.
        assert_eq!(Repeat.loss(&crew, &x, &ctx(&["E3", "E4"])), 1);
    }

    #[test]
    fn test_repeat_gradient_counts_empty_slots() {
        let crew = sailor("New", Skill::Novice).with_history("E1", "boat-x");
        let x = CrewedBoat::new(Boat::new("Boat X", "Owner")).with_crew(crew.clone());
        assert_eq!(Repeat.gradient(&crew, &x, &ctx(&["E1", "E2", "E3"])), 3);
    }

    #[test]
    fn test_standard_rule_order() {
        let kinds: Vec<RuleKind> = standard().iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                RuleKind::Assist,
                RuleKind::Whitelist,
                RuleKind::HighSkill,
                RuleKind::LowSkill,
                RuleKind::Partner,
                RuleKind::Repeat,
            ]
        );
    }
}
