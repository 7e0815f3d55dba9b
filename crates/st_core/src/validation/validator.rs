use super::budget::SquadBudget;
use super::eras;
use super::violation::{Violation, ViolationList};
use crate::catalog::UnitLookup;
use crate::config::RuleConfig;
use crate::models::roster::squad_range;
use crate::models::{Role, Roster, RosterSlot, Unit, ROSTER_SIZE, SQUAD_COUNT};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Saved or about-to-be-saved roster: every rule applies.
    Full,
    /// Roster still being picked: missing slots are not violations.
    Partial,
}

/// Stateless strike-team rule engine.
///
/// Every applicable rule is evaluated and all failures are returned together,
/// ordered squad 0 before squad 1 and by slot within a squad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositionValidator {
    rules: RuleConfig,
}

impl CompositionValidator {
    pub fn new(rules: RuleConfig) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Check a roster that claims to be a complete strike team.
    pub fn validate<L: UnitLookup + ?Sized>(&self, roster: &Roster, lookup: &L) -> ViolationList {
        self.run(roster, lookup, Mode::Full)
    }

    /// Check an in-progress roster; absent slots are not reported, extra ones are.
    pub fn validate_partial<L: UnitLookup + ?Sized>(
        &self,
        roster: &Roster,
        lookup: &L,
    ) -> ViolationList {
        self.run(roster, lookup, Mode::Partial)
    }

    pub fn is_valid<L: UnitLookup + ?Sized>(&self, roster: &Roster, lookup: &L) -> bool {
        self.validate(roster, lookup).is_empty()
    }

    fn run<L: UnitLookup + ?Sized>(&self, roster: &Roster, lookup: &L, mode: Mode) -> ViolationList {
        let slots = roster.slots();
        let mut violations = Vec::new();

        let shaped = match mode {
            Mode::Full => slots.len() == ROSTER_SIZE,
            Mode::Partial => slots.len() <= ROSTER_SIZE,
        };
        // Extra slots can never become legal, so partial mode reports them too.
        if !shaped {
            violations.push(Violation::wrong_size(slots.len()));
        }

        let resolved: Vec<Option<&Unit>> = slots
            .iter()
            .enumerate()
            .map(|(position, slot)| {
                let unit = lookup.get_unit(&slot.unit_id);
                if unit.is_none() {
                    violations.push(Violation::unknown_unit(position, &slot.unit_id));
                }
                unit
            })
            .collect();

        if shaped {
            for squad in 0..SQUAD_COUNT {
                let range = squad_range(squad, slots.len());
                if range.is_empty() {
                    continue;
                }
                self.check_squad(
                    squad,
                    range.start,
                    &slots[range.clone()],
                    &resolved[range],
                    mode,
                    &mut violations,
                );
            }
            check_cross_squad_duplicates(roster, &mut violations);
        } else {
            // Malformed roster: only the checks that do not depend on squad shape.
            for (position, (slot, unit)) in slots.iter().zip(&resolved).enumerate() {
                if let Some(unit) = unit {
                    if slot.assigned_role != unit.native_role {
                        violations.push(Violation::role_mismatch(position, slot, unit));
                    }
                }
            }
            for unit_id in repeated_ids(slots.iter()) {
                violations.push(Violation::duplicate_across_team(unit_id));
            }
        }

        let team: Vec<&Unit> = resolved.iter().flatten().copied().collect();
        if team.len() >= 2 && eras::common_eras(&team).is_empty() {
            violations.push(Violation::era_incompatible_team(&team));
        }

        debug!(
            "Validated roster of {} slots ({:?}): {} violation(s)",
            slots.len(),
            mode,
            violations.len()
        );
        violations
    }

    fn check_squad(
        &self,
        squad: usize,
        start: usize,
        slots: &[RosterSlot],
        resolved: &[Option<&Unit>],
        mode: Mode,
        violations: &mut ViolationList,
    ) {
        let present: Vec<(&RosterSlot, &Unit)> = slots
            .iter()
            .zip(resolved)
            .filter_map(|(slot, unit)| unit.map(|unit| (slot, unit)))
            .collect();

        for role in Role::ALL {
            let count = present.iter().filter(|(slot, _)| slot.assigned_role == role).count();
            let flagged = match mode {
                Mode::Full => count != 1,
                Mode::Partial => count > 1,
            };
            if flagged {
                violations.push(Violation::role_cardinality(squad, role, count));
            }
        }

        for (offset, (slot, unit)) in slots.iter().zip(resolved).enumerate() {
            if let Some(unit) = unit {
                if slot.assigned_role != unit.native_role {
                    violations.push(Violation::role_mismatch(start + offset, slot, unit));
                }
            }
        }

        for unit_id in repeated_ids(slots.iter()) {
            violations.push(Violation::duplicate_in_squad(squad, unit_id));
        }

        if let Some(budget) = SquadBudget::of(&present) {
            if !budget.is_within() {
                violations.push(Violation::budget_exceeded(squad, &budget));
            }
        }

        let units: Vec<&Unit> = present.iter().map(|(_, unit)| *unit).collect();
        if units.len() >= 2 && !eras::compatible(&units, self.rules.era_rule) {
            violations.push(Violation::era_incompatible_squad(squad, &units));
        }
    }
}

/// Ids occurring more than once, each reported once, in order of first repeat.
fn repeated_ids<'a>(slots: impl Iterator<Item = &'a RosterSlot>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut repeated = Vec::new();
    for slot in slots {
        let id = slot.unit_id.as_str();
        if !seen.insert(id) && !repeated.contains(&id) {
            repeated.push(id);
        }
    }
    repeated
}

fn check_cross_squad_duplicates(roster: &Roster, violations: &mut ViolationList) {
    let second: HashSet<&str> = roster.squad(1).iter().map(|slot| slot.unit_id.as_str()).collect();
    let mut reported = HashSet::new();
    for slot in roster.squad(0) {
        let id = slot.unit_id.as_str();
        if second.contains(id) && reported.insert(id) {
            violations.push(Violation::duplicate_across_team(id));
        }
    }
}

/// Validate with the default rules.
pub fn validate<L: UnitLookup + ?Sized>(roster: &Roster, lookup: &L) -> ViolationList {
    CompositionValidator::default().validate(roster, lookup)
}

/// `true` when [`validate`] reports nothing.
pub fn is_valid<L: UnitLookup + ?Sized>(roster: &Roster, lookup: &L) -> bool {
    CompositionValidator::default().is_valid(roster, lookup)
}

/// Live-feedback validation with the default rules.
pub fn validate_partial<L: UnitLookup + ?Sized>(roster: &Roster, lookup: &L) -> ViolationList {
    CompositionValidator::default().validate_partial(roster, lookup)
}
