use super::*;
use crate::catalog::UnitCatalog;
use crate::config::{EraRule, RuleConfig};
use crate::models::{Role, Roster, Unit};
use crate::test_support::*;
use proptest::prelude::*;
use std::collections::HashMap;

fn kinds(violations: &[Violation]) -> Vec<ViolationKind> {
    violations.iter().map(|v| v.kind).collect()
}

fn lookup_with(extra: impl IntoIterator<Item = Unit>) -> HashMap<String, Unit> {
    let mut lookup: HashMap<String, Unit> = catalog()
        .iter_sorted()
        .into_iter()
        .map(|unit| (unit.id.clone(), unit.clone()))
        .collect();
    for unit in extra {
        lookup.insert(unit.id.clone(), unit);
    }
    lookup
}

#[test]
fn test_valid_roster_has_no_violations() {
    let catalog = catalog();
    let roster = valid_roster();
    assert!(validate(&roster, &catalog).is_empty());
    assert!(is_valid(&roster, &catalog));
}

#[test]
fn test_five_or_seven_slots_is_wrong_size() {
    let catalog = catalog();
    let mut picks = valid_picks();
    picks.pop();
    let short = Roster::from_picks(picks);
    assert_eq!(kinds(&validate(&short, &catalog)), vec![ViolationKind::WrongSize]);

    let mut picks = valid_picks();
    picks.push(("wookiees", Role::Support));
    let long = Roster::from_picks(picks);
    let violations = validate(&long, &catalog);
    assert_eq!(kinds(&violations), vec![ViolationKind::WrongSize]);
    assert_eq!(violations[0].detail, ViolationDetail::Size { expected: 6, found: 7 });
}

#[test]
fn test_wrong_size_still_reports_repeated_units() {
    let catalog = catalog();
    let mut picks = valid_picks();
    picks.push(("rex", Role::Primary));
    let violations = validate(&Roster::from_picks(picks), &catalog);
    assert_eq!(
        kinds(&violations),
        vec![ViolationKind::WrongSize, ViolationKind::DuplicateAcrossTeam]
    );
}

#[test]
fn test_two_secondaries_and_no_support() {
    let catalog = catalog();
    let roster = roster_with(5, "barriss", Role::Secondary);
    let violations = validate(&roster, &catalog);

    assert_eq!(violations.count_kind(ViolationKind::RoleCardinality), 2);
    assert!(violations.iter().all(|v| v.squad == Some(1)));
    assert!(violations.iter().any(|v| v.detail
        == ViolationDetail::RoleCount { role: Role::Secondary, count: 2 }));
    assert!(violations
        .iter()
        .any(|v| v.detail == ViolationDetail::RoleCount { role: Role::Support, count: 0 }));
    // no budget without exactly one unit per role
    assert!(!violations.has_kind(ViolationKind::BudgetExceeded));
}

#[test]
fn test_same_unit_in_both_squads() {
    let catalog = catalog();

    let same_role = roster_with(4, "ahsoka", Role::Secondary);
    let violations = validate(&same_role, &catalog);
    assert_eq!(violations.count_kind(ViolationKind::DuplicateAcrossTeam), 1);
    assert!(!violations.has_kind(ViolationKind::DuplicateInSquad));

    let other_role = roster_with(4, "ahsoka", Role::Support);
    let violations = validate(&other_role, &catalog);
    assert_eq!(violations.count_kind(ViolationKind::DuplicateAcrossTeam), 1);
    assert!(violations.has_kind(ViolationKind::RoleMismatch));
}

#[test]
fn test_duplicate_inside_one_squad() {
    let catalog = catalog();
    let roster = roster_with(1, "troopers", Role::Support);
    let violations = validate(&roster, &catalog);
    assert_eq!(violations.count_kind(ViolationKind::DuplicateInSquad), 1);
    assert!(!violations.has_kind(ViolationKind::DuplicateAcrossTeam));
    assert_eq!(violations.for_squad(0).len(), violations.len());
}

#[test]
fn test_budget_boundary() {
    let medics = Unit::new("medics", "Clone Medics", Role::Support, 0, 5, [CLONE_WARS]);
    let lookup = lookup_with([medics]);

    // 5 + 5 <= 10
    assert!(validate(&roster_with(2, "medics", Role::Support), &lookup).is_empty());

    // 5 + 6 > 10
    let violations = validate(&roster_with(2, "wookiees", Role::Support), &lookup);
    assert_eq!(kinds(&violations), vec![ViolationKind::BudgetExceeded]);
    assert_eq!(violations[0].squad, Some(0));
    assert_eq!(
        violations[0].detail,
        ViolationDetail::Budget { primary_cost: 10, secondary_cost: 5, support_cost: 6, delta: 1 }
    );
    assert_eq!(
        violations[0].message,
        "Squad 1: Secondary (5pts) + Support (6pts) = 11pts cannot exceed Primary (10pts)"
    );
}

#[test]
fn test_unit_from_another_era() {
    let catalog = catalog();
    let roster = roster_with(2, "rebels", Role::Support);
    let violations = validate(&roster, &catalog);
    assert_eq!(
        kinds(&violations),
        vec![ViolationKind::EraIncompatibleSquad, ViolationKind::EraIncompatibleTeam]
    );
    assert_eq!(violations[0].squad, Some(0));
    assert_eq!(violations[1].squad, None);
}

#[test]
fn test_unknown_unit_is_reported_not_thrown() {
    let catalog = catalog();
    let roster = roster_with(1, "ghost", Role::Secondary);
    let violations = validate(&roster, &catalog);

    assert_eq!(
        kinds(&violations),
        vec![ViolationKind::UnknownUnit, ViolationKind::RoleCardinality]
    );
    assert_eq!(
        violations[0].detail,
        ViolationDetail::Unit { unit_id: "ghost".to_string(), position: 1 }
    );
    assert_eq!(violations[0].squad, Some(0));
    assert!(!violations.has_kind(ViolationKind::BudgetExceeded));
    assert!(!violations.has_kind(ViolationKind::EraIncompatibleSquad));
}

#[test]
fn test_role_mismatch_names_the_slot() {
    let catalog = catalog();
    let roster = roster_with(1, "wookiees", Role::Secondary);
    let violations = validate(&roster, &catalog);
    assert_eq!(kinds(&violations), vec![ViolationKind::RoleMismatch]);
    assert_eq!(violations[0].message, "Squad 1: Wookiee Warriors is a Support but assigned as Secondary");
}

#[test]
fn test_squad_era_intersection_with_a_bridging_unit() {
    let a = Unit::new("a", "A", Role::Primary, 10, 0, [CLONE_WARS]);
    let b = Unit::new("b", "B", Role::Secondary, 0, 4, [CLONE_WARS, REBELLION]);
    let c = Unit::new("c", "C", Role::Support, 0, 4, [CLONE_WARS]);
    let mut picks = valid_picks();
    picks[0] = ("a", Role::Primary);
    picks[1] = ("b", Role::Secondary);
    picks[2] = ("c", Role::Support);
    let roster = Roster::from_picks(picks);

    let lookup = lookup_with([a.clone(), b.clone(), c]);
    assert!(validate(&roster, &lookup).is_empty());

    let moved = Unit::new("c", "C", Role::Support, 0, 4, [REBELLION]);
    let lookup = lookup_with([a, b, moved]);
    let violations = validate(&roster, &lookup);
    assert!(violations.has_kind(ViolationKind::EraIncompatibleSquad));
    assert_eq!(violations.for_squad(0).len(), 1);
}

#[test]
fn test_pairwise_rule_only_relaxes_squad_check() {
    let catalog = catalog();
    let roster = Roster::from_picks([
        ("obiwan", Role::Primary),
        ("ahsoka", Role::Secondary),
        ("rebels", Role::Support),
        ("rex", Role::Primary),
        ("cody", Role::Secondary),
        ("arc", Role::Support),
    ]);

    let strict = validate(&roster, &catalog);
    assert_eq!(
        kinds(&strict),
        vec![ViolationKind::EraIncompatibleSquad, ViolationKind::EraIncompatibleTeam]
    );

    let legacy = CompositionValidator::new(RuleConfig { era_rule: EraRule::PairwiseOverlap });
    let relaxed = legacy.validate(&roster, &catalog);
    assert_eq!(kinds(&relaxed), vec![ViolationKind::EraIncompatibleTeam]);
}

#[test]
fn test_violations_ordered_by_squad() {
    let catalog = catalog();
    let mut picks = valid_picks();
    picks[4] = ("ghost", Role::Secondary);
    picks[1] = ("wookiees", Role::Secondary);
    let violations = validate(&Roster::from_picks(picks), &catalog);
    assert_eq!(
        kinds(&violations),
        vec![
            ViolationKind::UnknownUnit,
            ViolationKind::RoleMismatch,
            ViolationKind::RoleCardinality,
        ]
    );
    assert_eq!(violations[1].squad, Some(0));
    assert_eq!(violations[2].squad, Some(1));
}

#[test]
fn test_partial_roster_ignores_missing_slots() {
    let catalog = catalog();
    assert!(validate_partial(&Roster::new(), &catalog).is_empty());
    assert_eq!(kinds(&validate(&Roster::new(), &catalog)), vec![ViolationKind::WrongSize]);

    let four = Roster::from_picks(valid_picks().into_iter().take(4));
    assert!(validate_partial(&four, &catalog).is_empty());
}

#[test]
fn test_partial_roster_rejects_extra_slots() {
    let catalog = catalog();
    let mut picks = valid_picks();
    picks.push(("wookiees", Role::Support));
    let violations = validate_partial(&Roster::from_picks(picks), &catalog);
    assert_eq!(kinds(&violations), vec![ViolationKind::WrongSize]);
    assert!(!is_valid(&Roster::from_picks(valid_picks().into_iter().take(5)), &catalog));
}

#[test]
fn test_partial_roster_still_flags_conflicts() {
    let catalog = catalog();
    let roster = Roster::from_picks([("rex", Role::Primary), ("rex", Role::Primary)]);
    let violations = validate_partial(&roster, &catalog);
    assert_eq!(
        kinds(&violations),
        vec![ViolationKind::RoleCardinality, ViolationKind::DuplicateInSquad]
    );

    let over = Roster::from_picks([
        ("rex", Role::Primary),
        ("ahsoka", Role::Secondary),
        ("wookiees", Role::Support),
    ]);
    assert_eq!(
        kinds(&validate_partial(&over, &catalog)),
        vec![ViolationKind::BudgetExceeded]
    );
}

#[test]
fn test_summary_reports_remaining_points() {
    let catalog = catalog();
    let summary = roster_summary(&valid_roster(), &catalog);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].remaining, Some(1));
    assert_eq!(summary[1].remaining, Some(0));
    assert_eq!(summary[1].within_budget, Some(true));

    let partial = Roster::from_picks(valid_picks().into_iter().take(2));
    let summary = roster_summary(&partial, &catalog);
    assert_eq!(summary[0].filled, 2);
    assert!(summary[0].budget.is_none());
    assert_eq!(summary[1].filled, 0);
}

fn catalog_ids() -> Vec<&'static str> {
    vec!["rex", "ahsoka", "troopers", "obiwan", "cody", "arc", "wookiees", "rebels", "ghost"]
}

fn roster_strategy() -> impl Strategy<Value = Vec<(&'static str, Role)>> {
    prop::collection::vec(
        (prop::sample::select(catalog_ids()), prop::sample::select(Role::ALL.to_vec())),
        0..10,
    )
}

proptest! {
    #[test]
    fn test_validation_is_total_and_deterministic(picks in roster_strategy()) {
        let catalog: UnitCatalog = catalog();
        let roster = Roster::from_picks(picks);
        let first = validate(&roster, &catalog);
        let second = validate(&roster, &catalog);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.has_kind(ViolationKind::WrongSize), roster.len() != 6);
        prop_assert_eq!(is_valid(&roster, &catalog), first.is_empty());
    }

    #[test]
    fn test_partial_reports_size_only_when_over_full(picks in roster_strategy()) {
        let catalog = catalog();
        let roster = Roster::from_picks(picks);
        let violations = validate_partial(&roster, &catalog);
        prop_assert_eq!(violations.has_kind(ViolationKind::WrongSize), roster.len() > 6);
    }
}
