//! Violation records produced by the composition validator.
//!
//! A violation is data, not an error: the validator collects every failed
//! rule into a [`ViolationList`] so callers can render a full checklist.

use super::budget::SquadBudget;
use crate::models::{Role, RosterSlot, Unit, ROSTER_SIZE, SQUAD_COUNT, SQUAD_SIZE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    WrongSize,
    UnknownUnit,
    RoleCardinality,
    RoleMismatch,
    DuplicateInSquad,
    DuplicateAcrossTeam,
    BudgetExceeded,
    EraIncompatibleSquad,
    EraIncompatibleTeam,
}

impl ViolationKind {
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::WrongSize => "WRONG_SIZE",
            ViolationKind::UnknownUnit => "UNKNOWN_UNIT",
            ViolationKind::RoleCardinality => "ROLE_CARDINALITY",
            ViolationKind::RoleMismatch => "ROLE_MISMATCH",
            ViolationKind::DuplicateInSquad => "DUPLICATE_IN_SQUAD",
            ViolationKind::DuplicateAcrossTeam => "DUPLICATE_ACROSS_TEAM",
            ViolationKind::BudgetExceeded => "BUDGET_EXCEEDED",
            ViolationKind::EraIncompatibleSquad => "ERA_INCOMPATIBLE_SQUAD",
            ViolationKind::EraIncompatibleTeam => "ERA_INCOMPATIBLE_TEAM",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Era tags of one unit, for era diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnitEras {
    pub unit_id: String,
    pub eras: Vec<String>,
}

impl UnitEras {
    fn of(unit: &Unit) -> Self {
        Self { unit_id: unit.id.clone(), eras: unit.eras.iter().cloned().collect() }
    }
}

/// Structured payload carried by each violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViolationDetail {
    Size { expected: usize, found: usize },
    Unit { unit_id: String, position: usize },
    RoleCount { role: Role, count: usize },
    RoleMismatch { unit_id: String, position: usize, assigned: Role, native: Role },
    Duplicate { unit_id: String },
    Budget { primary_cost: u64, secondary_cost: u64, support_cost: u64, delta: u64 },
    Eras { units: Vec<UnitEras> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Zero-based squad the violation belongs to; `None` for team-wide rules.
    pub squad: Option<usize>,
    pub message: String,
    pub detail: ViolationDetail,
}

pub type ViolationList = Vec<Violation>;

fn squad_label(squad: usize) -> String {
    format!("Squad {}", squad + 1)
}

fn squad_of(position: usize) -> Option<usize> {
    (position < ROSTER_SIZE).then_some(position / SQUAD_SIZE)
}

impl Violation {
    pub(crate) fn wrong_size(found: usize) -> Self {
        Self {
            kind: ViolationKind::WrongSize,
            squad: None,
            message: format!(
                "Strike team must have exactly {ROSTER_SIZE} characters \
                 ({SQUAD_COUNT} squads of {SQUAD_SIZE} each), found {found}"
            ),
            detail: ViolationDetail::Size { expected: ROSTER_SIZE, found },
        }
    }

    pub(crate) fn unknown_unit(position: usize, unit_id: &str) -> Self {
        Self {
            kind: ViolationKind::UnknownUnit,
            squad: squad_of(position),
            message: format!("Character {unit_id} (slot {}) not found in catalog", position + 1),
            detail: ViolationDetail::Unit { unit_id: unit_id.to_string(), position },
        }
    }

    pub(crate) fn role_cardinality(squad: usize, role: Role, count: usize) -> Self {
        Self {
            kind: ViolationKind::RoleCardinality,
            squad: Some(squad),
            message: format!(
                "{} must have exactly 1 {role} character (found {count})",
                squad_label(squad)
            ),
            detail: ViolationDetail::RoleCount { role, count },
        }
    }

    pub(crate) fn role_mismatch(position: usize, slot: &RosterSlot, unit: &Unit) -> Self {
        let squad = squad_of(position);
        let prefix = squad.map(|s| format!("{}: ", squad_label(s))).unwrap_or_default();
        Self {
            kind: ViolationKind::RoleMismatch,
            squad,
            message: format!(
                "{prefix}{} is a {} but assigned as {}",
                unit.name, unit.native_role, slot.assigned_role
            ),
            detail: ViolationDetail::RoleMismatch {
                unit_id: unit.id.clone(),
                position,
                assigned: slot.assigned_role,
                native: unit.native_role,
            },
        }
    }

    pub(crate) fn duplicate_in_squad(squad: usize, unit_id: &str) -> Self {
        Self {
            kind: ViolationKind::DuplicateInSquad,
            squad: Some(squad),
            message: format!("{} cannot have duplicate characters ({unit_id})", squad_label(squad)),
            detail: ViolationDetail::Duplicate { unit_id: unit_id.to_string() },
        }
    }

    pub(crate) fn duplicate_across_team(unit_id: &str) -> Self {
        Self {
            kind: ViolationKind::DuplicateAcrossTeam,
            squad: None,
            message: format!("Strike team cannot have duplicate characters across squads ({unit_id})"),
            detail: ViolationDetail::Duplicate { unit_id: unit_id.to_string() },
        }
    }

    pub(crate) fn budget_exceeded(squad: usize, budget: &SquadBudget) -> Self {
        Self {
            kind: ViolationKind::BudgetExceeded,
            squad: Some(squad),
            message: format!(
                "{}: Secondary ({}pts) + Support ({}pts) = {}pts cannot exceed Primary ({}pts)",
                squad_label(squad),
                budget.secondary_cost,
                budget.support_cost,
                budget.spent(),
                budget.primary_cost
            ),
            detail: ViolationDetail::Budget {
                primary_cost: budget.primary_cost,
                secondary_cost: budget.secondary_cost,
                support_cost: budget.support_cost,
                delta: budget.overspend(),
            },
        }
    }

    pub(crate) fn era_incompatible_squad(squad: usize, units: &[&Unit]) -> Self {
        Self {
            kind: ViolationKind::EraIncompatibleSquad,
            squad: Some(squad),
            message: format!(
                "{}: characters share no common era ({})",
                squad_label(squad),
                describe_eras(units)
            ),
            detail: ViolationDetail::Eras { units: units.iter().map(|u| UnitEras::of(u)).collect() },
        }
    }

    pub(crate) fn era_incompatible_team(units: &[&Unit]) -> Self {
        Self {
            kind: ViolationKind::EraIncompatibleTeam,
            squad: None,
            message: format!(
                "All characters in the strike team must share at least one common era. \
                 Current eras: {}",
                describe_eras(units)
            ),
            detail: ViolationDetail::Eras { units: units.iter().map(|u| UnitEras::of(u)).collect() },
        }
    }
}

fn describe_eras(units: &[&Unit]) -> String {
    units
        .iter()
        .map(|unit| format!("{}: {}", unit.name, unit.era_label()))
        .collect::<Vec<_>>()
        .join("; ")
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Convenience queries over a violation list.
pub trait ViolationListExt {
    fn has_kind(&self, kind: ViolationKind) -> bool;
    fn count_kind(&self, kind: ViolationKind) -> usize;
    fn for_squad(&self, squad: usize) -> Vec<&Violation>;
}

impl ViolationListExt for [Violation] {
    fn has_kind(&self, kind: ViolationKind) -> bool {
        self.iter().any(|v| v.kind == kind)
    }

    fn count_kind(&self, kind: ViolationKind) -> usize {
        self.iter().filter(|v| v.kind == kind).count()
    }

    fn for_squad(&self, squad: usize) -> Vec<&Violation> {
        self.iter().filter(|v| v.squad == Some(squad)).collect()
    }
}
