use super::budget::SquadBudget;
use crate::catalog::UnitLookup;
use crate::models::{Roster, RosterSlot, Unit, SQUAD_COUNT};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-squad point breakdown shown next to the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SquadSummary {
    pub squad: usize,
    pub filled: usize,
    /// Present only when the squad has exactly one resolved unit per role
    pub budget: Option<SquadBudget>,
    pub remaining: Option<i64>,
    pub within_budget: Option<bool>,
}

/// Point breakdown for both squads, complete or not.
pub fn roster_summary<L: UnitLookup + ?Sized>(roster: &Roster, lookup: &L) -> Vec<SquadSummary> {
    (0..SQUAD_COUNT)
        .map(|squad| {
            let slots = roster.squad(squad);
            let present: Vec<(&RosterSlot, &Unit)> = slots
                .iter()
                .filter_map(|slot| lookup.get_unit(&slot.unit_id).map(|unit| (slot, unit)))
                .collect();
            let budget = SquadBudget::of(&present);
            SquadSummary {
                squad,
                filled: slots.len(),
                budget,
                remaining: budget.map(|b| b.remaining()),
                within_budget: budget.map(|b| b.is_within()),
            }
        })
        .collect()
}
