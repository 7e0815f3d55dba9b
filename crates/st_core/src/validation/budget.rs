use crate::models::{Role, RosterSlot, Unit};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Squad point budget: Secondary PC + Support PC must not exceed Primary SP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SquadBudget {
    pub primary_cost: u64,
    pub secondary_cost: u64,
    pub support_cost: u64,
}

impl SquadBudget {
    /// Budget of a squad, if it holds exactly one resolved unit per role.
    pub fn of(present: &[(&RosterSlot, &Unit)]) -> Option<Self> {
        let primary = only(present, Role::Primary)?;
        let secondary = only(present, Role::Secondary)?;
        let support = only(present, Role::Support)?;

        Some(Self {
            primary_cost: u64::from(primary.cost_as(Role::Primary)),
            secondary_cost: u64::from(secondary.cost_as(Role::Secondary)),
            support_cost: u64::from(support.cost_as(Role::Support)),
        })
    }

    pub fn spent(&self) -> u64 {
        self.secondary_cost + self.support_cost
    }

    /// Ties are allowed.
    pub fn is_within(&self) -> bool {
        self.spent() <= self.primary_cost
    }

    pub fn overspend(&self) -> u64 {
        self.spent().saturating_sub(self.primary_cost)
    }

    /// Points left for the Secondary and Support slots (negative when over).
    pub fn remaining(&self) -> i64 {
        self.primary_cost as i64 - self.spent() as i64
    }
}

fn only<'a>(present: &[(&RosterSlot, &'a Unit)], role: Role) -> Option<&'a Unit> {
    let mut matches = present.iter().filter(|(slot, _)| slot.assigned_role == role);
    let (_, unit) = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(*unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(primary: u64, secondary: u64, support: u64) -> SquadBudget {
        SquadBudget { primary_cost: primary, secondary_cost: secondary, support_cost: support }
    }

    #[test]
    fn test_tie_is_within_budget() {
        let b = budget(10, 5, 5);
        assert!(b.is_within());
        assert_eq!(b.overspend(), 0);
        assert_eq!(b.remaining(), 0);
    }

    #[test]
    fn test_overspend_delta() {
        let b = budget(10, 5, 6);
        assert!(!b.is_within());
        assert_eq!(b.overspend(), 1);
        assert_eq!(b.remaining(), -1);
    }

    #[test]
    fn test_requires_one_of_each_role() {
        let p = Unit::new("p", "P", Role::Primary, 10, 2, ["Clone Wars"]);
        let s = Unit::new("s", "S", Role::Secondary, 0, 5, ["Clone Wars"]);
        let slots = [
            RosterSlot::at(0, "p", Role::Primary),
            RosterSlot::at(1, "s", Role::Secondary),
            RosterSlot::at(2, "s", Role::Secondary),
        ];
        let present = [(&slots[0], &p), (&slots[1], &s), (&slots[2], &s)];
        assert!(SquadBudget::of(&present).is_none());

        let full = [(&slots[0], &p), (&slots[1], &s)];
        assert!(SquadBudget::of(&full).is_none());
    }
}
