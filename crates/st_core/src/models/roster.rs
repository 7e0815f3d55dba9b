use super::Role;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Units per squad.
pub const SQUAD_SIZE: usize = 3;
/// Squads per strike team.
pub const SQUAD_COUNT: usize = 2;
/// Slots in a complete strike team.
pub const ROSTER_SIZE: usize = SQUAD_SIZE * SQUAD_COUNT;

/// One picked unit and the role it was assigned.
///
/// `squad_index` and `slot_index` always mirror the slot's position in its
/// [`Roster`]; they are recomputed whenever the roster is built or reshuffled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlot {
    pub unit_id: String,
    pub assigned_role: Role,
    #[serde(default)]
    pub squad_index: usize,
    #[serde(default)]
    pub slot_index: usize,
}

impl RosterSlot {
    pub fn at(position: usize, unit_id: impl Into<String>, assigned_role: Role) -> Self {
        Self {
            unit_id: unit_id.into(),
            assigned_role,
            squad_index: position / SQUAD_SIZE,
            slot_index: position % SQUAD_SIZE,
        }
    }

    fn place(&mut self, position: usize) {
        self.squad_index = position / SQUAD_SIZE;
        self.slot_index = position % SQUAD_SIZE;
    }
}

/// Ordered picks; slots 0..3 are squad 0 and 3..6 are squad 1.
///
/// A roster may hold any number of slots so malformed input can still be
/// validated; only six slots form a legal strike team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RosterSlot>", into = "Vec<RosterSlot>")]
pub struct Roster {
    slots: Vec<RosterSlot>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from `(unit_id, role)` picks in slot order.
    pub fn from_picks<I, S>(picks: I) -> Self
    where
        I: IntoIterator<Item = (S, Role)>,
        S: Into<String>,
    {
        let slots = picks
            .into_iter()
            .enumerate()
            .map(|(position, (unit_id, role))| RosterSlot::at(position, unit_id, role))
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[RosterSlot] {
        &self.slots
    }

    pub fn get(&self, position: usize) -> Option<&RosterSlot> {
        self.slots.get(position)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= ROSTER_SIZE
    }

    pub fn contains_unit(&self, unit_id: &str) -> bool {
        self.slots.iter().any(|slot| slot.unit_id == unit_id)
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.unit_id.as_str())
    }

    /// Slots of `squad` that are present (possibly fewer than three).
    pub fn squad(&self, squad: usize) -> &[RosterSlot] {
        &self.slots[squad_range(squad, self.slots.len())]
    }

    pub(crate) fn push(&mut self, unit_id: impl Into<String>, role: Role) -> usize {
        let position = self.slots.len();
        self.slots.push(RosterSlot::at(position, unit_id, role));
        position
    }

    pub(crate) fn remove(&mut self, position: usize) -> Option<RosterSlot> {
        if position >= self.slots.len() {
            return None;
        }
        let removed = self.slots.remove(position);
        self.reindex();
        Some(removed)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    fn reindex(&mut self) {
        for (position, slot) in self.slots.iter_mut().enumerate() {
            slot.place(position);
        }
    }
}

impl From<Vec<RosterSlot>> for Roster {
    fn from(slots: Vec<RosterSlot>) -> Self {
        let mut roster = Self { slots };
        roster.reindex();
        roster
    }
}

impl From<Roster> for Vec<RosterSlot> {
    fn from(roster: Roster) -> Self {
        roster.slots
    }
}

/// Positions belonging to `squad`, clipped to `len`.
pub(crate) fn squad_range(squad: usize, len: usize) -> Range<usize> {
    let start = (squad * SQUAD_SIZE).min(len);
    let end = ((squad + 1) * SQUAD_SIZE).min(len);
    start..end
}
