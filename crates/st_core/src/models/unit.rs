use super::Role;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Catalog record for a single unit (character card).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub native_role: Role,
    /// SP: charged only when the unit fills the Primary slot
    pub primary_cost: u32,
    /// PC: charged in the Secondary and Support slots
    pub secondary_cost: u32,
    pub eras: BTreeSet<String>,
}

impl Unit {
    pub fn new<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        native_role: Role,
        primary_cost: u32,
        secondary_cost: u32,
        eras: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            native_role,
            primary_cost,
            secondary_cost,
            eras: eras.into_iter().map(Into::into).collect(),
        }
    }

    /// Cost charged when this unit occupies `role`.
    pub fn cost_as(&self, role: Role) -> u32 {
        match role {
            Role::Primary => self.primary_cost,
            Role::Secondary | Role::Support => self.secondary_cost,
        }
    }

    pub fn shares_era_with(&self, other: &Unit) -> bool {
        self.eras.intersection(&other.eras).next().is_some()
    }

    pub fn era_label(&self) -> String {
        if self.eras.is_empty() {
            "no era".to_string()
        } else {
            self.eras.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    }
}
