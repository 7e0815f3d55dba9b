use super::TeamBuilder;
use crate::catalog::UnitCatalog;
use crate::models::{Collection, Role, TeamType, Unit};
use serde::{Deserialize, Serialize};

/// Optional narrowing of the picker list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFilter {
    pub era: Option<String>,
    pub role: Option<Role>,
    /// Case-insensitive substring of the unit name
    pub search: Option<String>,
}

impl CandidateFilter {
    fn matches(&self, unit: &Unit) -> bool {
        if let Some(era) = &self.era {
            if !unit.eras.contains(era) {
                return false;
            }
        }
        if let Some(role) = self.role {
            if unit.native_role != role {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                unit.name.to_lowercase().contains(&term.to_lowercase())
            }
            _ => true,
        }
    }
}

impl TeamBuilder {
    /// Units that could be added right now, sorted by name.
    ///
    /// A candidate is not yet selected, its native role is still open in the
    /// current squad, and its collection status suits `team_type`.
    pub fn candidates<'a>(
        &self,
        catalog: &'a UnitCatalog,
        collection: &Collection,
        team_type: TeamType,
        filter: &CandidateFilter,
    ) -> Vec<&'a Unit> {
        let open = self.open_roles();
        let mut units: Vec<&Unit> = catalog
            .iter_sorted()
            .into_iter()
            .filter(|unit| open.contains(&unit.native_role))
            .filter(|unit| !self.roster().contains_unit(&unit.id))
            .filter(|unit| collection.allows(team_type, &unit.id))
            .filter(|unit| filter.matches(unit))
            .collect();
        units.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        units
    }
}
