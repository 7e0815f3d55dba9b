use super::{clean_name, RepositoryError, TeamRepository};
use crate::catalog::UnitLookup;
use crate::config::RuleConfig;
use crate::models::{Roster, StatsUpdate, StrikeTeam, TeamId, TeamMetadata, TeamStats, TeamType};
use crate::validation::CompositionValidator;
use rustc_hash::FxHashMap;
use tracing::info;

/// Process-local repository backed by the unit lookup it validates against.
#[derive(Debug)]
pub struct InMemoryTeamRepository<L: UnitLookup> {
    lookup: L,
    validator: CompositionValidator,
    teams: FxHashMap<TeamId, StrikeTeam>,
    /// Creation order, oldest first
    order: Vec<TeamId>,
}

impl<L: UnitLookup> InMemoryTeamRepository<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_rules(lookup, RuleConfig::default())
    }

    pub fn with_rules(lookup: L, rules: RuleConfig) -> Self {
        Self {
            lookup,
            validator: CompositionValidator::new(rules),
            teams: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    fn check(&self, roster: &Roster) -> Result<(), RepositoryError> {
        let violations = self.validator.validate(roster, &self.lookup);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(RepositoryError::InvalidRoster(violations))
        }
    }

    fn team_mut(&mut self, id: TeamId) -> Result<&mut StrikeTeam, RepositoryError> {
        self.teams.get_mut(&id).ok_or(RepositoryError::NotFound(id))
    }
}

impl<L: UnitLookup> TeamRepository for InMemoryTeamRepository<L> {
    fn create_team(
        &mut self,
        name: &str,
        roster: Roster,
        metadata: TeamMetadata,
    ) -> Result<TeamId, RepositoryError> {
        let name = clean_name(name)?;
        self.check(&roster)?;

        let team = StrikeTeam::new(name, roster, metadata);
        let id = team.id;
        info!("Created strike team '{}' ({}) for {}", team.name, id, team.owner_id);
        self.teams.insert(id, team);
        self.order.push(id);
        Ok(id)
    }

    fn update_team(&mut self, id: TeamId, roster: Roster) -> Result<(), RepositoryError> {
        if !self.teams.contains_key(&id) {
            return Err(RepositoryError::NotFound(id));
        }
        self.check(&roster)?;

        let team = self.team_mut(id)?;
        team.roster = roster;
        team.touch();
        info!("Updated roster of strike team {}", id);
        Ok(())
    }

    fn get_team(&self, id: TeamId) -> Result<&StrikeTeam, RepositoryError> {
        self.teams.get(&id).ok_or(RepositoryError::NotFound(id))
    }

    fn list_teams(&self, owner_id: &str, team_type: Option<TeamType>) -> Vec<&StrikeTeam> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.teams.get(id))
            .filter(|team| team.owner_id == owner_id)
            .filter(|team| team_type.map_or(true, |t| team.team_type == t))
            .collect()
    }

    fn rename_team(
        &mut self,
        id: TeamId,
        name: &str,
        description: Option<String>,
    ) -> Result<(), RepositoryError> {
        let name = clean_name(name)?;
        let team = self.team_mut(id)?;
        team.name = name;
        team.description = description;
        team.touch();
        Ok(())
    }

    fn delete_team(&mut self, id: TeamId) -> Result<StrikeTeam, RepositoryError> {
        let team = self.teams.remove(&id).ok_or(RepositoryError::NotFound(id))?;
        self.order.retain(|other| *other != id);
        info!("Deleted strike team {}", id);
        Ok(team)
    }

    fn update_stats(&mut self, id: TeamId, update: StatsUpdate) -> Result<TeamStats, RepositoryError> {
        if update.is_empty() {
            return Err(RepositoryError::EmptyStatsUpdate);
        }
        let team = self.team_mut(id)?;
        update.apply(&mut team.stats);
        team.touch();
        Ok(team.stats)
    }

    fn set_published(&mut self, id: TeamId, published: bool) -> Result<(), RepositoryError> {
        let team = self.team_mut(id)?;
        team.is_published = published;
        team.touch();
        Ok(())
    }
}
