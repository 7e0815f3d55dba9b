//! Strike-team persistence.
//!
//! Every implementation re-validates rosters itself; a roster that reaches
//! the repository without going through [`crate::builder::TeamBuilder::finalize`]
//! is still rejected.

pub mod memory;

pub use memory::InMemoryTeamRepository;

use crate::models::{Roster, StatsUpdate, StrikeTeam, TeamId, TeamMetadata, TeamStats, TeamType};
use crate::validation::ViolationList;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Team name is required")]
    EmptyName,

    #[error("Strike team not found: {0}")]
    NotFound(TeamId),

    #[error("Invalid strike team composition: {} violation(s)", .0.len())]
    InvalidRoster(ViolationList),

    #[error("At least one stat (wins, losses, or draws) is required")]
    EmptyStatsUpdate,
}

pub trait TeamRepository {
    fn create_team(
        &mut self,
        name: &str,
        roster: Roster,
        metadata: TeamMetadata,
    ) -> Result<TeamId, RepositoryError>;

    fn update_team(&mut self, id: TeamId, roster: Roster) -> Result<(), RepositoryError>;

    fn get_team(&self, id: TeamId) -> Result<&StrikeTeam, RepositoryError>;

    /// Teams of `owner_id`, newest first, optionally of one type only.
    fn list_teams(&self, owner_id: &str, team_type: Option<TeamType>) -> Vec<&StrikeTeam>;

    fn rename_team(
        &mut self,
        id: TeamId,
        name: &str,
        description: Option<String>,
    ) -> Result<(), RepositoryError>;

    fn delete_team(&mut self, id: TeamId) -> Result<StrikeTeam, RepositoryError>;

    fn update_stats(&mut self, id: TeamId, update: StatsUpdate) -> Result<TeamStats, RepositoryError>;

    fn set_published(&mut self, id: TeamId, published: bool) -> Result<(), RepositoryError>;
}

/// Trimmed team name, or `EmptyName`.
pub(crate) fn clean_name(name: &str) -> Result<String, RepositoryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepositoryError::EmptyName);
    }
    Ok(name.to_string())
}
