use super::{CollectionStatus, Roster};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TeamId = Uuid;

/// Which shelf a strike team lives on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamType {
    /// Built from models the user owns
    #[default]
    MyTeams,
    /// Built from wishlisted or favourite models
    DreamTeams,
}

impl TeamType {
    /// Whether a unit with this collection status may be picked for the team type.
    pub fn allows(&self, status: CollectionStatus) -> bool {
        match self {
            TeamType::MyTeams => matches!(status, CollectionStatus::Owned | CollectionStatus::Painted),
            TeamType::DreamTeams => {
                matches!(status, CollectionStatus::Wishlist | CollectionStatus::Favorite)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadNames {
    pub first: String,
    pub second: String,
}

impl Default for SquadNames {
    fn default() -> Self {
        Self { first: "Squad 1".to_string(), second: "Squad 2".to_string() }
    }
}

impl SquadNames {
    pub fn get(&self, squad: usize) -> &str {
        if squad == 0 {
            &self.first
        } else {
            &self.second
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

/// Partial stats overwrite; `None` leaves the counter unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsUpdate {
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub draws: Option<u32>,
}

impl StatsUpdate {
    pub fn is_empty(&self) -> bool {
        self.wins.is_none() && self.losses.is_none() && self.draws.is_none()
    }

    pub fn apply(&self, stats: &mut TeamStats) {
        if let Some(wins) = self.wins {
            stats.wins = wins;
        }
        if let Some(losses) = self.losses {
            stats.losses = losses;
        }
        if let Some(draws) = self.draws {
            stats.draws = draws;
        }
    }
}

/// Creation-time fields that travel with a roster into the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMetadata {
    pub owner_id: String,
    pub team_type: TeamType,
    pub description: Option<String>,
    #[serde(default)]
    pub squad_names: SquadNames,
}

impl TeamMetadata {
    pub fn new(owner_id: impl Into<String>, team_type: TeamType) -> Self {
        Self { owner_id: owner_id.into(), team_type, ..Self::default() }
    }
}

/// A validated, persisted strike team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeTeam {
    pub id: TeamId,
    pub owner_id: String,
    pub name: String,
    pub team_type: TeamType,
    pub description: Option<String>,
    pub squad_names: SquadNames,
    pub roster: Roster,
    pub is_published: bool,
    pub stats: TeamStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StrikeTeam {
    pub(crate) fn new(name: String, roster: Roster, metadata: TeamMetadata) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: metadata.owner_id,
            name,
            team_type: metadata.team_type,
            description: metadata.description,
            squad_names: metadata.squad_names,
            roster,
            is_published: false,
            stats: TeamStats::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
