pub mod collection;
pub mod role;
pub mod roster;
pub mod team;
pub mod unit;

pub use collection::{Collection, CollectionStatus};
pub use role::Role;
pub use roster::{Roster, RosterSlot, ROSTER_SIZE, SQUAD_COUNT, SQUAD_SIZE};
pub use team::{SquadNames, StatsUpdate, StrikeTeam, TeamId, TeamMetadata, TeamStats, TeamType};
pub use unit::Unit;
