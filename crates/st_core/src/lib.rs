//! # st_core - Strike Team Composition Rules
//!
//! Validates two-squad strike teams for the tabletop skirmish game and keeps
//! saved teams consistent with those rules.
//!
//! ## Features
//! - One stateless validator returning every violated rule as data
//! - Incremental team builder with live feedback and a finalize gate
//! - Repository that re-validates every roster it stores
//! - Character catalog normalized from loosely-typed JSON/YAML records
//! - JSON API for hosts that only speak JSON

pub mod api;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{validate_roster_json, RosterValidationRequest, RosterValidationResponse};
pub use builder::{BuildRejection, BuilderError, BuilderState, FinalizeError, TeamBuilder};
pub use catalog::{CatalogError, UnitCatalog, UnitLookup};
pub use config::{EraRule, RuleConfig};
pub use error::{CoreError, Result};
pub use models::{Role, Roster, RosterSlot, StrikeTeam, TeamId, TeamMetadata, Unit};
pub use repository::{InMemoryTeamRepository, RepositoryError, TeamRepository};
pub use validation::{
    is_valid, validate, validate_partial, CompositionValidator, Violation, ViolationKind,
    ViolationList,
};
