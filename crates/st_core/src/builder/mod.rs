//! Interactive strike-team building.

pub mod candidates;
pub mod error;
pub mod team_builder;

pub use candidates::CandidateFilter;
pub use error::{BuildRejection, BuilderError, FinalizeError};
pub use team_builder::{BuilderState, TeamBuilder};
