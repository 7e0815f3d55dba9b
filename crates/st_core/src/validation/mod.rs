//! Strike-team composition validation.

pub mod budget;
pub mod eras;
pub mod summary;
pub mod validator;
pub mod violation;

#[cfg(test)]
mod tests;

pub use budget::SquadBudget;
pub use summary::{roster_summary, SquadSummary};
pub use validator::{is_valid, validate, validate_partial, CompositionValidator};
pub use violation::{UnitEras, Violation, ViolationDetail, ViolationKind, ViolationList, ViolationListExt};
