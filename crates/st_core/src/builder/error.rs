use crate::models::Role;
use crate::validation::ViolationList;
use thiserror::Error;

/// A pick the builder refused; the roster is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildRejection {
    #[error("{unit_id} is already in this strike team")]
    AlreadySelected { unit_id: String },

    #[error("Squad {} already has a {role} character", .squad + 1)]
    RoleTaken { squad: usize, role: Role },

    #[error("Strike team is full")]
    RosterFull,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    #[error("Slot index out of range: {index} (roster has {len} slots)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinalizeError {
    #[error("Strike team is incomplete: {filled} of 6 slots filled")]
    Incomplete { filled: usize },

    #[error("Strike team has {} rule violation(s)", .0.len())]
    Invalid(ViolationList),
}

impl FinalizeError {
    pub fn violations(&self) -> &[crate::validation::Violation] {
        match self {
            FinalizeError::Incomplete { .. } => &[],
            FinalizeError::Invalid(violations) => violations,
        }
    }
}
