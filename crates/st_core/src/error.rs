use crate::builder::{BuildRejection, BuilderError, FinalizeError};
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// Any operational failure of the crate. Rule violations are not errors;
/// they only surface here wrapped in `Finalize` or `Repository`.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rejected(#[from] BuildRejection),

    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Finalize(#[from] FinalizeError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
