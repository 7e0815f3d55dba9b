use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("character record #{index} has no id")]
    MissingId { index: usize },

    #[error("character '{id}' has no role")]
    MissingRole { id: String },

    #[error("character '{id}' has unknown role '{value}'")]
    UnknownRole { id: String, value: String },

    #[error("character '{id}' has invalid {field}: {value}")]
    InvalidCost { id: String, field: &'static str, value: String },

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CatalogError {
    /// Record-level errors skip one character; the rest abort the whole load.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            CatalogError::MissingId { .. }
                | CatalogError::MissingRole { .. }
                | CatalogError::UnknownRole { .. }
                | CatalogError::InvalidCost { .. }
        )
    }
}
