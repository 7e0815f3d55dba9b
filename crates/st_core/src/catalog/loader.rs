use super::{CatalogError, RawCharacter, UnitCatalog};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Catalog document: either a bare list or `{ "items": [...] }` as served by
/// the characters endpoint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<RawCharacter>),
    Wrapped {
        #[serde(alias = "characters")]
        items: Vec<RawCharacter>,
    },
}

impl CatalogDocument {
    fn into_records(self) -> Vec<RawCharacter> {
        match self {
            CatalogDocument::List(items) => items,
            CatalogDocument::Wrapped { items } => items,
        }
    }
}

/// Catalog loading statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub total_records: usize,
    pub loaded: usize,
    /// Later records replaced earlier ones with the same id
    pub duplicates: usize,
    /// Human-readable reasons for each rejected record
    pub rejected: Vec<String>,
}

impl LoadStats {
    pub fn skipped(&self) -> usize {
        self.rejected.len()
    }
}

#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub catalog: UnitCatalog,
    pub stats: LoadStats,
}

impl UnitCatalog {
    /// Normalize raw records, skipping (and recording) the ones that cannot
    /// be turned into a unit.
    pub fn from_raw(records: Vec<RawCharacter>) -> CatalogLoad {
        let mut catalog = UnitCatalog::new();
        let mut stats = LoadStats { total_records: records.len(), ..LoadStats::default() };

        for (index, record) in records.into_iter().enumerate() {
            match record.into_unit(index) {
                Ok(unit) => {
                    if catalog.insert(unit).is_some() {
                        stats.duplicates += 1;
                    }
                }
                Err(err) => {
                    warn!("Skipping catalog record: {}", err);
                    stats.rejected.push(err.to_string());
                }
            }
        }

        stats.loaded = catalog.len();
        debug!(
            "Catalog normalized: {} units ({} rejected, {} duplicates)",
            stats.loaded,
            stats.skipped(),
            stats.duplicates
        );
        CatalogLoad { catalog, stats }
    }

    pub fn from_json_str(json: &str) -> Result<CatalogLoad, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Ok(Self::from_raw(document.into_records()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<CatalogLoad, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(yaml)?;
        Ok(Self::from_raw(document.into_records()))
    }

    /// Load a catalog file; `.yaml`/`.yml` is parsed as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<CatalogLoad, CatalogError> {
        let content = fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.display().to_string(), source })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }
}
