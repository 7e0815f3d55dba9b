//! Character catalog: read-only unit lookup used by validation.
//!
//! Raw character records (as served by the collection app) are normalized at
//! this boundary into strongly-typed [`Unit`]s; nothing downstream ever sees a
//! missing role or a non-numeric cost.

pub mod error;
pub mod loader;
pub mod raw;

pub use error::CatalogError;
pub use loader::{CatalogLoad, LoadStats};
pub use raw::{EraField, RawCharacter};

use crate::models::Unit;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::BuildHasher;

/// Lookup of units by id.
pub trait UnitLookup {
    fn get_unit(&self, id: &str) -> Option<&Unit>;

    /// Batch lookup; unknown ids are simply absent from the result.
    fn get_units(&self, ids: &[&str]) -> HashMap<String, Unit> {
        ids.iter()
            .filter_map(|id| self.get_unit(id))
            .map(|unit| (unit.id.clone(), unit.clone()))
            .collect()
    }
}

impl<S: BuildHasher> UnitLookup for HashMap<String, Unit, S> {
    fn get_unit(&self, id: &str) -> Option<&Unit> {
        self.get(id)
    }
}

impl UnitLookup for BTreeMap<String, Unit> {
    fn get_unit(&self, id: &str) -> Option<&Unit> {
        self.get(id)
    }
}

/// In-memory unit index keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitCatalog {
    units: FxHashMap<String, Unit>,
}

impl UnitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units<I: IntoIterator<Item = Unit>>(units: I) -> Self {
        let mut catalog = Self::new();
        for unit in units {
            catalog.insert(unit);
        }
        catalog
    }

    /// Insert or replace; returns the replaced unit.
    pub fn insert(&mut self, unit: Unit) -> Option<Unit> {
        self.units.insert(unit.id.clone(), unit)
    }

    pub fn get(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All units sorted by id.
    pub fn iter_sorted(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.units.values().collect();
        units.sort_by(|a, b| a.id.cmp(&b.id));
        units
    }

    /// Every era tag used by any unit, sorted.
    pub fn all_eras(&self) -> Vec<String> {
        self.units
            .values()
            .flat_map(|unit| unit.eras.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl UnitLookup for UnitCatalog {
    fn get_unit(&self, id: &str) -> Option<&Unit> {
        self.get(id)
    }
}
