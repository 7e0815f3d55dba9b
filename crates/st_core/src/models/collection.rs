use super::TeamType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionStatus {
    Owned,
    Painted,
    Wishlist,
    Sold,
    Favorite,
}

/// A user's collection: unit id -> status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    entries: FxHashMap<String, CollectionStatus>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, unit_id: impl Into<String>, status: CollectionStatus) {
        self.entries.insert(unit_id.into(), status);
    }

    pub fn remove(&mut self, unit_id: &str) -> Option<CollectionStatus> {
        self.entries.remove(unit_id)
    }

    pub fn status(&self, unit_id: &str) -> Option<CollectionStatus> {
        self.entries.get(unit_id).copied()
    }

    /// Units outside the collection are never available.
    pub fn allows(&self, team_type: TeamType, unit_id: &str) -> bool {
        self.status(unit_id).is_some_and(|status| team_type.allows(status))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, CollectionStatus)> for Collection {
    fn from_iter<I: IntoIterator<Item = (S, CollectionStatus)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(id, status)| (id.into(), status)).collect() }
    }
}
