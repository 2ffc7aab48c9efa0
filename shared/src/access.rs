//! Access-level projection and persistence

use std::collections::HashMap;

use crate::grouping::BreederGroups;
use crate::models::{AccessLevel, PRESTOMECH_HEINZ, WALLER_HEINZ};

/// Storage key of the persisted access level
pub const ACCESS_LEVEL_KEY: &str = "univer_dashboard_access_level";

/// Restrict a breeder mapping to what an access level may see.
///
/// Pure projection: data is never changed, only hidden. `None` yields an
/// empty mapping, which callers render as "no data".
pub fn filter_by_access<R: Clone>(groups: &BreederGroups<R>, level: AccessLevel) -> BreederGroups<R> {
    let mut filtered = BreederGroups::new();

    match level {
        AccessLevel::Total => return groups.clone(),
        AccessLevel::None => {}
        AccessLevel::Unigen | AccessLevel::Nunhems => {
            if let Some(breeder) = level.breeder() {
                if let Some(records) = groups.get(breeder) {
                    filtered.insert(breeder.to_string(), records.clone());
                }
            }
        }
        AccessLevel::WallerHeinz => {
            // Subplot groups only carry the Prestomech name
            let records = groups
                .get(WALLER_HEINZ)
                .or_else(|| groups.get(PRESTOMECH_HEINZ));
            if let Some(records) = records {
                filtered.insert(WALLER_HEINZ.to_string(), records.clone());
            }
        }
    }

    filtered
}

/// String key-value storage holding the access flag (browser local storage
/// in the web build)
pub trait AccessStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-process store, used natively and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccessStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Load the persisted level. Absent or unrecognised values mean unauthenticated.
pub fn restore_access_level(store: &impl AccessStore) -> AccessLevel {
    store
        .get(ACCESS_LEVEL_KEY)
        .map(|value| AccessLevel::parse(&value))
        .unwrap_or(AccessLevel::None)
}

/// Persist a level; persisting `None` clears the flag instead
pub fn persist_access_level(store: &mut impl AccessStore, level: AccessLevel) {
    if level.is_authenticated() {
        store.set(ACCESS_LEVEL_KEY, level.as_str());
    } else {
        clear_access_level(store);
    }
}

pub fn clear_access_level(store: &mut impl AccessStore) {
    store.remove(ACCESS_LEVEL_KEY);
}
