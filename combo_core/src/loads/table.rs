//! Arena of loads keyed by `load_no`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Load, LoadKey, LoadNo};
use crate::errors::{CombError, CombResult};

/// Owned table of loads
///
/// Using a map keyed by number instead of shared references means groups
/// only store numbers, and a change made through [`LoadTable::get_mut`] is
/// seen by every group on its next generation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadTable {
    loads: BTreeMap<LoadNo, Load>,
}

impl LoadTable {
    pub fn new() -> Self {
        LoadTable::default()
    }

    /// Build a table from loads, failing on conflicting numbers
    pub fn from_loads(loads: impl IntoIterator<Item = Load>) -> CombResult<Self> {
        let mut table = LoadTable::new();
        for load in loads {
            table.insert(load)?;
        }
        Ok(table)
    }

    /// Insert a load
    ///
    /// Returns `Ok(true)` if the load was added, `Ok(false)` if an equal load
    /// with the same number was already present (the existing one is kept).
    /// A different load under the same number fails with DuplicateLoad.
    pub fn insert(&mut self, load: Load) -> CombResult<bool> {
        match self.loads.get(&load.load_no()) {
            Some(existing) if *existing == load => Ok(false),
            Some(existing) => Err(CombError::duplicate_load(
                load.load_no(),
                format!("'{}' conflicts with existing load '{}'", load.load_name, existing.load_name),
            )),
            None => {
                self.loads.insert(load.load_no(), load);
                Ok(true)
            }
        }
    }

    pub fn get(&self, load_no: LoadNo) -> Option<&Load> {
        self.loads.get(&load_no)
    }

    pub fn get_mut(&mut self, load_no: LoadNo) -> Option<&mut Load> {
        self.loads.get_mut(&load_no)
    }

    /// Get a load that must be present
    pub fn require(&self, load_no: LoadNo) -> CombResult<&Load> {
        self.loads
            .get(&load_no)
            .ok_or_else(|| CombError::load_not_found(format!("load_no={} (table holds {:?})", load_no, self.load_nos())))
    }

    /// Resolve a key to a load number; never fails
    pub fn find(&self, key: &LoadKey<'_>) -> Option<LoadNo> {
        match key {
            LoadKey::Number(no) => self.loads.contains_key(no).then_some(*no),
            _ => self.loads.values().find(|load| key.matches(load)).map(|load| load.load_no()),
        }
    }

    pub fn remove(&mut self, load_no: LoadNo) -> Option<Load> {
        self.loads.remove(&load_no)
    }

    pub fn contains(&self, load_no: LoadNo) -> bool {
        self.loads.contains_key(&load_no)
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Loads in ascending `load_no` order
    pub fn iter(&self) -> impl Iterator<Item = &Load> {
        self.loads.values()
    }

    pub fn load_nos(&self) -> Vec<LoadNo> {
        self.loads.keys().copied().collect()
    }
}
