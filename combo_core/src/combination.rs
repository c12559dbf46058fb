//! # Combinations
//!
//! A [`Combination`] is one fully resolved, factored set of loads, ready to
//! be applied to a structural model. Load factors are keyed by the number of
//! the load they act on. By default a load may appear only once; a
//! combination built with `allow_duplicates` keeps every factor supplied for
//! a load, e.g. when two groups in a case share a load.
//!
//! ## Example
//!
//! ```rust
//! use combo_core::combination::Combination;
//! use combo_core::load_factor::LoadFactor;
//! use combo_core::loads::{Load, LoadKey};
//!
//! let mut combo = Combination::new();
//! combo.add(LoadFactor::new(Load::plain(1, "Dead", "G")).with_base_factor(1.2)).unwrap();
//! combo.add(LoadFactor::new(Load::plain(2, "Live", "Q")).with_base_factor(1.5)).unwrap();
//!
//! assert_eq!(combo.exists(&LoadKey::Name("Live")), Some(2));
//! assert_eq!(combo.combined_title(true, 2), "+1.20×Dead +1.50×Live");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CombError, CombResult};
use crate::load_factor::LoadFactor;
use crate::loads::{LoadKey, LoadNo};

/// Load factors keyed by load number
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// Keep more than one factor per load
    pub allow_duplicates: bool,
    load_factors: BTreeMap<LoadNo, Vec<LoadFactor>>,
}

impl Combination {
    /// Create an empty combination that rejects duplicate loads
    pub fn new() -> Self {
        Combination::default()
    }

    /// Create an empty combination with an explicit duplicate policy
    pub fn with_allow_duplicates(allow_duplicates: bool) -> Self {
        Combination {
            allow_duplicates,
            load_factors: BTreeMap::new(),
        }
    }

    /// Create a combination from a sequence of load factors
    pub fn from_load_factors(
        load_factors: impl IntoIterator<Item = LoadFactor>,
        allow_duplicates: bool,
    ) -> CombResult<Self> {
        let mut combination = Combination::with_allow_duplicates(allow_duplicates);
        combination.extend(load_factors)?;
        Ok(combination)
    }

    /// Add one load factor
    ///
    /// # Errors
    /// DuplicateLoad if the load is already present and duplicates are not allowed.
    pub fn add(&mut self, load_factor: LoadFactor) -> CombResult<()> {
        let load_no = load_factor.load_no();
        if !self.allow_duplicates {
            if let Some(existing) = self.load_factors.get(&load_no).and_then(|entries| entries.first()) {
                return Err(CombError::duplicate_load(
                    load_no,
                    format!(
                        "'{}' is already in the combination as {} and duplicates are not allowed (loads present: {:?})",
                        load_factor.load.load_name,
                        existing,
                        self.load_factors.keys().collect::<Vec<_>>()
                    ),
                ));
            }
        }
        self.load_factors.entry(load_no).or_default().push(load_factor);
        Ok(())
    }

    /// Add every load factor in order, stopping at the first failure
    pub fn extend(&mut self, load_factors: impl IntoIterator<Item = LoadFactor>) -> CombResult<()> {
        for load_factor in load_factors {
            self.add(load_factor)?;
        }
        Ok(())
    }

    /// Remove every load factor equal to `load_factor`, returning how many were removed
    ///
    /// # Errors
    /// LoadNotFound if no equal load factor is present.
    pub fn remove_load_factor(&mut self, load_factor: &LoadFactor) -> CombResult<usize> {
        let load_no = load_factor.load_no();
        let removed = match self.load_factors.get_mut(&load_no) {
            Some(entries) => {
                let before = entries.len();
                entries.retain(|lf| lf != load_factor);
                before - entries.len()
            }
            None => 0,
        };

        if removed == 0 {
            return Err(CombError::load_not_found(format!("load factor {} on load_no={}", load_factor, load_no)));
        }
        if self.load_factors.get(&load_no).is_some_and(|entries| entries.is_empty()) {
            self.load_factors.remove(&load_no);
        }
        Ok(removed)
    }

    /// Remove every factor acting on the load identified by `key`
    ///
    /// # Errors
    /// LoadNotFound if the load is not part of this combination.
    pub fn remove_load(&mut self, key: &LoadKey<'_>) -> CombResult<Vec<LoadFactor>> {
        let load_no = self.exists(key).ok_or_else(|| {
            CombError::load_not_found(format!(
                "{} (combination holds {:?})",
                key,
                self.load_factors.keys().collect::<Vec<_>>()
            ))
        })?;
        Ok(self.load_factors.remove(&load_no).unwrap_or_default())
    }

    /// Resolve `key` to the number of a load in this combination; never fails
    pub fn exists(&self, key: &LoadKey<'_>) -> Option<LoadNo> {
        match key {
            LoadKey::Number(no) => self.load_factors.contains_key(no).then_some(*no),
            _ => self
                .load_factors
                .iter()
                .find(|(_, entries)| entries.iter().any(|lf| key.matches(&lf.load)))
                .map(|(no, _)| *no),
        }
    }

    /// Factors acting on one load
    pub fn load_factors_for(&self, load_no: LoadNo) -> &[LoadFactor] {
        self.load_factors.get(&load_no).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every load factor, in ascending load number order
    pub fn list_load_factors(&self) -> Vec<&LoadFactor> {
        self.load_factors.values().flatten().collect()
    }

    /// Load numbers present, ascending
    pub fn load_nos(&self) -> Vec<LoadNo> {
        self.load_factors.keys().copied().collect()
    }

    /// Sum of the overall factors applied to one load
    pub fn total_factor(&self, load_no: LoadNo) -> Option<f64> {
        self.load_factors
            .get(&load_no)
            .map(|entries| entries.iter().map(LoadFactor::factor).sum())
    }

    /// Number of distinct loads
    pub fn len(&self) -> usize {
        self.load_factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.load_factors.is_empty()
    }

    /// Human-readable label, e.g. `+1.200×Dead +1.500×Live`
    ///
    /// Loads are listed by ascending number. With `combine`, several factors
    /// on the same load are summed into one token; otherwise each is listed.
    pub fn combined_title(&self, combine: bool, precision: usize) -> String {
        let mut tokens = Vec::with_capacity(self.load_factors.len());
        for entries in self.load_factors.values() {
            let Some(first) = entries.first() else { continue };
            let name = &first.load.load_name;
            if combine {
                let total: f64 = entries.iter().map(LoadFactor::factor).sum();
                tokens.push(format!("{:+.*}×{}", precision, total, name));
            } else {
                tokens.extend(entries.iter().map(|lf| format!("{:+.*}×{}", precision, lf.factor(), name)));
            }
        }
        tokens.join(" ")
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.combined_title(true, 3))
    }
}
