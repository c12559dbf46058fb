//! # Load Combinations Registry
//!
//! [`LoadCombinations`] is the top-level container: it owns the canonical
//! load table, the registered groups and the load cases, and generates
//! combinations for any case using the configured settings.
//!
//! ## Structure
//!
//! ```text
//! LoadCombinations
//! ├── settings: CombinationSettings
//! ├── loads: LoadTable (load_no -> Load, the only copy of each load)
//! ├── groups: Vec<LoadGroup> (refer to loads by number)
//! └── cases: Vec<LoadCase> (own factored copies of groups)
//! ```
//!
//! Because groups hold load numbers rather than loads, two groups that
//! share a load always see the same definition, and editing a load through
//! [`LoadCombinations::load_mut`] changes every combination generated
//! afterwards.
//!
//! ## Example
//!
//! ```rust
//! use combo_core::groups::LoadGroup;
//! use combo_core::load_case::LoadCase;
//! use combo_core::loads::Load;
//! use combo_core::registry::LoadCombinations;
//!
//! let mut combos = LoadCombinations::new();
//! combos.add_group_with_loads(
//!     LoadGroup::plain("Dead", "G", [1]).unwrap(),
//!     vec![Load::plain(1, "Dead", "G1")],
//! ).unwrap();
//!
//! let mut case = LoadCase::new("Strength", 1, "ULS");
//! case.add_group_factor(combos.group("Dead").unwrap().clone(), 1.35).unwrap();
//! combos.add_case(case).unwrap();
//!
//! let generated = combos.generate("Strength").unwrap();
//! assert_eq!(generated.len(), 1);
//! assert_eq!(combos.title(&generated[0]), "+1.350×Dead");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combination::Combination;
use crate::errors::{CombError, CombResult};
use crate::groups::{GroupKey, LoadGroup};
use crate::load_case::LoadCase;
use crate::loads::{Load, LoadKey, LoadNo, LoadTable};
use crate::settings::CombinationSettings;

/// Registry of loads, groups and load cases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadCombinations {
    pub settings: CombinationSettings,
    loads: LoadTable,
    groups: Vec<LoadGroup>,
    cases: Vec<LoadCase>,
}

impl LoadCombinations {
    pub fn new() -> Self {
        LoadCombinations::default()
    }

    pub fn with_settings(settings: CombinationSettings) -> Self {
        LoadCombinations {
            settings,
            ..LoadCombinations::default()
        }
    }

    pub fn loads(&self) -> &LoadTable {
        &self.loads
    }

    pub fn groups(&self) -> &[LoadGroup] {
        &self.groups
    }

    pub fn cases(&self) -> &[LoadCase] {
        &self.cases
    }

    // ------------------------------------------------------------------
    // Loads
    // ------------------------------------------------------------------

    /// Register a load
    ///
    /// Adding a load equal to the registered one under the same number is a
    /// no-op and the registered instance stays canonical.
    ///
    /// # Errors
    /// DuplicateLoad if a different load already uses the number.
    pub fn add_load(&mut self, load: Load) -> CombResult<()> {
        let load_no = load.load_no();
        if self.loads.insert(load)? {
            debug!(event = "load_added", load_no);
        }
        Ok(())
    }

    /// Register several loads in order, stopping at the first failure
    pub fn add_loads(&mut self, loads: impl IntoIterator<Item = Load>) -> CombResult<()> {
        for load in loads {
            self.add_load(load)?;
        }
        Ok(())
    }

    /// Resolve `key` to a registered load number; never fails
    pub fn load_exists(&self, key: &LoadKey<'_>) -> Option<LoadNo> {
        self.loads.find(key)
    }

    pub fn load(&self, load_no: LoadNo) -> Option<&Load> {
        self.loads.get(load_no)
    }

    /// Mutable access to the canonical load
    ///
    /// Changes are seen by every group on its next generation pass.
    pub fn load_mut(&mut self, load_no: LoadNo) -> CombResult<&mut Load> {
        self.loads
            .get_mut(load_no)
            .ok_or_else(|| CombError::load_not_found(format!("load_no={}", load_no)))
    }

    /// Remove a load that no group references
    ///
    /// # Errors
    /// LoadNotFound if absent; InvalidInput if a registered group or case still uses it.
    pub fn remove_load(&mut self, key: &LoadKey<'_>) -> CombResult<Load> {
        let load_no = self
            .loads
            .find(key)
            .ok_or_else(|| CombError::load_not_found(format!("{} (registered: {:?})", key, self.loads.load_nos())))?;

        let users: Vec<&str> = self
            .groups
            .iter()
            .filter(|g| g.contains_load(load_no))
            .map(|g| g.group_name.as_str())
            .chain(
                self.cases
                    .iter()
                    .filter(|c| c.load_nos().contains(&load_no))
                    .map(|c| c.case_name.as_str()),
            )
            .collect();
        if !users.is_empty() {
            return Err(CombError::invalid_input(
                "load_no",
                load_no.to_string(),
                format!("Load is still referenced by {:?}", users),
            ));
        }

        self.loads
            .remove(load_no)
            .ok_or_else(|| CombError::load_not_found(format!("load_no={}", load_no)))
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Register a group whose loads are already registered
    ///
    /// # Errors
    /// GroupExists on a name or abbreviation clash; LoadNotFound for an
    /// unregistered member; InvalidInput if a member lacks a capability the
    /// group needs.
    pub fn add_group(&mut self, group: LoadGroup) -> CombResult<()> {
        if let Some(existing) = self
            .groups
            .iter()
            .find(|g| g.group_name == group.group_name || g.abbrev == group.abbrev)
        {
            return Err(CombError::group_exists(format!(
                "'{}' ({}) clashes with registered group '{}' ({})",
                group.group_name, group.abbrev, existing.group_name, existing.abbrev
            )));
        }
        group.validate_loads(&self.loads)?;

        debug!(
            event = "group_added",
            group = %group.group_name,
            kind = group.kind().name(),
            loads = group.load_nos().len(),
        );
        self.groups.push(group);
        Ok(())
    }

    /// Register a group together with its member loads
    ///
    /// Each load is reconciled with the registry first: an equal load under
    /// the same number is folded into the registered one, a conflicting one
    /// fails with DuplicateLoad. Nothing is changed if any step fails.
    pub fn add_group_with_loads(&mut self, group: LoadGroup, loads: impl IntoIterator<Item = Load>) -> CombResult<()> {
        let mut staged = self.loads.clone();
        for load in loads {
            staged.insert(load)?;
        }
        let previous = std::mem::replace(&mut self.loads, staged);
        if let Err(e) = self.add_group(group) {
            self.loads = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Resolve `key` to a registered group name; never fails
    pub fn group_exists(&self, key: &GroupKey<'_>) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| key.matches(g))
            .map(|g| g.group_name.as_str())
    }

    pub fn group(&self, group_name: &str) -> Option<&LoadGroup> {
        self.groups.iter().find(|g| g.group_name == group_name)
    }

    /// Remove a registered group
    pub fn remove_group(&mut self, key: &GroupKey<'_>) -> CombResult<LoadGroup> {
        let index = self.groups.iter().position(|g| key.matches(g)).ok_or_else(|| {
            CombError::group_not_found(format!(
                "{} (registered: {:?})",
                key,
                self.groups.iter().map(|g| g.group_name.as_str()).collect::<Vec<_>>()
            ))
        })?;
        Ok(self.groups.remove(index))
    }

    // ------------------------------------------------------------------
    // Load cases
    // ------------------------------------------------------------------

    /// Register a load case
    ///
    /// # Errors
    /// CaseExists on a name or number clash; LoadNotFound or InvalidInput if
    /// a group in the case does not fit the registered loads.
    pub fn add_case(&mut self, case: LoadCase) -> CombResult<()> {
        if let Some(existing) = self
            .cases
            .iter()
            .find(|c| c.case_name == case.case_name || c.case_no == case.case_no)
        {
            return Err(CombError::case_exists(format!(
                "'{}' (#{}) clashes with registered case '{}' (#{})",
                case.case_name, case.case_no, existing.case_name, existing.case_no
            )));
        }
        for group_factor in case.groups() {
            group_factor.group.validate_loads(&self.loads)?;
        }
        debug!(event = "case_added", case = %case.case_name, groups = case.groups().len());
        self.cases.push(case);
        Ok(())
    }

    pub fn case(&self, case_name: &str) -> Option<&LoadCase> {
        self.cases.iter().find(|c| c.case_name == case_name)
    }

    /// Mutable access to a registered case
    pub fn case_mut(&mut self, case_name: &str) -> CombResult<&mut LoadCase> {
        self.cases
            .iter_mut()
            .find(|c| c.case_name == case_name)
            .ok_or_else(|| CombError::case_not_found(case_name))
    }

    pub fn remove_case(&mut self, case_name: &str) -> CombResult<LoadCase> {
        let index = self
            .cases
            .iter()
            .position(|c| c.case_name == case_name)
            .ok_or_else(|| CombError::case_not_found(case_name))?;
        Ok(self.cases.remove(index))
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// Generate the combinations of one registered case
    pub fn generate(&self, case_name: &str) -> CombResult<Vec<Combination>> {
        let case = self.case(case_name).ok_or_else(|| {
            CombError::case_not_found(format!(
                "{} (registered: {:?})",
                case_name,
                self.cases.iter().map(|c| c.case_name.as_str()).collect::<Vec<_>>()
            ))
        })?;
        case.warn_if_large(self.settings.warn_combination_count);
        case.generate_cases(&self.loads, self.settings.allow_duplicates)
    }

    /// Generate every registered case, in registration order
    pub fn generate_all(&self) -> CombResult<Vec<(String, Vec<Combination>)>> {
        let mut results = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            results.push((case.case_name.clone(), self.generate(&case.case_name)?));
        }
        info!(
            event = "generation_complete",
            cases = results.len(),
            combinations = results.iter().map(|(_, c)| c.len()).sum::<usize>(),
        );
        Ok(results)
    }

    /// Title of a combination at the configured precision, factors per load summed
    pub fn title(&self, combination: &Combination) -> String {
        combination.combined_title(true, self.settings.title_precision)
    }
}
