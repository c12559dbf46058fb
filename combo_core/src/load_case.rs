//! # Load Cases
//!
//! A [`LoadCase`] is a named rule that combines several load groups, each
//! with its own case-level factor, into the full list of [`Combination`]s.
//! Every case of every group is combined with every case of every other
//! group (a cross product), so the number of combinations is the product of
//! the groups' case counts.
//!
//! ## Ordering
//!
//! Groups are expanded in the order they were added. The combinations of
//! earlier groups vary slowest and the cases of the last group vary fastest:
//!
//! ```text
//! groups: G (1 case), Q (2 cases), W (3 cases)
//! -> G·Q1·W1, G·Q1·W2, G·Q1·W3, G·Q2·W1, G·Q2·W2, G·Q2·W3
//! ```
//!
//! ## Example
//!
//! ```rust
//! use combo_core::groups::LoadGroup;
//! use combo_core::load_case::LoadCase;
//! use combo_core::loads::{Load, LoadTable};
//!
//! let table = LoadTable::from_loads(vec![
//!     Load::plain(1, "Dead", "G"),
//!     Load::plain(2, "Wind", "W"),
//! ]).unwrap();
//!
//! let mut case = LoadCase::new("Strength", 1, "ULS");
//! case.add_group_factor(LoadGroup::plain("Dead", "G", [1]).unwrap(), 1.2).unwrap();
//! case.add_group_factor(LoadGroup::factored("Wind", "W", [2], [-1.0, 1.0]).unwrap(), 1.0).unwrap();
//!
//! let combos = case.generate_cases(&table, false).unwrap();
//! assert_eq!(combos.len(), 2);
//! assert_eq!(combos[0].total_factor(1), Some(1.2));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::combination::Combination;
use crate::errors::{CombError, CombResult};
use crate::groups::{Case, GroupKey, LoadGroup};
use crate::loads::{LoadNo, LoadTable};

/// A load group paired with its case-level multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupFactor {
    pub group: LoadGroup,
    group_factor: f64,
}

impl GroupFactor {
    /// Pair a group with a factor
    ///
    /// # Errors
    /// InvalidCombinationFactor if the factor is not a finite number.
    pub fn new(group: LoadGroup, group_factor: f64) -> CombResult<Self> {
        check_group_factor(&group.group_name, group_factor)?;
        Ok(GroupFactor { group, group_factor })
    }

    pub fn group_factor(&self) -> f64 {
        self.group_factor
    }

    /// The group's cases with every `group_factor` scaled by this multiplier
    pub fn generate_cases(&self, loads: &LoadTable) -> CombResult<Vec<Case>> {
        let mut cases = self.group.generate_cases(loads)?;
        for load_factor in cases.iter_mut().flatten() {
            load_factor.group_factor *= self.group_factor;
        }
        Ok(cases)
    }
}

fn check_group_factor(group_name: &str, factor: f64) -> CombResult<()> {
    if !factor.is_finite() {
        return Err(CombError::invalid_combination_factor(
            group_name,
            factor.to_string(),
            "group factor must be a finite number",
        ));
    }
    Ok(())
}

/// A named collection of factored groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    pub case_name: String,
    pub case_no: u32,
    pub abbrev: String,
    groups: Vec<GroupFactor>,
}

impl LoadCase {
    pub fn new(case_name: impl Into<String>, case_no: u32, abbrev: impl Into<String>) -> Self {
        LoadCase {
            case_name: case_name.into(),
            case_no,
            abbrev: abbrev.into(),
            groups: Vec::new(),
        }
    }

    /// Groups in the order they were added
    pub fn groups(&self) -> &[GroupFactor] {
        &self.groups
    }

    /// Add a factored group
    ///
    /// # Errors
    /// GroupExists if a group with the same name or abbreviation is present.
    pub fn add_group(&mut self, group_factor: GroupFactor) -> CombResult<()> {
        let group = &group_factor.group;
        if let Some(existing) = self
            .groups
            .iter()
            .find(|gf| gf.group.group_name == group.group_name || gf.group.abbrev == group.abbrev)
        {
            return Err(CombError::group_exists(format!(
                "'{}' ({}) clashes with '{}' ({}) in case '{}'",
                group.group_name, group.abbrev, existing.group.group_name, existing.group.abbrev, self.case_name
            )));
        }
        self.groups.push(group_factor);
        Ok(())
    }

    /// Pair `group` with `factor` and add it
    pub fn add_group_factor(&mut self, group: LoadGroup, factor: f64) -> CombResult<()> {
        self.add_group(GroupFactor::new(group, factor)?)
    }

    /// Add several factored groups in order, stopping at the first failure
    pub fn add_groups(&mut self, group_factors: impl IntoIterator<Item = GroupFactor>) -> CombResult<()> {
        for group_factor in group_factors {
            self.add_group(group_factor)?;
        }
        Ok(())
    }

    /// Resolve `key` to the name of a group in this case; never fails
    pub fn group_exists(&self, key: &GroupKey<'_>) -> Option<&str> {
        self.groups
            .iter()
            .find(|gf| key.matches(&gf.group))
            .map(|gf| gf.group.group_name.as_str())
    }

    fn position(&self, key: &GroupKey<'_>) -> CombResult<usize> {
        self.groups.iter().position(|gf| key.matches(&gf.group)).ok_or_else(|| {
            CombError::group_not_found(format!(
                "{} in case '{}' (groups: {:?})",
                key,
                self.case_name,
                self.groups.iter().map(|gf| gf.group.group_name.as_str()).collect::<Vec<_>>()
            ))
        })
    }

    /// Remove a group
    ///
    /// # Errors
    /// GroupNotFound if no group matches `key`.
    pub fn remove_group(&mut self, key: &GroupKey<'_>) -> CombResult<GroupFactor> {
        let index = self.position(key)?;
        Ok(self.groups.remove(index))
    }

    pub fn get_factor(&self, key: &GroupKey<'_>) -> CombResult<f64> {
        let index = self.position(key)?;
        Ok(self.groups[index].group_factor)
    }

    /// Change a group's case-level multiplier
    pub fn set_factor(&mut self, key: &GroupKey<'_>, factor: f64) -> CombResult<()> {
        let index = self.position(key)?;
        check_group_factor(&self.groups[index].group.group_name, factor)?;
        self.groups[index].group_factor = factor;
        Ok(())
    }

    /// Every load number referenced by any group, ascending and distinct
    pub fn load_nos(&self) -> Vec<LoadNo> {
        let mut load_nos: Vec<LoadNo> = self
            .groups
            .iter()
            .flat_map(|gf| gf.group.load_nos().iter().copied())
            .collect();
        load_nos.sort_unstable();
        load_nos.dedup();
        load_nos
    }

    /// Number of combinations `generate_cases` yields; 0 when there are no groups
    pub fn combination_count(&self) -> usize {
        if self.groups.is_empty() {
            return 0;
        }
        self.groups.iter().map(|gf| gf.group.case_count()).product()
    }

    /// Expand the groups into combinations
    ///
    /// The first group's cases seed the list; every further group multiplies
    /// it by its own case count, appending each new case to a copy of each
    /// existing combination.
    pub fn generate_cases(&self, loads: &LoadTable, allow_duplicates: bool) -> CombResult<Vec<Combination>> {
        let mut combinations: Option<Vec<Combination>> = None;

        for group_factor in &self.groups {
            let cases = group_factor.generate_cases(loads)?;

            combinations = Some(match combinations {
                None => cases
                    .into_iter()
                    .map(|case| Combination::from_load_factors(case, allow_duplicates))
                    .collect::<CombResult<Vec<_>>>()?,
                Some(existing) => {
                    let mut expanded = Vec::with_capacity(existing.len() * cases.len());
                    for combination in &existing {
                        for case in &cases {
                            let mut next = combination.clone();
                            next.extend(case.iter().cloned())?;
                            expanded.push(next);
                        }
                    }
                    expanded
                }
            });
        }

        let combinations = combinations.unwrap_or_default();
        debug!(
            event = "case_generated",
            case = %self.case_name,
            groups = self.groups.len(),
            combinations = combinations.len(),
        );
        Ok(combinations)
    }

    /// Warn before expanding a case larger than `threshold`
    pub(crate) fn warn_if_large(&self, threshold: usize) {
        let count = self.combination_count();
        if count > threshold {
            warn!(
                event = "large_case",
                case = %self.case_name,
                combinations = count,
                threshold,
                "load case expands to more combinations than the configured warning threshold"
            );
        }
    }
}

impl std::fmt::Display for LoadCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.case_no, self.case_name, self.abbrev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::Load;
    use approx::assert_abs_diff_eq;

    fn table() -> LoadTable {
        LoadTable::from_loads(vec![
            Load::plain(1, "Dead", "G1"),
            Load::scalable(2, "Office", "Q1", 3.0),
            Load::scalable(3, "Plant", "Q2", 5.0),
            Load::plain(4, "Wind", "W"),
        ])
        .unwrap()
    }

    fn dead() -> LoadGroup {
        LoadGroup::plain("Dead", "G", [1]).unwrap()
    }

    fn live() -> LoadGroup {
        LoadGroup::builder("Live", "Q")
            .loads([2, 3])
            .factors([0.0, 1.0])
            .exclusive()
            .build()
            .unwrap()
    }

    fn wind() -> LoadGroup {
        LoadGroup::factored("Wind", "W", [4], [-1.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn test_group_factor_rejects_non_finite() {
        let err = GroupFactor::new(dead(), f64::NAN).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_COMBINATION_FACTOR");
    }

    #[test]
    fn test_add_group_rejects_name_or_abbrev_clash() {
        let mut case = LoadCase::new("ULS", 1, "U");
        case.add_group_factor(dead(), 1.2).unwrap();

        let same_name = LoadGroup::plain("Dead", "X", [1]).unwrap();
        assert_eq!(case.add_group_factor(same_name, 1.0).unwrap_err().error_code(), "GROUP_EXISTS");

        let same_abbrev = LoadGroup::plain("Other", "G", [1]).unwrap();
        assert_eq!(case.add_group_factor(same_abbrev, 1.0).unwrap_err().error_code(), "GROUP_EXISTS");
        assert_eq!(case.groups().len(), 1);
    }

    #[test]
    fn test_remove_group_by_each_key() {
        let mut case = LoadCase::new("ULS", 1, "U");
        case.add_groups([
            GroupFactor::new(dead(), 1.2).unwrap(),
            GroupFactor::new(live(), 1.5).unwrap(),
            GroupFactor::new(wind(), 1.0).unwrap(),
        ])
        .unwrap();

        assert_eq!(case.remove_group(&GroupKey::Abbrev("Q")).unwrap().group.group_name, "Live");
        assert_eq!(case.remove_group(&GroupKey::Group(&wind())).unwrap().group_factor(), 1.0);
        assert_eq!(case.remove_group(&GroupKey::Name("Dead")).unwrap().group_factor(), 1.2);

        let err = case.remove_group(&GroupKey::Name("Dead")).unwrap_err();
        assert_eq!(err.error_code(), "GROUP_NOT_FOUND");
    }

    #[test]
    fn test_group_exists() {
        let mut case = LoadCase::new("ULS", 1, "U");
        case.add_group_factor(dead(), 1.2).unwrap();
        assert_eq!(case.group_exists(&GroupKey::Abbrev("G")), Some("Dead"));
        assert_eq!(case.group_exists(&GroupKey::Name("Live")), None);
    }

    #[test]
    fn test_get_set_factor() {
        let mut case = LoadCase::new("ULS", 1, "U");
        case.add_group_factor(dead(), 1.2).unwrap();
        assert_eq!(case.get_factor(&GroupKey::Name("Dead")).unwrap(), 1.2);

        case.set_factor(&GroupKey::Name("Dead"), 0.9).unwrap();
        assert_eq!(case.get_factor(&GroupKey::Name("Dead")).unwrap(), 0.9);

        assert!(case.set_factor(&GroupKey::Name("Dead"), f64::INFINITY).is_err());
        assert!(case.get_factor(&GroupKey::Name("Live")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_count_law() {
        let mut case = LoadCase::new("ULS", 1, "U");
        case.add_group_factor(dead(), 1.2).unwrap();
        case.add_group_factor(live(), 1.5).unwrap();
        case.add_group_factor(wind(), 1.0).unwrap();

        assert_eq!(case.combination_count(), 4 * 3);
        let combos = case.generate_cases(&table(), false).unwrap();
        assert_eq!(combos.len(), 12);
    }

    #[test]
    fn test_expansion_order_and_group_factor() {
        let mut case = LoadCase::new("ULS", 1, "U");
        case.add_group_factor(dead(), 1.2).unwrap();
        case.add_group_factor(live(), 1.5).unwrap();
        case.add_group_factor(wind(), 1.0).unwrap();
        let combos = case.generate_cases(&table(), false).unwrap();

        // live cases vary slower than wind cases
        let signature: Vec<(LoadNo, f64, f64)> = combos
            .iter()
            .map(|c| {
                let live_no = if c.exists(&crate::loads::LoadKey::Number(2)).is_some() { 2 } else { 3 };
                (live_no, c.total_factor(live_no).unwrap(), c.total_factor(4).unwrap())
            })
            .collect();
        assert_eq!(
            signature,
            vec![
                (2, 0.0, -1.0),
                (2, 0.0, 0.0),
                (2, 0.0, 1.0),
                (3, 0.0, -1.0),
                (3, 0.0, 0.0),
                (3, 0.0, 1.0),
                (2, 1.5, -1.0),
                (2, 1.5, 0.0),
                (2, 1.5, 1.0),
                (3, 1.5, -1.0),
                (3, 1.5, 0.0),
                (3, 1.5, 1.0),
            ]
        );

        for combo in &combos {
            let dead_lf = combo.load_factors_for(1)[0].clone();
            assert_abs_diff_eq!(dead_lf.group_factor, 1.2, epsilon = 1e-12);
            assert_abs_diff_eq!(dead_lf.factor(), 1.2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_shared_load_needs_duplicates() {
        let mut case = LoadCase::new("ULS", 1, "U");
        case.add_group_factor(dead(), 1.2).unwrap();
        case.add_group_factor(LoadGroup::plain("Dead again", "G2", [1]).unwrap(), 0.1).unwrap();

        assert_eq!(case.generate_cases(&table(), false).unwrap_err().error_code(), "DUPLICATE_LOAD");

        let combos = case.generate_cases(&table(), true).unwrap();
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].load_factors_for(1).len(), 2);
        assert_abs_diff_eq!(combos[0].total_factor(1).unwrap(), 1.3, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_case() {
        let case = LoadCase::new("Empty", 9, "E");
        assert_eq!(case.combination_count(), 0);
        assert!(case.generate_cases(&table(), false).unwrap().is_empty());
    }

    #[test]
    fn test_load_nos() {
        let mut case = LoadCase::new("ULS", 1, "U");
        case.add_group_factor(wind(), 1.0).unwrap();
        case.add_group_factor(live(), 1.5).unwrap();
        case.add_group_factor(dead(), 1.2).unwrap();
        assert_eq!(case.load_nos(), vec![1, 2, 3, 4]);
    }
}
