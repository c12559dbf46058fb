//! # Load Groups
//!
//! A load group is a strategy for expanding a set of loads into candidate
//! factored cases. Every group produces an ordered list of cases; each case
//! is a set of [`LoadFactor`]s that act together.
//!
//! ## Variants
//!
//! | Variant      | Cases produced                         | Typical use                      |
//! |--------------|----------------------------------------|----------------------------------|
//! | Plain        | 1 (all loads at 1.0)                   | permanent actions                |
//! | Factored     | one per factor                         | ±W, 0/1 on/off                   |
//! | Scaled       | one per factor, loads scaled           | live load to a design pressure   |
//! | Exclusive    | one per (factor × load), single load   | live load patterns               |
//! | Rotational   | one per (factor × required angle)      | rotating equipment               |
//! | Wind         | as Rotational, velocity² scaling       | wind from any direction          |
//!
//! Groups never own loads. They list load numbers and resolve them against
//! a [`LoadTable`] when generating, so the output always reflects the
//! current definition of every load.
//!
//! ## Example
//!
//! ```
//! use combo_core::groups::LoadGroup;
//! use combo_core::loads::{Load, LoadTable};
//!
//! let table = LoadTable::from_loads(vec![Load::plain(1, "Dead", "G1")]).unwrap();
//! let group = LoadGroup::builder("Dead", "G")
//!     .load(1)
//!     .factors([-1.0, 0.0, 1.0])
//!     .build()
//!     .unwrap();
//!
//! let cases = group.generate_cases(&table).unwrap();
//! assert_eq!(cases.len(), 3);
//! assert_eq!(cases[0][0].base_factor, -1.0);
//! ```

pub mod builder;
pub mod rotational;
pub mod scaling;

pub use builder::GroupBuilder;
pub use scaling::Scaling;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CombError, CombResult};
use crate::interpolation::Interpolation;
use crate::load_factor::LoadFactor;
use crate::loads::{Load, LoadNo, LoadTable};

/// One generated case: the load factors that act together
pub type Case = Vec<LoadFactor>;

/// Strategy-specific parameters of a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GroupKind {
    Plain,
    Factored {
        factors: Vec<f64>,
    },
    Scaled {
        factors: Vec<f64>,
        scaling: Scaling,
    },
    Exclusive {
        factors: Vec<f64>,
        scaling: Scaling,
    },
    Rotational {
        factors: Vec<f64>,
        scaling: Scaling,
        /// Required output angles, normalized, sorted and distinct
        angles: Vec<f64>,
        interpolation: Interpolation,
    },
    Wind {
        factors: Vec<f64>,
        scaling: Scaling,
        angles: Vec<f64>,
        interpolation: Interpolation,
    },
}

impl GroupKind {
    pub fn name(&self) -> &'static str {
        match self {
            GroupKind::Plain => "Plain",
            GroupKind::Factored { .. } => "Factored",
            GroupKind::Scaled { .. } => "Scaled",
            GroupKind::Exclusive { .. } => "Exclusive",
            GroupKind::Rotational { .. } => "Rotational",
            GroupKind::Wind { .. } => "Wind",
        }
    }

    /// Factor sequence iterated by the group (a plain group has none)
    pub fn factors(&self) -> &[f64] {
        match self {
            GroupKind::Plain => &[],
            GroupKind::Factored { factors }
            | GroupKind::Scaled { factors, .. }
            | GroupKind::Exclusive { factors, .. }
            | GroupKind::Rotational { factors, .. }
            | GroupKind::Wind { factors, .. } => factors,
        }
    }

    pub fn scaling(&self) -> Option<&Scaling> {
        match self {
            GroupKind::Plain | GroupKind::Factored { .. } => None,
            GroupKind::Scaled { scaling, .. }
            | GroupKind::Exclusive { scaling, .. }
            | GroupKind::Rotational { scaling, .. }
            | GroupKind::Wind { scaling, .. } => Some(scaling),
        }
    }

    /// Required angles of a directional group
    pub fn angles(&self) -> &[f64] {
        match self {
            GroupKind::Rotational { angles, .. } | GroupKind::Wind { angles, .. } => angles,
            _ => &[],
        }
    }

    pub fn is_directional(&self) -> bool {
        matches!(self, GroupKind::Rotational { .. } | GroupKind::Wind { .. })
    }
}

/// A named load grouping strategy over a set of load numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadGroup {
    pub group_name: String,
    pub abbrev: String,
    load_nos: Vec<LoadNo>,
    kind: GroupKind,
}

impl LoadGroup {
    /// Start building a group
    pub fn builder(group_name: impl Into<String>, abbrev: impl Into<String>) -> GroupBuilder {
        GroupBuilder::new(group_name, abbrev)
    }

    /// A plain group: one case with every load at 1.0
    pub fn plain(group_name: impl Into<String>, abbrev: impl Into<String>, load_nos: impl IntoIterator<Item = LoadNo>) -> CombResult<Self> {
        GroupBuilder::new(group_name, abbrev).loads(load_nos).build()
    }

    /// A factored group: one case per factor
    pub fn factored(
        group_name: impl Into<String>,
        abbrev: impl Into<String>,
        load_nos: impl IntoIterator<Item = LoadNo>,
        factors: impl IntoIterator<Item = f64>,
    ) -> CombResult<Self> {
        GroupBuilder::new(group_name, abbrev).loads(load_nos).factors(factors).build()
    }

    pub(crate) fn from_parts(group_name: String, abbrev: String, load_nos: Vec<LoadNo>, kind: GroupKind) -> Self {
        LoadGroup {
            group_name,
            abbrev,
            load_nos,
            kind,
        }
    }

    pub fn kind(&self) -> &GroupKind {
        &self.kind
    }

    /// Member load numbers in the order they were added
    pub fn load_nos(&self) -> &[LoadNo] {
        &self.load_nos
    }

    pub fn contains_load(&self, load_no: LoadNo) -> bool {
        self.load_nos.contains(&load_no)
    }

    /// Number of cases `generate_cases` yields, without generating them
    pub fn case_count(&self) -> usize {
        match &self.kind {
            GroupKind::Plain => 1,
            GroupKind::Factored { factors } | GroupKind::Scaled { factors, .. } => factors.len(),
            GroupKind::Exclusive { factors, .. } => factors.len() * self.load_nos.len(),
            GroupKind::Rotational { factors, angles, .. } | GroupKind::Wind { factors, angles, .. } => {
                factors.len() * angles.len()
            }
        }
    }

    fn members<'t>(&self, loads: &'t LoadTable) -> CombResult<Vec<&'t Load>> {
        self.load_nos
            .iter()
            .map(|no| {
                loads.get(*no).ok_or_else(|| {
                    CombError::load_not_found(format!("load_no={} referenced by group '{}'", no, self.group_name))
                })
            })
            .collect()
    }

    /// Check that every member is present and has the capabilities this
    /// group needs (a magnitude when scaling, a direction when rotational)
    pub fn validate_loads(&self, loads: &LoadTable) -> CombResult<()> {
        let members = self.members(loads)?;
        if let Some(scaling) = self.kind.scaling() {
            scaling::scale_factors(&members, scaling)?;
        }
        if self.kind.is_directional() {
            rotational::angle_set(&self.group_name, &members)?;
        }
        Ok(())
    }

    /// Generate every case of this group
    ///
    /// The result depends only on the group and the table, so repeated calls
    /// produce the identical sequence.
    pub fn generate_cases(&self, loads: &LoadTable) -> CombResult<Vec<Case>> {
        let members = self.members(loads)?;

        let cases: Vec<Case> = match &self.kind {
            GroupKind::Plain => vec![members.iter().map(|load| LoadFactor::new((*load).clone())).collect()],

            GroupKind::Factored { factors } => factors
                .iter()
                .map(|&factor| {
                    members
                        .iter()
                        .map(|load| LoadFactor::new((*load).clone()).with_base_factor(factor))
                        .collect()
                })
                .collect(),

            GroupKind::Scaled { factors, scaling } => {
                let scales = scaling::scale_factors(&members, scaling)?;
                let info = scaling.info();
                factors
                    .iter()
                    .map(|&factor| {
                        members
                            .iter()
                            .map(|load| {
                                LoadFactor::new((*load).clone())
                                    .with_base_factor(factor)
                                    .with_scale_factor(scales[&load.load_no()])
                                    .with_info(info.clone())
                            })
                            .collect()
                    })
                    .collect()
            }

            GroupKind::Exclusive { factors, scaling } => {
                let scales = scaling::scale_factors(&members, scaling)?;
                let info = scaling.info();
                factors
                    .iter()
                    .flat_map(|&factor| {
                        members.iter().map(move |load| (factor, *load))
                    })
                    .map(|(factor, load)| {
                        vec![LoadFactor::new(load.clone())
                            .with_base_factor(factor)
                            .with_scale_factor(scales[&load.load_no()])
                            .with_info(info.clone())]
                    })
                    .collect()
            }

            GroupKind::Rotational {
                factors,
                scaling,
                angles,
                interpolation,
            }
            | GroupKind::Wind {
                factors,
                scaling,
                angles,
                interpolation,
            } => {
                let scales = scaling::scale_factors(&members, scaling)?;
                rotational::generate(&self.group_name, &members, factors, scaling, angles, *interpolation, &scales)?
            }
        };

        debug!(
            event = "group_generated",
            group = %self.group_name,
            kind = self.kind.name(),
            loads = members.len(),
            cases = cases.len(),
        );

        Ok(cases)
    }
}

impl std::fmt::Display for LoadGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) [{}]", self.group_name, self.abbrev, self.kind.name())
    }
}

/// Identifies one group by exactly one criterion
#[derive(Debug, Clone, Copy)]
pub enum GroupKey<'a> {
    Name(&'a str),
    Abbrev(&'a str),
    /// Matches a group equal in every field
    Group(&'a LoadGroup),
}

impl GroupKey<'_> {
    pub fn matches(&self, group: &LoadGroup) -> bool {
        match self {
            GroupKey::Name(name) => group.group_name == *name,
            GroupKey::Abbrev(abbrev) => group.abbrev == *abbrev,
            GroupKey::Group(other) => *other == group,
        }
    }
}

impl std::fmt::Display for GroupKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Name(name) => write!(f, "group_name='{}'", name),
            GroupKey::Abbrev(abbrev) => write!(f, "abbrev='{}'", abbrev),
            GroupKey::Group(group) => write!(f, "group={}", group),
        }
    }
}
