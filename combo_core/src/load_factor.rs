//! # Load Factors
//!
//! A [`LoadFactor`] pairs one load with the multiplier it receives in a
//! single combination. The multiplier is kept as five separate factors so
//! the origin of every part of it stays visible:
//!
//! ```text
//! factor = base_factor × scale_factor × rotational_factor × symmetry_factor × group_factor
//! ```
//!
//! - `base_factor` - the group's factor for this case (e.g. -1.0, 0.0, 1.0)
//! - `scale_factor` - brings the load to the group's `scale_to` value
//! - `rotational_factor` - interpolation weight between two directions
//! - `symmetry_factor` - -1.0 for a load mirrored 180°, otherwise 1.0
//! - `group_factor` - case-level multiplier of the group (e.g. 1.2 for dead load)

use serde::{Deserialize, Serialize};

use crate::errors::{CombError, CombResult};
use crate::loads::{Load, LoadNo};

/// Auxiliary metadata carried with a load factor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadFactorInfo {
    /// Value the load was scaled to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_to: Option<f64>,

    /// Whether scaling was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_scaled: Option<bool>,

    /// Required angle this factor was generated for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,

    /// Whether the load is acting as its 180° mirror
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symmetric: Option<bool>,
}

/// One load and the factors applied to it in a combination
///
/// # Example
/// ```
/// use combo_core::load_factor::LoadFactor;
/// use combo_core::loads::Load;
///
/// let lf = LoadFactor::new(Load::scalable(1, "Live", "Q", 2.0))
///     .with_base_factor(1.5)
///     .with_scale_factor(2.0)
///     .with_group_factor(0.5);
///
/// assert_eq!(lf.factor(), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadFactor {
    pub load: Load,
    pub base_factor: f64,
    pub scale_factor: f64,
    pub rotational_factor: f64,
    symmetry_factor: f64,
    pub group_factor: f64,
    #[serde(default)]
    pub info: LoadFactorInfo,
}

impl LoadFactor {
    /// Create a load factor with every factor at 1.0
    pub fn new(load: Load) -> Self {
        LoadFactor {
            load,
            base_factor: 1.0,
            scale_factor: 1.0,
            rotational_factor: 1.0,
            symmetry_factor: 1.0,
            group_factor: 1.0,
            info: LoadFactorInfo::default(),
        }
    }

    pub fn with_base_factor(mut self, factor: f64) -> Self {
        self.base_factor = factor;
        self
    }

    pub fn with_scale_factor(mut self, factor: f64) -> Self {
        self.scale_factor = factor;
        self
    }

    pub fn with_rotational_factor(mut self, factor: f64) -> Self {
        self.rotational_factor = factor;
        self
    }

    /// Set the symmetry factor; only ±1.0 is accepted
    pub fn with_symmetry_factor(mut self, factor: f64) -> CombResult<Self> {
        self.set_symmetry_factor(factor)?;
        Ok(self)
    }

    pub fn with_group_factor(mut self, factor: f64) -> Self {
        self.group_factor = factor;
        self
    }

    pub fn with_info(mut self, info: LoadFactorInfo) -> Self {
        self.info = info;
        self
    }

    /// Key of the underlying load
    pub fn load_no(&self) -> LoadNo {
        self.load.load_no()
    }

    pub fn symmetry_factor(&self) -> f64 {
        self.symmetry_factor
    }

    /// Set the symmetry factor
    ///
    /// # Errors
    /// InvalidInput unless `factor` is exactly 1.0 or -1.0.
    pub fn set_symmetry_factor(&mut self, factor: f64) -> CombResult<()> {
        if factor != 1.0 && factor != -1.0 {
            return Err(CombError::invalid_input(
                "symmetry_factor",
                factor.to_string(),
                format!("Symmetry factor for load {} must be 1.0 or -1.0", self.load.load_no()),
            ));
        }
        self.symmetry_factor = factor;
        Ok(())
    }

    /// Overall factor: product of the five component factors
    pub fn factor(&self) -> f64 {
        self.base_factor * self.scale_factor * self.rotational_factor * self.symmetry_factor * self.group_factor
    }
}

impl std::fmt::Display for LoadFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.3}×{}", self.factor(), self.load.load_name)
    }
}
