//! Scaling shared by the scaled, exclusive, rotational and wind groups

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::CombResult;
use crate::load_factor::LoadFactorInfo;
use crate::loads::{Load, LoadNo, ScaleMethod};

/// How a group scales its member loads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaling {
    /// Target value loads are scaled to; `None` disables scaling
    pub scale_to: Option<f64>,
    /// Master switch; when false every scale factor is 1.0
    pub scale: bool,
    pub method: ScaleMethod,
}

impl Scaling {
    pub fn new(scale_to: f64) -> Self {
        Scaling {
            scale_to: Some(scale_to),
            scale: true,
            method: ScaleMethod::Ratio,
        }
    }

    /// Scaling that leaves every load at 1.0
    pub fn none() -> Self {
        Scaling {
            scale_to: None,
            scale: false,
            method: ScaleMethod::Ratio,
        }
    }

    /// Whether loads are actually scaled
    pub fn is_active(&self) -> bool {
        self.scale && self.scale_to.is_some()
    }

    /// Scale factor for one load
    pub fn factor_for(&self, load: &Load) -> CombResult<f64> {
        match self.scale_to {
            Some(scale_to) if self.scale => load.scale_factor(scale_to, self.method, true),
            _ => Ok(1.0),
        }
    }

    /// Metadata recorded on every load factor the group emits
    pub fn info(&self) -> LoadFactorInfo {
        LoadFactorInfo {
            scale_to: self.scale_to,
            is_scaled: Some(self.is_active()),
            ..LoadFactorInfo::default()
        }
    }
}

impl Default for Scaling {
    fn default() -> Self {
        Scaling::none()
    }
}

/// Scale factor of every member, computed once per generation pass
pub(crate) fn scale_factors(members: &[&Load], scaling: &Scaling) -> CombResult<BTreeMap<LoadNo, f64>> {
    members
        .iter()
        .map(|load| Ok((load.load_no(), scaling.factor_for(load)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_scaling() {
        let load = Load::scalable(1, "Live", "Q", 2.0);
        assert_eq!(Scaling::new(5.0).factor_for(&load).unwrap(), 2.5);
    }

    #[test]
    fn test_disabled_scaling() {
        let load = Load::plain(1, "Dead", "G");
        let scaling = Scaling {
            scale: false,
            ..Scaling::new(5.0)
        };
        assert!(!scaling.is_active());
        assert_eq!(scaling.factor_for(&load).unwrap(), 1.0);
        assert_eq!(scaling.info().is_scaled, Some(false));
        assert_eq!(scaling.info().scale_to, Some(5.0));
    }

    #[test]
    fn test_scale_factors_propagates_errors() {
        let live = Load::scalable(1, "Live", "Q", 2.0);
        let dead = Load::plain(2, "Dead", "G");
        assert!(scale_factors(&[&live, &dead], &Scaling::new(4.0)).is_err());

        let factors = scale_factors(&[&live], &Scaling::new(4.0)).unwrap();
        assert_eq!(factors[&1], 2.0);
    }
}
