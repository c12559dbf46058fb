//! Builder that selects the group variant from the options supplied

use crate::errors::{CombError, CombResult};
use crate::interpolation::Interpolation;
use crate::loads::{normalize_angle, LoadNo, ScaleMethod};
use crate::settings::CombinationSettings;

use super::{GroupKind, LoadGroup, Scaling};

/// Collects group options and picks the matching variant on [`build`](GroupBuilder::build)
///
/// | Options set                  | Variant    |
/// |------------------------------|------------|
/// | `wind()` (+ `angles`)        | Wind       |
/// | `angles`                     | Rotational |
/// | `exclusive()`                | Exclusive  |
/// | `scale_to`                   | Scaled     |
/// | `factors`                    | Factored   |
/// | none of the above            | Plain      |
///
/// # Example
/// ```
/// use combo_core::groups::{GroupKind, LoadGroup};
///
/// let wind = LoadGroup::builder("Wind", "W")
///     .loads([10, 11])
///     .angles([0.0, 45.0, 90.0])
///     .scale_to(69.0)
///     .wind()
///     .build()
///     .unwrap();
/// assert!(matches!(wind.kind(), GroupKind::Wind { .. }));
/// assert_eq!(wind.case_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    group_name: String,
    abbrev: String,
    load_nos: Vec<LoadNo>,
    factors: Option<Vec<f64>>,
    scale_to: Option<f64>,
    scale: bool,
    scale_method: Option<ScaleMethod>,
    angles: Option<Vec<f64>>,
    interpolation: Option<Interpolation>,
    exclusive: bool,
    wind: bool,
    rotational_default: Interpolation,
    wind_default: Interpolation,
}

impl GroupBuilder {
    pub fn new(group_name: impl Into<String>, abbrev: impl Into<String>) -> Self {
        GroupBuilder {
            group_name: group_name.into(),
            abbrev: abbrev.into(),
            load_nos: Vec::new(),
            factors: None,
            scale_to: None,
            scale: true,
            scale_method: None,
            angles: None,
            interpolation: None,
            exclusive: false,
            wind: false,
            rotational_default: Interpolation::Sine,
            wind_default: Interpolation::Wind85,
        }
    }

    /// Take default interpolation functions from settings
    pub fn with_settings(mut self, settings: &CombinationSettings) -> Self {
        self.rotational_default = settings.rotational_interpolation;
        self.wind_default = settings.wind_interpolation;
        self
    }

    pub fn load(mut self, load_no: LoadNo) -> Self {
        self.load_nos.push(load_no);
        self
    }

    pub fn loads(mut self, load_nos: impl IntoIterator<Item = LoadNo>) -> Self {
        self.load_nos.extend(load_nos);
        self
    }

    /// Factor sequence, iterated in the given order
    pub fn factors(mut self, factors: impl IntoIterator<Item = f64>) -> Self {
        self.factors = Some(factors.into_iter().collect());
        self
    }

    pub fn scale_to(mut self, scale_to: f64) -> Self {
        self.scale_to = Some(scale_to);
        self
    }

    /// Disable (or re-enable) scaling while keeping the factor iteration
    pub fn scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    pub fn scale_method(mut self, method: ScaleMethod) -> Self {
        self.scale_method = Some(method);
        self
    }

    /// Required output angles in degrees; normalized, sorted and de-duplicated on build
    pub fn angles(mut self, angles: impl IntoIterator<Item = f64>) -> Self {
        self.angles = Some(angles.into_iter().collect());
        self
    }

    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = Some(interpolation);
        self
    }

    /// One load active per case
    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    /// Wind group: velocity-squared scaling and wind interpolation
    pub fn wind(mut self) -> Self {
        self.wind = true;
        self
    }

    fn invalid(&self, field: &str, value: impl Into<String>, reason: impl Into<String>) -> CombError {
        CombError::invalid_input(
            field,
            value,
            format!("Group '{}': {}", self.group_name, reason.into()),
        )
    }

    fn validated_factors(&self) -> CombResult<Vec<f64>> {
        let factors = self.factors.clone().unwrap_or_else(|| vec![1.0]);
        if let Some(bad) = factors.iter().find(|f| !f.is_finite()) {
            return Err(self.invalid("factors", bad.to_string(), "factors must be finite"));
        }
        Ok(factors)
    }

    fn validated_angles(&self) -> CombResult<Vec<f64>> {
        let raw = self.angles.clone().unwrap_or_default();
        if raw.is_empty() {
            return Err(self.invalid("angles", "[]", "a directional group needs at least one required angle"));
        }
        if let Some(bad) = raw.iter().find(|a| !a.is_finite()) {
            return Err(self.invalid("angles", bad.to_string(), "angles must be finite"));
        }

        let mut angles: Vec<f64> = raw.into_iter().map(normalize_angle).collect();
        angles.sort_by(f64::total_cmp);
        angles.dedup();
        Ok(angles)
    }

    fn scaling(&self, method: ScaleMethod) -> CombResult<Scaling> {
        if let Some(scale_to) = self.scale_to {
            if !scale_to.is_finite() {
                return Err(self.invalid("scale_to", scale_to.to_string(), "scale target must be finite"));
            }
        }
        Ok(Scaling {
            scale_to: self.scale_to,
            scale: self.scale,
            method,
        })
    }

    /// Validate the options and build the group
    pub fn build(self) -> CombResult<LoadGroup> {
        if self.group_name.trim().is_empty() {
            return Err(CombError::invalid_input("group_name", "\"\"", "Group name must not be empty"));
        }

        let mut seen = Vec::with_capacity(self.load_nos.len());
        for no in &self.load_nos {
            if seen.contains(no) {
                return Err(self.invalid("load_nos", no.to_string(), "load listed more than once"));
            }
            seen.push(*no);
        }

        let directional = self.wind || self.angles.is_some();
        if self.exclusive && directional {
            return Err(self.invalid(
                "exclusive",
                "true",
                "a group cannot be both exclusive and directional",
            ));
        }

        let kind = if self.wind {
            GroupKind::Wind {
                factors: self.validated_factors()?,
                scaling: self.scaling(ScaleMethod::VelocitySquared)?,
                angles: self.validated_angles()?,
                interpolation: self.interpolation.unwrap_or(self.wind_default),
            }
        } else if self.angles.is_some() {
            GroupKind::Rotational {
                factors: self.validated_factors()?,
                scaling: self.scaling(self.scale_method.unwrap_or_default())?,
                angles: self.validated_angles()?,
                interpolation: self.interpolation.unwrap_or(self.rotational_default),
            }
        } else if self.exclusive {
            GroupKind::Exclusive {
                factors: self.validated_factors()?,
                scaling: self.scaling(self.scale_method.unwrap_or_default())?,
            }
        } else if self.scale_to.is_some() {
            GroupKind::Scaled {
                factors: self.validated_factors()?,
                scaling: self.scaling(self.scale_method.unwrap_or_default())?,
            }
        } else if self.factors.is_some() {
            GroupKind::Factored {
                factors: self.validated_factors()?,
            }
        } else {
            GroupKind::Plain
        };

        Ok(LoadGroup::from_parts(self.group_name, self.abbrev, self.load_nos, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_selection() {
        let plain = GroupBuilder::new("G", "G").load(1).build().unwrap();
        assert_eq!(plain.kind().name(), "Plain");

        let factored = GroupBuilder::new("G", "G").load(1).factors([1.2]).build().unwrap();
        assert_eq!(factored.kind().name(), "Factored");

        let scaled = GroupBuilder::new("Q", "Q").load(1).scale_to(3.0).build().unwrap();
        assert_eq!(scaled.kind().name(), "Scaled");
        assert_eq!(scaled.kind().factors(), &[1.0]);

        let exclusive = GroupBuilder::new("Q", "Q").load(1).exclusive().build().unwrap();
        assert_eq!(exclusive.kind().name(), "Exclusive");

        let rotational = GroupBuilder::new("C", "C").load(1).angles([0.0]).build().unwrap();
        assert_eq!(rotational.kind().name(), "Rotational");

        let wind = GroupBuilder::new("W", "W").load(1).angles([0.0]).wind().build().unwrap();
        assert_eq!(wind.kind().name(), "Wind");
    }

    #[test]
    fn test_wind_defaults() {
        let wind = GroupBuilder::new("W", "W").load(1).angles([0.0]).scale_to(69.0).wind().build().unwrap();
        match wind.kind() {
            GroupKind::Wind { scaling, interpolation, .. } => {
                assert_eq!(scaling.method, ScaleMethod::VelocitySquared);
                assert_eq!(*interpolation, Interpolation::Wind85);
            }
            other => panic!("expected wind group, got {}", other.name()),
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = CombinationSettings {
            rotational_interpolation: Interpolation::Linear,
            ..CombinationSettings::default()
        };
        let group = GroupBuilder::new("C", "C")
            .with_settings(&settings)
            .load(1)
            .angles([0.0])
            .build()
            .unwrap();
        match group.kind() {
            GroupKind::Rotational { interpolation, .. } => assert_eq!(*interpolation, Interpolation::Linear),
            other => panic!("expected rotational group, got {}", other.name()),
        }
    }

    #[test]
    fn test_angles_normalized_sorted_distinct() {
        let group = GroupBuilder::new("C", "C")
            .load(1)
            .angles([360.0, 90.0, -270.0, 45.0, 0.0])
            .build()
            .unwrap();
        assert_eq!(group.kind().angles(), &[0.0, 45.0, 90.0]);
    }

    #[test]
    fn test_ambiguous_exclusive_directional() {
        let err = GroupBuilder::new("C", "C").load(1).angles([0.0]).exclusive().build().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(GroupBuilder::new("W", "W").load(1).angles([0.0]).wind().exclusive().build().is_err());
    }

    #[test]
    fn test_rejects_bad_options() {
        assert!(GroupBuilder::new("", "G").build().is_err());
        assert!(GroupBuilder::new("G", "G").loads([1, 1]).build().is_err());
        assert!(GroupBuilder::new("G", "G").load(1).factors([f64::NAN]).build().is_err());
        assert!(GroupBuilder::new("C", "C").load(1).angles(Vec::<f64>::new()).build().is_err());
        assert!(GroupBuilder::new("W", "W").load(1).wind().build().is_err());
        assert!(GroupBuilder::new("Q", "Q").load(1).scale_to(f64::INFINITY).build().is_err());
    }
}
