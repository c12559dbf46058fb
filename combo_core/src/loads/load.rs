//! The `Load` entity
//!
//! A load is identified by its `load_no`. Its kind decides which
//! capabilities (scaling, direction) are available.

use serde::{Deserialize, Serialize};

use super::load_types::{LoadKind, ScaleMethod};
use super::{normalize_angle, LoadNo};
use crate::errors::{CombError, CombResult};

/// A named, numbered load definition
///
/// # Example
/// ```
/// use combo_core::loads::Load;
///
/// let wind = Load::wind(10, "Wind 0deg", "W0", 45.0, 360.0, true);
/// assert_eq!(wind.angle(), Some(0.0));
/// assert!(wind.symmetrical());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    load_no: LoadNo,
    pub load_name: String,
    pub abbrev: String,
    kind: LoadKind,
}

impl Load {
    /// Create a plain load
    pub fn plain(load_no: LoadNo, load_name: impl Into<String>, abbrev: impl Into<String>) -> Self {
        Load {
            load_no,
            load_name: load_name.into(),
            abbrev: abbrev.into(),
            kind: LoadKind::Plain,
        }
    }

    /// Create a load with a reference magnitude
    pub fn scalable(load_no: LoadNo, load_name: impl Into<String>, abbrev: impl Into<String>, load_value: f64) -> Self {
        Load {
            load_no,
            load_name: load_name.into(),
            abbrev: abbrev.into(),
            kind: LoadKind::Scalable { load_value },
        }
    }

    /// Create a directional load; the angle is normalized to [0, 360)
    pub fn rotatable(
        load_no: LoadNo,
        load_name: impl Into<String>,
        abbrev: impl Into<String>,
        load_value: f64,
        angle: f64,
        symmetrical: bool,
    ) -> Self {
        Load {
            load_no,
            load_name: load_name.into(),
            abbrev: abbrev.into(),
            kind: LoadKind::Rotatable {
                load_value,
                angle: normalize_angle(angle),
                symmetrical,
            },
        }
    }

    /// Create a wind load defined at `wind_speed`; the angle is normalized to [0, 360)
    pub fn wind(
        load_no: LoadNo,
        load_name: impl Into<String>,
        abbrev: impl Into<String>,
        wind_speed: f64,
        angle: f64,
        symmetrical: bool,
    ) -> Self {
        Load {
            load_no,
            load_name: load_name.into(),
            abbrev: abbrev.into(),
            kind: LoadKind::Wind {
                wind_speed,
                angle: normalize_angle(angle),
                symmetrical,
            },
        }
    }

    /// Caller-unique key; fixed for the life of the load
    pub fn load_no(&self) -> LoadNo {
        self.load_no
    }

    /// The load's capability set
    pub fn kind(&self) -> &LoadKind {
        &self.kind
    }

    /// Reference magnitude, if the load is scalable
    pub fn load_value(&self) -> Option<f64> {
        self.kind.load_value()
    }

    /// Direction in degrees, if the load is rotatable
    pub fn angle(&self) -> Option<f64> {
        match &self.kind {
            LoadKind::Rotatable { angle, .. } | LoadKind::Wind { angle, .. } => Some(normalize_angle(*angle)),
            _ => None,
        }
    }

    /// Whether the load may be mirrored 180° with a sign flip
    pub fn symmetrical(&self) -> bool {
        match &self.kind {
            LoadKind::Rotatable { symmetrical, .. } | LoadKind::Wind { symmetrical, .. } => *symmetrical,
            _ => false,
        }
    }

    pub fn is_scalable(&self) -> bool {
        self.load_value().is_some()
    }

    pub fn is_rotatable(&self) -> bool {
        self.kind.is_directional()
    }

    pub fn is_wind(&self) -> bool {
        matches!(self.kind, LoadKind::Wind { .. })
    }

    /// Change the reference magnitude (wind speed for wind loads)
    pub fn set_load_value(&mut self, value: f64) -> CombResult<()> {
        match &mut self.kind {
            LoadKind::Scalable { load_value } | LoadKind::Rotatable { load_value, .. } => *load_value = value,
            LoadKind::Wind { wind_speed, .. } => *wind_speed = value,
            LoadKind::Plain => {
                return Err(CombError::invalid_input(
                    "load_value",
                    value.to_string(),
                    format!("Load {} ('{}') is not scalable", self.load_no, self.load_name),
                ))
            }
        }
        Ok(())
    }

    /// Change the direction; the new angle is normalized to [0, 360)
    pub fn set_angle(&mut self, value: f64) -> CombResult<()> {
        match &mut self.kind {
            LoadKind::Rotatable { angle, .. } | LoadKind::Wind { angle, .. } => {
                *angle = normalize_angle(value);
                Ok(())
            }
            _ => Err(CombError::invalid_input(
                "angle",
                value.to_string(),
                format!("Load {} ('{}') is not rotatable", self.load_no, self.load_name),
            )),
        }
    }

    pub fn set_symmetrical(&mut self, value: bool) -> CombResult<()> {
        match &mut self.kind {
            LoadKind::Rotatable { symmetrical, .. } | LoadKind::Wind { symmetrical, .. } => {
                *symmetrical = value;
                Ok(())
            }
            _ => Err(CombError::invalid_input(
                "symmetrical",
                value.to_string(),
                format!("Load {} ('{}') is not rotatable", self.load_no, self.load_name),
            )),
        }
    }

    /// Factor that brings this load to `scale_to`
    ///
    /// Returns 1.0 when `scale` is false. Otherwise the load must carry a
    /// non-zero, finite reference magnitude.
    ///
    /// # Example
    /// ```
    /// use combo_core::loads::{Load, ScaleMethod};
    ///
    /// let live = Load::scalable(2, "Live", "Q", 2.0);
    /// assert_eq!(live.scale_factor(5.0, ScaleMethod::Ratio, true).unwrap(), 2.5);
    /// assert_eq!(live.scale_factor(5.0, ScaleMethod::Ratio, false).unwrap(), 1.0);
    /// ```
    pub fn scale_factor(&self, scale_to: f64, method: ScaleMethod, scale: bool) -> CombResult<f64> {
        if !scale {
            return Ok(1.0);
        }

        let load_value = self.load_value().ok_or_else(|| {
            CombError::invalid_input(
                "load_value",
                "None",
                format!("Load {} ('{}') has no load value and cannot be scaled", self.load_no, self.load_name),
            )
        })?;

        if load_value == 0.0 || !load_value.is_finite() {
            return Err(CombError::invalid_input(
                "load_value",
                load_value.to_string(),
                format!("Load {} ('{}') must have a non-zero finite load value to be scaled", self.load_no, self.load_name),
            ));
        }

        let factor = method.apply(scale_to, load_value);
        if !factor.is_finite() {
            return Err(CombError::invalid_input(
                "scale_factor",
                factor.to_string(),
                format!("Scaling load {} from {} to {} gave a non-finite factor", self.load_no, load_value, scale_to),
            ));
        }
        Ok(factor)
    }
}

impl std::fmt::Display for Load {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.load_no, self.load_name, self.abbrev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_normalization() {
        let load = Load::rotatable(1, "Crane", "C", 10.0, -90.0, false);
        assert_eq!(load.angle(), Some(270.0));

        let load = Load::wind(2, "Wind", "W", 45.0, 720.0, false);
        assert_eq!(load.angle(), Some(0.0));
    }

    #[test]
    fn test_set_angle_normalizes() {
        let mut load = Load::rotatable(1, "Crane", "C", 10.0, 0.0, false);
        load.set_angle(450.0).unwrap();
        assert_eq!(load.angle(), Some(90.0));
    }

    #[test]
    fn test_plain_load_has_no_capabilities() {
        let mut load = Load::plain(1, "Dead", "G");
        assert_eq!(load.angle(), None);
        assert!(!load.is_scalable());
        assert!(load.set_angle(10.0).is_err());
        assert!(load.set_load_value(10.0).is_err());
        assert!(load.scale_factor(1.0, ScaleMethod::Ratio, true).is_err());
        assert_eq!(load.scale_factor(1.0, ScaleMethod::Ratio, false).unwrap(), 1.0);
    }

    #[test]
    fn test_scale_factor_zero_value() {
        let load = Load::scalable(3, "Live", "Q", 0.0);
        let err = load.scale_factor(5.0, ScaleMethod::Ratio, true).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_wind_scale_velocity_squared() {
        let load = Load::wind(4, "Wind", "W", 25.0, 0.0, false);
        let factor = load.scale_factor(69.0, ScaleMethod::VelocitySquared, true).unwrap();
        assert!((factor - (69.0f64 / 25.0).powi(2)).abs() < 1e-12);
    }

    #[test]
    fn test_set_wind_speed() {
        let mut load = Load::wind(4, "Wind", "W", 25.0, 0.0, false);
        load.set_load_value(50.0).unwrap();
        assert_eq!(load.load_value(), Some(50.0));
        assert!(load.is_wind());
    }

    #[test]
    fn test_load_serialization() {
        let load = Load::rotatable(5, "Pump", "P", 12.0, 45.0, true);
        let json = serde_json::to_string(&load).unwrap();
        let roundtrip: Load = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, load);
    }
}
