//! Load variant definitions
//!
//! A load is one of a closed set of kinds. Each kind unlocks a capability:
//! scalable loads carry a magnitude that can be scaled to a design value,
//! rotatable loads additionally carry a direction, and wind loads carry a
//! wind speed and direction.

use serde::{Deserialize, Serialize};

/// Signature of a caller supplied scale function: `(scale_to, load_value) -> factor`
pub type ScaleFn = fn(f64, f64) -> f64;

/// The capability set of a load
///
/// # Example
/// ```
/// use combo_core::loads::LoadKind;
///
/// let wind = LoadKind::Wind { wind_speed: 45.0, angle: 90.0, symmetrical: true };
/// assert_eq!(wind.code(), "W");
/// assert!(wind.is_directional());
/// assert_eq!(wind.load_value(), Some(45.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LoadKind {
    /// Plain named load with no magnitude information
    #[default]
    Plain,

    /// Load with a reference magnitude that can be scaled
    Scalable {
        /// Magnitude the load was defined at
        load_value: f64,
    },

    /// Scalable load acting in a direction
    Rotatable {
        load_value: f64,
        /// Direction in degrees, normalized to [0, 360)
        angle: f64,
        /// Whether the load may be mirrored 180° with a sign flip
        symmetrical: bool,
    },

    /// Wind load defined at a reference wind speed
    Wind {
        /// Wind speed the load was defined at (m/s)
        wind_speed: f64,
        /// Direction in degrees, normalized to [0, 360)
        angle: f64,
        symmetrical: bool,
    },
}

impl LoadKind {
    /// Short code for the variant (P, S, R, W)
    pub fn code(&self) -> &'static str {
        match self {
            LoadKind::Plain => "P",
            LoadKind::Scalable { .. } => "S",
            LoadKind::Rotatable { .. } => "R",
            LoadKind::Wind { .. } => "W",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadKind::Plain => "Plain load",
            LoadKind::Scalable { .. } => "Scalable load",
            LoadKind::Rotatable { .. } => "Rotatable load",
            LoadKind::Wind { .. } => "Wind load",
        }
    }

    /// Whether the load carries a direction
    pub fn is_directional(&self) -> bool {
        matches!(self, LoadKind::Rotatable { .. } | LoadKind::Wind { .. })
    }

    /// Magnitude used for scaling (wind speed for wind loads)
    pub fn load_value(&self) -> Option<f64> {
        match self {
            LoadKind::Plain => None,
            LoadKind::Scalable { load_value } | LoadKind::Rotatable { load_value, .. } => Some(*load_value),
            LoadKind::Wind { wind_speed, .. } => Some(*wind_speed),
        }
    }
}

impl std::fmt::Display for LoadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// How a load's scale factor is derived from `(scale_to, load_value)`
///
/// `Custom` holds a plain function pointer and is skipped by serde.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum ScaleMethod {
    /// `scale_to / load_value`
    #[default]
    Ratio,
    /// `(scale_to / load_value)²`, wind pressure scales with velocity squared
    VelocitySquared,
    #[serde(skip)]
    Custom(ScaleFn),
}

impl ScaleMethod {
    /// Apply the method to a target and a reference value
    ///
    /// # Example
    /// ```
    /// use combo_core::loads::ScaleMethod;
    ///
    /// assert_eq!(ScaleMethod::Ratio.apply(10.0, 4.0), 2.5);
    /// assert_eq!(ScaleMethod::VelocitySquared.apply(10.0, 5.0), 4.0);
    /// ```
    pub fn apply(&self, scale_to: f64, load_value: f64) -> f64 {
        match self {
            ScaleMethod::Ratio => scale_to / load_value,
            ScaleMethod::VelocitySquared => (scale_to / load_value).powi(2),
            ScaleMethod::Custom(func) => func(scale_to, load_value),
        }
    }
}

impl PartialEq for ScaleMethod {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScaleMethod::Ratio, ScaleMethod::Ratio) => true,
            (ScaleMethod::VelocitySquared, ScaleMethod::VelocitySquared) => true,
            (ScaleMethod::Custom(a), ScaleMethod::Custom(b)) => *a as usize == *b as usize,
            _ => false,
        }
    }
}
