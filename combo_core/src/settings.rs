//! # Settings
//!
//! Engine-wide defaults, loadable from TOML. Every field has a default, so
//! an empty file (or no file) gives a working configuration.
//!
//! ## Example
//!
//! ```rust
//! use combo_core::interpolation::Interpolation;
//! use combo_core::settings::CombinationSettings;
//!
//! let settings = CombinationSettings::from_toml_str(r#"
//!     allow_duplicates = true
//!     title_precision = 2
//!     rotational_interpolation = "linear"
//! "#).unwrap();
//!
//! assert!(settings.allow_duplicates);
//! assert_eq!(settings.rotational_interpolation, Interpolation::Linear);
//! assert_eq!(settings.wind_interpolation, Interpolation::Wind85);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CombError, CombResult};
use crate::interpolation::Interpolation;

/// Defaults applied by [`LoadCombinations`](crate::registry::LoadCombinations)
/// and the group builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CombinationSettings {
    /// Whether generated combinations may hold several factors for one load
    pub allow_duplicates: bool,

    /// Decimal places used for combination titles
    pub title_precision: usize,

    /// Log a warning before expanding a case with more combinations than this
    pub warn_combination_count: usize,

    /// Default interpolation for rotational groups
    pub rotational_interpolation: Interpolation,

    /// Default interpolation for wind groups
    pub wind_interpolation: Interpolation,
}

impl Default for CombinationSettings {
    fn default() -> Self {
        CombinationSettings {
            allow_duplicates: false,
            title_precision: 3,
            warn_combination_count: 10_000,
            rotational_interpolation: Interpolation::Sine,
            wind_interpolation: Interpolation::Wind85,
        }
    }
}

impl CombinationSettings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(s: &str) -> CombResult<Self> {
        let settings: CombinationSettings = toml::from_str(s).map_err(|e| CombError::SerializationError {
            reason: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> CombResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CombError::file_error("read", path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    /// Serialize to a TOML string
    pub fn to_toml_string(&self) -> CombResult<String> {
        toml::to_string(self).map_err(|e| CombError::SerializationError { reason: e.to_string() })
    }

    /// Check value ranges
    pub fn validate(&self) -> CombResult<()> {
        if self.title_precision > 12 {
            return Err(CombError::invalid_input(
                "title_precision",
                self.title_precision.to_string(),
                "Title precision must be at most 12 decimal places",
            ));
        }
        if self.warn_combination_count == 0 {
            return Err(CombError::invalid_input(
                "warn_combination_count",
                "0",
                "Warning threshold must be positive",
            ));
        }
        Ok(())
    }
}
