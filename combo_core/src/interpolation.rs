//! # Directional Interpolation
//!
//! Pure weighting functions used when a combination is required at an angle
//! that falls between two defined load directions. Each function takes the
//! angular `range` between the two neighbouring loads and the `x` offset of
//! the required angle from the left neighbour (both in degrees) and returns
//! `(left_weight, right_weight)`.
//!
//! ## Available Functions
//!
//! | Function           | Range      | Weights                                           |
//! |--------------------|------------|---------------------------------------------------|
//! | [`linear_interp`]  | any > 0    | `(range - x) / range`, `1 - left`                  |
//! | [`sine_interp_90`] | 90° only   | `cos x`, `sin x`                                   |
//! | [`sine_interp`]    | any > 0    | rescaled to 90°, then `sine_interp_90`             |
//! | [`wind_interp_85`] | 90° only   | `sine_interp_90` × `1.20208 - 0.20208·|cos 2x|`    |
//!
//! `wind_interp_85` reproduces the AS 4324 correction for wind acting on a
//! non-orthogonal direction: at 45° both components are 0.85 of the
//! orthogonal value.
//!
//! ## Example
//!
//! ```rust
//! use combo_core::interpolation::{linear_interp, wind_interp_85};
//!
//! let (left, right) = linear_interp(90.0, 30.0).unwrap();
//! assert!((left + right - 1.0).abs() < 1e-12);
//!
//! let (left, right) = wind_interp_85(90.0, 45.0).unwrap();
//! assert!((left - 0.85).abs() < 1e-5 && (right - 0.85).abs() < 1e-5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CombError, CombResult};

/// Signature of a caller supplied interpolation function
pub type InterpFn = fn(f64, f64) -> CombResult<(f64, f64)>;

/// Range tolerance for the fixed 90° functions
const RANGE_TOLERANCE: f64 = 1e-9;

/// Non-orthogonal wind correction constants (AS 4324)
const WIND_ALPHA_A: f64 = 1.20208;
const WIND_ALPHA_B: f64 = 0.20208;

fn check_offset(range: f64, x: f64) -> CombResult<()> {
    if !(0.0..=range).contains(&x) {
        return Err(CombError::invalid_input(
            "x",
            x.to_string(),
            format!("Offset must lie within [0, {}]", range),
        ));
    }
    Ok(())
}

fn check_range_90(range: f64) -> CombResult<()> {
    if (range - 90.0).abs() > RANGE_TOLERANCE {
        return Err(CombError::invalid_input(
            "range",
            range.to_string(),
            "Range must be exactly 90 degrees",
        ));
    }
    Ok(())
}

/// Linear interpolation across any positive range
pub fn linear_interp(range: f64, x: f64) -> CombResult<(f64, f64)> {
    if !(range > 0.0) || !range.is_finite() {
        return Err(CombError::invalid_input(
            "range",
            range.to_string(),
            "Range must be a positive finite angle",
        ));
    }
    check_offset(range, x)?;

    let left = (range - x) / range;
    Ok((left, 1.0 - left))
}

/// Sine interpolation across a 90° range: `(cos x, sin x)`
pub fn sine_interp_90(range: f64, x: f64) -> CombResult<(f64, f64)> {
    check_range_90(range)?;
    check_offset(90.0, x)?;

    let rad = x.to_radians();
    Ok((rad.cos(), rad.sin()))
}

/// Sine interpolation across any positive range, rescaled onto 90°
pub fn sine_interp(range: f64, x: f64) -> CombResult<(f64, f64)> {
    if !(range > 0.0) || !range.is_finite() {
        return Err(CombError::invalid_input(
            "range",
            range.to_string(),
            "Range must be a positive finite angle",
        ));
    }
    check_offset(range, x)?;

    // clamp guards against rounding just above 90 after rescaling
    let scaled = (x * 90.0 / range).clamp(0.0, 90.0);
    sine_interp_90(90.0, scaled)
}

/// AS 4324 non-orthogonal wind interpolation across a 90° range
pub fn wind_interp_85(range: f64, x: f64) -> CombResult<(f64, f64)> {
    let (left, right) = sine_interp_90(range, x)?;
    let alpha = WIND_ALPHA_A - WIND_ALPHA_B * (2.0 * x.to_radians()).cos().abs();
    Ok((left * alpha, right * alpha))
}

/// Selectable interpolation function
///
/// `Custom` holds a plain function pointer and is skipped by serde.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Linear,
    #[default]
    Sine,
    #[serde(rename = "sine_90")]
    Sine90,
    #[serde(rename = "wind_85")]
    Wind85,
    #[serde(skip)]
    Custom(InterpFn),
}

impl Interpolation {
    /// Evaluate the weights for a neighbour gap and offset
    pub fn apply(&self, range: f64, x: f64) -> CombResult<(f64, f64)> {
        match self {
            Interpolation::Linear => linear_interp(range, x),
            Interpolation::Sine => sine_interp(range, x),
            Interpolation::Sine90 => sine_interp_90(range, x),
            Interpolation::Wind85 => wind_interp_85(range, x),
            Interpolation::Custom(func) => func(range, x),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Interpolation::Linear => "linear",
            Interpolation::Sine => "sine",
            Interpolation::Sine90 => "sine_90",
            Interpolation::Wind85 => "wind_85",
            Interpolation::Custom(_) => "custom",
        }
    }
}

impl PartialEq for Interpolation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Interpolation::Custom(a), Interpolation::Custom(b)) => *a as usize == *b as usize,
            (Interpolation::Custom(_), _) | (_, Interpolation::Custom(_)) => false,
            _ => self.name() == other.name(),
        }
    }
}
