//! Load definitions and the load table
//!
//! Loads are owned by a single [`LoadTable`] keyed by `load_no`. Groups,
//! cases and the aggregator refer to loads by number only, so every
//! consumer always sees the one canonical definition of a load.
//!
//! # Overview
//!
//! - [`Load`] - A named, numbered load with an optional magnitude and direction
//! - [`LoadKind`] - Closed set of load capabilities (plain, scalable, rotatable, wind)
//! - [`ScaleMethod`] - How a load is scaled to a design value
//! - [`LoadTable`] - Arena of loads keyed by number
//! - [`LoadKey`] - Single-criterion lookup (number, name or object)
//!
//! # Example
//!
//! ```
//! use combo_core::loads::{Load, LoadKey, LoadTable};
//!
//! let mut table = LoadTable::new();
//! table.insert(Load::plain(1, "Dead", "G")).unwrap();
//! table.insert(Load::scalable(2, "Live", "Q", 2.5)).unwrap();
//!
//! assert_eq!(table.find(&LoadKey::Name("Live")), Some(2));
//! assert_eq!(table.find(&LoadKey::Number(7)), None);
//! ```

pub mod load;
pub mod load_types;
pub mod table;

pub use load::Load;
pub use load_types::{LoadKind, ScaleFn, ScaleMethod};
pub use table::LoadTable;

/// Load identity key
pub type LoadNo = u32;

/// Normalize an angle in degrees to [0, 360)
///
/// # Example
/// ```
/// use combo_core::loads::normalize_angle;
///
/// assert_eq!(normalize_angle(360.0), 0.0);
/// assert_eq!(normalize_angle(-45.0), 315.0);
/// ```
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Identifies one load by exactly one criterion
#[derive(Debug, Clone, Copy)]
pub enum LoadKey<'a> {
    Number(LoadNo),
    Name(&'a str),
    /// Matches a load equal in every field
    Load(&'a Load),
}

impl LoadKey<'_> {
    /// Whether `load` satisfies this key
    pub fn matches(&self, load: &Load) -> bool {
        match self {
            LoadKey::Number(no) => load.load_no() == *no,
            LoadKey::Name(name) => load.load_name == *name,
            LoadKey::Load(other) => *other == load,
        }
    }
}

impl std::fmt::Display for LoadKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadKey::Number(no) => write!(f, "load_no={}", no),
            LoadKey::Name(name) => write!(f, "load_name='{}'", name),
            LoadKey::Load(load) => write!(f, "load={}", load),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(359.5), 359.5);
        assert_eq!(normalize_angle(720.0), 0.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert!(normalize_angle(-1e-18) < 360.0);
    }

    #[test]
    fn test_load_key_matches() {
        let load = Load::scalable(4, "Live", "Q", 2.0);
        assert!(LoadKey::Number(4).matches(&load));
        assert!(LoadKey::Name("Live").matches(&load));
        assert!(LoadKey::Load(&load.clone()).matches(&load));
        assert!(!LoadKey::Load(&Load::scalable(4, "Live", "Q", 3.0)).matches(&load));
    }

    #[test]
    fn test_load_key_display() {
        assert_eq!(LoadKey::Number(3).to_string(), "load_no=3");
        assert_eq!(LoadKey::Name("Dead").to_string(), "load_name='Dead'");
    }
}
