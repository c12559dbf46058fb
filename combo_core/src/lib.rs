//! # combo_core - Structural Load Combination Engine
//!
//! `combo_core` expands grouped structural loads into the full set of
//! factored load combinations a design code asks for. Loads are collected
//! into groups, each group being a strategy for producing candidate cases
//! (fixed factors, scaled values, one-at-a-time loads, or loads acting at
//! several directions with interpolation between them). A load case then
//! multiplies its groups together into the final combinations.
//!
//! ## Design Philosophy
//!
//! - **Arena of loads**: every load lives once in a [`LoadTable`]; groups refer to it by number
//! - **Closed variants**: load and group behavior are enums, matched exhaustively
//! - **JSON-First**: all data types implement Serialize/Deserialize
//! - **Rich Errors**: structured [`CombError`] values with stable error codes
//!
//! ## Quick Start
//!
//! ```rust
//! use combo_core::{GroupFactor, Load, LoadCase, LoadCombinations, LoadGroup};
//!
//! let mut combos = LoadCombinations::new();
//! combos.add_loads(vec![
//!     Load::plain(1, "Dead", "G"),
//!     Load::scalable(2, "Office", "Q1", 2.5),
//!     Load::scalable(3, "Storage", "Q2", 5.0),
//! ]).unwrap();
//!
//! let dead = LoadGroup::builder("Permanent", "G").load(1).factors([0.9, 1.2]).build().unwrap();
//! let live = LoadGroup::builder("Imposed", "Q").loads([2, 3]).exclusive().factors([0.0, 1.5]).build().unwrap();
//! combos.add_group(dead.clone()).unwrap();
//! combos.add_group(live.clone()).unwrap();
//!
//! let mut uls = LoadCase::new("Strength", 1, "ULS");
//! uls.add_group(GroupFactor::new(dead, 1.0).unwrap()).unwrap();
//! uls.add_group(GroupFactor::new(live, 1.0).unwrap()).unwrap();
//! assert_eq!(uls.combination_count(), 2 * 4);
//! combos.add_case(uls).unwrap();
//!
//! let generated = combos.generate("Strength").unwrap();
//! assert_eq!(generated.len(), 8);
//! ```
//!
//! ## Modules
//!
//! - [`loads`] - Load definitions and the load table
//! - [`load_factor`] - A load with its factor components
//! - [`interpolation`] - Directional interpolation functions
//! - [`groups`] - Load group strategies and the group builder
//! - [`load_case`] - Load cases and their cross-product expansion
//! - [`combination`] - Generated combinations
//! - [`registry`] - Top-level container of loads, groups and cases
//! - [`settings`] - Engine defaults, loadable from TOML
//! - [`errors`] - Structured error types

pub mod combination;
pub mod errors;
pub mod groups;
pub mod interpolation;
pub mod load_case;
pub mod load_factor;
pub mod loads;
pub mod registry;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use combination::Combination;
pub use errors::{CombError, CombResult};
pub use groups::{GroupBuilder, GroupKey, GroupKind, LoadGroup, Scaling};
pub use interpolation::Interpolation;
pub use load_case::{GroupFactor, LoadCase};
pub use load_factor::{LoadFactor, LoadFactorInfo};
pub use loads::{Load, LoadKey, LoadKind, LoadNo, LoadTable, ScaleMethod};
pub use registry::LoadCombinations;
pub use settings::CombinationSettings;
