//! Directional case generation for rotational and wind groups
//!
//! The member loads are laid out around the compass. Symmetrical loads are
//! mirrored 180° with a sign flip where no other load already sits, and a
//! load at 0° is repeated at 360° so the seam needs no special handling.
//! Each required angle either hits a defined direction exactly or is
//! interpolated between its two neighbours.

use std::collections::BTreeMap;

use tracing::trace;

use super::scaling::Scaling;
use super::Case;
use crate::errors::{CombError, CombResult};
use crate::interpolation::Interpolation;
use crate::load_factor::{LoadFactor, LoadFactorInfo};
use crate::loads::{normalize_angle, Load, LoadNo};

/// Directions closer than this, in degrees, are the same direction
const ANGLE_TOLERANCE: f64 = 1e-9;

fn same_angle(a: f64, b: f64) -> bool {
    (a - b).abs() <= ANGLE_TOLERANCE
}

/// One direction in the working angle set
#[derive(Debug, Clone, Copy)]
pub(crate) struct AngleEntry<'a> {
    pub angle: f64,
    pub load: &'a Load,
    /// -1.0 for a synthesized 180° mirror
    pub sign: f64,
}

/// Build the sorted working angle set for a group's members
pub(crate) fn angle_set<'a>(group_name: &str, members: &[&'a Load]) -> CombResult<Vec<AngleEntry<'a>>> {
    let mut entries: Vec<AngleEntry<'a>> = Vec::with_capacity(members.len() * 2 + 1);

    for load in members {
        let angle = load.angle().ok_or_else(|| {
            CombError::invalid_input(
                "angle",
                "None",
                format!("Load {} ('{}') in group '{}' has no direction", load.load_no(), load.load_name, group_name),
            )
        })?;
        if let Some(other) = entries.iter().find(|e| same_angle(e.angle, angle)) {
            return Err(CombError::invalid_input(
                "angle",
                angle.to_string(),
                format!(
                    "Loads {} and {} in group '{}' share the same direction",
                    other.load.load_no(), load.load_no(), group_name
                ),
            ));
        }
        entries.push(AngleEntry { angle, load, sign: 1.0 });
    }
    entries.sort_by(|a, b| a.angle.total_cmp(&b.angle));

    let explicit = entries.len();
    for i in 0..explicit {
        let entry = entries[i];
        if !entry.load.symmetrical() {
            continue;
        }
        let mirror = normalize_angle(entry.angle + 180.0);
        if entries.iter().any(|e| same_angle(e.angle, mirror)) {
            continue;
        }
        entries.push(AngleEntry {
            angle: mirror,
            load: entry.load,
            sign: -1.0,
        });
    }

    if let Some(zero) = entries.iter().find(|e| same_angle(e.angle, 0.0)).copied() {
        entries.push(AngleEntry { angle: 360.0, ..zero });
    }

    entries.sort_by(|a, b| a.angle.total_cmp(&b.angle));
    Ok(entries)
}

/// Neighbouring directions around `angle`, with wrapped angles adjusted by ±360°
fn neighbours<'e, 'a>(entries: &'e [AngleEntry<'a>], angle: f64) -> Option<((f64, &'e AngleEntry<'a>), (f64, &'e AngleEntry<'a>))> {
    let first = entries.first()?;
    let last = entries.last()?;

    let below = entries
        .iter()
        .rev()
        .find(|e| e.angle <= angle)
        .map(|e| (e.angle, e))
        .unwrap_or((last.angle - 360.0, last));
    let above = entries
        .iter()
        .find(|e| e.angle >= angle)
        .map(|e| (e.angle, e))
        .unwrap_or((first.angle + 360.0, first));

    Some((below, above))
}

fn directional_factor(
    entry: &AngleEntry<'_>,
    base_factor: f64,
    scale_factor: f64,
    rotational_factor: f64,
    info: &LoadFactorInfo,
) -> CombResult<LoadFactor> {
    Ok(LoadFactor::new(entry.load.clone())
        .with_base_factor(base_factor)
        .with_scale_factor(scale_factor)
        .with_rotational_factor(rotational_factor)
        .with_symmetry_factor(entry.sign)?
        .with_info(LoadFactorInfo {
            symmetric: Some(entry.sign < 0.0),
            ..info.clone()
        }))
}

/// Generate the (factor × required angle) cases of a directional group
pub(crate) fn generate(
    group_name: &str,
    members: &[&Load],
    factors: &[f64],
    scaling: &Scaling,
    angles: &[f64],
    interpolation: Interpolation,
    scales: &BTreeMap<LoadNo, f64>,
) -> CombResult<Vec<Case>> {
    let entries = angle_set(group_name, members)?;
    if entries.is_empty() && !angles.is_empty() && !factors.is_empty() {
        return Err(CombError::invalid_input(
            "loads",
            "[]",
            format!("Group '{}' needs at least one directional load to resolve angles {:?}", group_name, angles),
        ));
    }

    let scale_of = |load: &Load| scales.get(&load.load_no()).copied().unwrap_or(1.0);
    let mut cases = Vec::with_capacity(factors.len() * angles.len());

    for &factor in factors {
        for &angle in angles {
            let info = LoadFactorInfo {
                angle: Some(angle),
                ..scaling.info()
            };

            if let Some(entry) = entries.iter().find(|e| same_angle(e.angle, angle)) {
                let lf = directional_factor(entry, factor, scale_of(entry.load), 1.0, &info)?;
                cases.push(vec![lf]);
                continue;
            }

            let ((min_angle, min_entry), (max_angle, max_entry)) = match neighbours(&entries, angle) {
                Some(found) => found,
                None => continue,
            };
            let gap = max_angle - min_angle;
            let offset = angle - min_angle;
            let (w_left, w_right) = interpolation.apply(gap, offset)?;

            trace!(
                event = "angle_interpolated",
                group = group_name,
                angle,
                left = min_entry.load.load_no(),
                right = max_entry.load.load_no(),
                w_left,
                w_right,
            );

            cases.push(vec![
                directional_factor(min_entry, factor, scale_of(min_entry.load), w_left, &info)?,
                directional_factor(max_entry, factor, scale_of(max_entry.load), w_right, &info)?,
            ]);
        }
    }

    Ok(cases)
}
