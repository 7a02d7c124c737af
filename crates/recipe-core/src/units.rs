//! Mass and volume conversion tables.
//!
//! The two categories are disjoint ratio spaces, each normalized to a
//! base unit (grams, milliliters). Crossing between them requires an
//! explicit density in g/ml — density varies per ingredient and is not
//! tracked by the recipe itself, so callers that don't know better pass 1
//! (water-like).

use crate::error::{RecipeError, Result};
use std::fmt;

/// Ratios to milliliters. Keys are lowercase, some abbreviated.
pub const VOLUME_RATIOS: &[(&str, f64)] = &[
    ("ml", 1.0),
    ("liter", 1000.0),
    ("cup", 236.5875),
    ("tbsp", 14.7868),
    ("tsp", 4.92892),
    ("fl oz", 29.5735),
];

/// Ratios to grams.
pub const MASS_RATIOS: &[(&str, f64)] = &[
    ("grams", 1.0),
    ("kg", 1000.0),
    ("lbs", 453.592),
    ("oz", 28.3495),
];

pub const MASS_BASE: &str = "grams";
pub const VOLUME_BASE: &str = "ml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Mass,
    Volume,
}

impl UnitKind {
    pub fn base(self) -> &'static str {
        match self {
            UnitKind::Mass => MASS_BASE,
            UnitKind::Volume => VOLUME_BASE,
        }
    }

    fn ratios(self) -> &'static [(&'static str, f64)] {
        match self {
            UnitKind::Mass => MASS_RATIOS,
            UnitKind::Volume => VOLUME_RATIOS,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Mass => f.write_str("mass"),
            UnitKind::Volume => f.write_str("volume"),
        }
    }
}

/// Which category a unit belongs to, or `None` for unconvertible units.
pub fn kind(unit: &str) -> Option<UnitKind> {
    if MASS_RATIOS.iter().any(|(u, _)| *u == unit) {
        Some(UnitKind::Mass)
    } else if VOLUME_RATIOS.iter().any(|(u, _)| *u == unit) {
        Some(UnitKind::Volume)
    } else {
        None
    }
}

fn ratio(unit: &str, k: UnitKind) -> Result<f64> {
    k.ratios()
        .iter()
        .find(|(u, _)| *u == unit)
        .map(|(_, r)| *r)
        .ok_or_else(|| RecipeError::UnknownUnit(unit.to_string()))
}

/// Convert within a single category: `amount * ratio[src] / ratio[dest]`.
///
/// Errors if either unit is unknown or the units live in different
/// categories; use [`convert_with_density`] to cross mass and volume.
pub fn convert(dest: &str, src: &str, amount: f64) -> Result<f64> {
    let src_kind = kind(src).ok_or_else(|| RecipeError::UnknownUnit(src.to_string()))?;
    let dest_kind = kind(dest).ok_or_else(|| RecipeError::UnknownUnit(dest.to_string()))?;
    if src_kind != dest_kind {
        return Err(RecipeError::CategoryMismatch {
            src: src.to_string(),
            dest: dest.to_string(),
        });
    }
    Ok(amount * ratio(src, src_kind)? / ratio(dest, dest_kind)?)
}

/// Convert between any two known units, bridging mass and volume through
/// the base units with `density` in g/ml.
pub fn convert_with_density(dest: &str, src: &str, amount: f64, density: f64) -> Result<f64> {
    let src_kind = kind(src).ok_or_else(|| RecipeError::UnknownUnit(src.to_string()))?;
    let dest_kind = kind(dest).ok_or_else(|| RecipeError::UnknownUnit(dest.to_string()))?;

    if src_kind == dest_kind {
        return convert(dest, src, amount);
    }

    // Pivot through the base units: grams = ml * density.
    let in_base = convert(src_kind.base(), src, amount)?;
    let crossed = match src_kind {
        UnitKind::Volume => in_base * density,
        UnitKind::Mass => in_base / density,
    };
    convert(dest, dest_kind.base(), crossed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn kind_lookup() {
        assert_eq!(kind("kg"), Some(UnitKind::Mass));
        assert_eq!(kind("fl oz"), Some(UnitKind::Volume));
        assert_eq!(kind("pinch"), None);
        // Case-sensitive: tables are lowercase.
        assert_eq!(kind("Kg"), None);
    }

    #[test]
    fn mass_to_base() {
        assert!(close(convert("grams", "kg", 2.0).unwrap(), 2000.0));
        assert!(close(convert("grams", "oz", 1.0).unwrap(), 28.3495));
    }

    #[test]
    fn volume_to_base() {
        assert!(close(convert("ml", "liter", 1.5).unwrap(), 1500.0));
        assert!(close(convert("ml", "cup", 1.0).unwrap(), 236.5875));
    }

    #[test]
    fn same_category_round_trip() {
        for (u1, _) in MASS_RATIOS {
            for (u2, _) in MASS_RATIOS {
                let there = convert(u2, u1, 3.25).unwrap();
                let back = convert(u1, u2, there).unwrap();
                assert!(close(back, 3.25), "{u1} -> {u2}");
            }
        }
        for (u1, _) in VOLUME_RATIOS {
            for (u2, _) in VOLUME_RATIOS {
                let there = convert(u2, u1, 0.5).unwrap();
                let back = convert(u1, u2, there).unwrap();
                assert!(close(back, 0.5), "{u1} -> {u2}");
            }
        }
    }

    #[test]
    fn unknown_unit_errors() {
        assert!(matches!(
            convert("grams", "stone", 1.0),
            Err(RecipeError::UnknownUnit(_))
        ));
        assert!(matches!(
            convert("handful", "grams", 1.0),
            Err(RecipeError::UnknownUnit(_))
        ));
    }

    #[test]
    fn category_mismatch_without_density() {
        assert!(matches!(
            convert("grams", "ml", 1.0),
            Err(RecipeError::CategoryMismatch { .. })
        ));
    }

    #[test]
    fn cross_category_at_water_density() {
        // 1 cup of water-like substance weighs 236.5875 g.
        let g = convert_with_density("grams", "cup", 1.0, 1.0).unwrap();
        assert!(close(g, 236.5875));
        let back = convert_with_density("cup", "grams", g, 1.0).unwrap();
        assert!(close(back, 1.0));
    }

    #[test]
    fn cross_category_uses_density() {
        // Oil at 0.9 g/ml: 100 ml -> 90 g.
        assert!(close(
            convert_with_density("grams", "ml", 100.0, 0.9).unwrap(),
            90.0
        ));
        // And back up: 90 g of oil occupies 100 ml.
        assert!(close(
            convert_with_density("ml", "grams", 90.0, 0.9).unwrap(),
            100.0
        ));
    }

    #[test]
    fn cross_category_same_delegates() {
        assert!(close(
            convert_with_density("kg", "grams", 500.0, 0.7).unwrap(),
            0.5
        ));
    }
}
