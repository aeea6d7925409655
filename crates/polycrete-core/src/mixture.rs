//! Mixture computation
//!
//! Converts a batch's total mass into component quantities using fixed
//! proportions. Each component is rounded to whole grams independently;
//! the rounding remainder is absorbed into the putty share so the
//! components always sum back to the batch total.

use crate::models::MixtureResult;

/// Density of the cast material, grams per milliliter
pub const DENSITY_G_PER_ML: f64 = 2.0;

// Component proportions of the total batch mass. Must sum to 1.
const WATER_PCT: f64 = 0.20;
const BOND_PCT: f64 = 0.05;
const WHITE_CEMENT_PCT: f64 = 0.15;
const PUTTY_PCT: f64 = 0.60;

/// Compute component quantities for a batch of `total_g` grams.
///
/// Non-positive totals produce an all-zero result. For any other input
/// the four outputs sum exactly to `total_g` rounded to the nearest
/// gram; the putty share soaks up whatever the independent per-component
/// rounding drifted by, so it can be slightly off its nominal 60%.
pub fn compute_mixture(total_g: f64) -> MixtureResult {
    if total_g <= 0.0 {
        return MixtureResult::default();
    }

    let water = (total_g * WATER_PCT).round() as i64;
    let bond = (total_g * BOND_PCT).round() as i64;
    let white_cement = (total_g * WHITE_CEMENT_PCT).round() as i64;
    let mut putty = (total_g * PUTTY_PCT).round() as i64;

    let target = total_g.round() as i64;
    let sum = water + bond + white_cement + putty;
    if sum != target {
        putty += target - sum;
    }

    MixtureResult {
        water,
        bond,
        white_cement,
        putty,
    }
}
