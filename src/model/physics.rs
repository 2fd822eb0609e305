//! Torque balance computation
//!
//! Pure function of the placed items plus the current beam half-span.
//! Sign convention: right-heavy is positive torque and a positive angle.

use crate::consts::{DAMPING_DIVISOR_BASE, MAX_ANGLE};

use super::weight::{Side, WeightItem};

/// Physics readout for one beam configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Balance {
    /// Beam tilt in degrees, clamped to [-MAX_ANGLE, MAX_ANGLE]
    pub angle_deg: f32,
    /// Sum of weights left of the pivot (kg)
    pub left_weight: u32,
    /// Sum of weights right of the pivot (kg)
    pub right_weight: u32,
}

/// Compute the torque balance of `items` over a beam of the given half-span.
///
/// Torque per item is `weight * |position_factor * half_width|`. The raw
/// angle is the torque difference over a damping divisor that scales with
/// the half-span (`half_width / DAMPING_DIVISOR_BASE`), so the tilt reads
/// the same at any beam size; damping applies before the clamp.
pub fn balance(items: &[WeightItem], half_width: f32) -> Balance {
    let mut left_torque = 0.0f32;
    let mut right_torque = 0.0f32;
    let mut left_weight = 0u32;
    let mut right_weight = 0u32;

    for item in items {
        let torque = item.weight as f32 * (item.position_factor * half_width).abs();
        match item.side() {
            Side::Left => {
                left_torque += torque;
                left_weight += item.weight;
            }
            Side::Right => {
                right_torque += torque;
                right_weight += item.weight;
            }
        }
    }

    let damping_divisor = half_width / DAMPING_DIVISOR_BASE;
    let raw_angle = (right_torque - left_torque) / damping_divisor;

    Balance {
        angle_deg: raw_angle.clamp(-MAX_ANGLE, MAX_ANGLE),
        left_weight,
        right_weight,
    }
}
