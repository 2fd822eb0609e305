//! Deterministic lever model
//!
//! All seesaw logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable insertion order (append-only item list)
//! - No rendering or platform dependencies

pub mod lever;
pub mod physics;
pub mod weight;

pub use lever::LeverModel;
pub use physics::{Balance, balance};
pub use weight::{PlacementError, Side, WeightItem};
