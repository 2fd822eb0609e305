//! Placed weight entity
//!
//! A `WeightItem` is created once at a valid placement and never mutated;
//! the only removal path is a full reset of the owning model.

use serde::{Deserialize, Serialize};

use crate::consts::{DEADZONE, MAX_WEIGHT, MIN_WEIGHT};

/// Which side of the pivot an item sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Why a placement was rejected
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("weight {0} outside {MIN_WEIGHT}..={MAX_WEIGHT}")]
    WeightOutOfRange(u32),
    #[error("position factor {0} outside [-1, 1]")]
    FactorOutOfRange(f32),
    #[error("position factor {0} within pivot deadzone")]
    InsideDeadzone(f32),
}

/// One placed block: weight magnitude plus normalized distance from the pivot.
///
/// `position_factor` is the canonical, resolution-independent position:
/// -1 = left beam tip, 0 = pivot, +1 = right beam tip. It survives
/// serialization unchanged even if the beam is later rendered at a
/// different size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightItem {
    /// Insertion-order identifier (monotonic, not used by physics)
    pub id: u64,
    /// Block weight in kg
    pub weight: u32,
    /// Signed normalized distance from the pivot, in [-1, 1]
    pub position_factor: f32,
}

impl WeightItem {
    /// Validate and construct. Callers are expected to have done the
    /// deadzone check already; a deadzone factor is still rejected here.
    pub fn new(id: u64, weight: u32, position_factor: f32) -> Result<Self, PlacementError> {
        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
            return Err(PlacementError::WeightOutOfRange(weight));
        }
        if !position_factor.is_finite() || position_factor.abs() > 1.0 {
            return Err(PlacementError::FactorOutOfRange(position_factor));
        }
        if position_factor.abs() < DEADZONE {
            return Err(PlacementError::InsideDeadzone(position_factor));
        }
        Ok(Self {
            id,
            weight,
            position_factor,
        })
    }

    /// Side classification. Factor 0 is unconstructible, so negative means
    /// left and everything else means right.
    #[inline]
    pub fn side(&self) -> Side {
        if self.position_factor < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_construction() {
        let item = WeightItem::new(1, 5, -0.6).unwrap();
        assert_eq!(item.weight, 5);
        assert_eq!(item.position_factor, -0.6);
        assert_eq!(item.side(), Side::Left);
    }

    #[test]
    fn test_weight_bounds() {
        assert_eq!(
            WeightItem::new(1, 0, 0.5),
            Err(PlacementError::WeightOutOfRange(0))
        );
        assert_eq!(
            WeightItem::new(1, 11, 0.5),
            Err(PlacementError::WeightOutOfRange(11))
        );
        assert!(WeightItem::new(1, 1, 0.5).is_ok());
        assert!(WeightItem::new(1, 10, 0.5).is_ok());
    }

    #[test]
    fn test_deadzone_rejected() {
        assert_eq!(
            WeightItem::new(1, 5, 0.0),
            Err(PlacementError::InsideDeadzone(0.0))
        );
        assert_eq!(
            WeightItem::new(1, 5, 0.019),
            Err(PlacementError::InsideDeadzone(0.019))
        );
        // Boundary is inclusive-valid
        assert!(WeightItem::new(1, 5, 0.02).is_ok());
        assert!(WeightItem::new(1, 5, -0.02).is_ok());
    }

    #[test]
    fn test_factor_range_rejected() {
        assert!(matches!(
            WeightItem::new(1, 5, 1.5),
            Err(PlacementError::FactorOutOfRange(_))
        ));
        assert!(matches!(
            WeightItem::new(1, 5, f32::NAN),
            Err(PlacementError::FactorOutOfRange(_))
        ));
        assert!(WeightItem::new(1, 5, 1.0).is_ok());
        assert!(WeightItem::new(1, 5, -1.0).is_ok());
    }

    #[test]
    fn test_serialized_field_names() {
        let item = WeightItem::new(7, 3, 0.25).unwrap();
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"positionFactor\":"));
        assert!(json.contains("\"weight\":3"));
    }
}
