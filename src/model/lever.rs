//! Lever state and mutation operations
//!
//! The model owns the append-only list of placed weights plus the seeded
//! RNG used for weight draws. Persistence and rendering are driven by the
//! caller after each mutation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{DEADZONE, MAX_WEIGHT, MIN_WEIGHT};
use crate::persistence::SavedItem;

use super::physics::{self, Balance};
use super::weight::{PlacementError, WeightItem};

/// The seesaw model: ordered placed weights and the draw RNG.
#[derive(Debug, Clone)]
pub struct LeverModel {
    items: Vec<WeightItem>,
    rng: Pcg32,
    next_id: u64,
}

impl LeverModel {
    /// Create an empty model. The seed fixes the weight-draw sequence,
    /// so tests can replay exact scenarios.
    pub fn new(seed: u64) -> Self {
        Self {
            items: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Placed items in insertion order
    pub fn items(&self) -> &[WeightItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop a randomly weighted block at the given position factor.
    ///
    /// Returns `None` without touching the RNG when the factor lands in the
    /// pivot deadzone or is unusable; the collection is unchanged in that
    /// case. Otherwise draws a uniform weight in `MIN_WEIGHT..=MAX_WEIGHT`,
    /// appends the item and returns it.
    pub fn add_random_weight(&mut self, position_factor: f32) -> Option<&WeightItem> {
        if !position_factor.is_finite()
            || position_factor.abs() > 1.0
            || position_factor.abs() < DEADZONE
        {
            return None;
        }
        let weight = self.rng.random_range(MIN_WEIGHT..=MAX_WEIGHT);
        self.add_weight(weight, position_factor).ok()
    }

    /// Place a block with an explicit weight. Used by tests and anywhere
    /// randomness is not wanted.
    pub fn add_weight(
        &mut self,
        weight: u32,
        position_factor: f32,
    ) -> Result<&WeightItem, PlacementError> {
        let item = WeightItem::new(self.next_id, weight, position_factor)?;
        self.next_id += 1;
        self.items.push(item);
        Ok(self.items.last().unwrap())
    }

    /// Remove every placed weight. The beam returns to level on the next
    /// `balance` call.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Torque balance over the current items for a beam of the given
    /// half-span. Pure readout; call as often as needed.
    pub fn balance(&self, half_width: f32) -> Balance {
        physics::balance(&self.items, half_width)
    }

    /// Replace the collection with sanitized saved items.
    ///
    /// Legacy pixel-schema items are upgraded via `SavedItem::resolve_factor`.
    /// Out-of-bounds weights and factors are clamped; items whose position is
    /// missing, non-finite or inside the deadzone are dropped. Returns the
    /// number of items admitted. ID allocation resumes past the largest
    /// admitted id.
    pub fn load_from(&mut self, saved: &[SavedItem]) -> usize {
        self.items.clear();
        let mut max_id = 0u64;
        for s in saved {
            let Some(factor) = s.resolve_factor() else {
                continue;
            };
            if !factor.is_finite() {
                continue;
            }
            let factor = factor.clamp(-1.0, 1.0);
            if factor.abs() < DEADZONE {
                continue;
            }
            let weight = s.weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
            if let Ok(item) = WeightItem::new(s.id, weight, factor) {
                max_id = max_id.max(s.id);
                self.items.push(item);
            }
        }
        let dropped = saved.len() - self.items.len();
        if dropped > 0 {
            log::warn!("Dropped {} unusable saved items", dropped);
        }
        self.next_id = self.next_id.max(max_id + 1);
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_HALF_WIDTH;

    #[test]
    fn test_add_random_weight_appends_in_order() {
        let mut model = LeverModel::new(42);
        model.add_random_weight(-0.5).unwrap();
        model.add_random_weight(0.7).unwrap();
        model.add_random_weight(0.3).unwrap();

        let items = model.items();
        assert_eq!(items.len(), 3);
        assert!(items.windows(2).all(|w| w[0].id < w[1].id));
        for item in items {
            assert!((MIN_WEIGHT..=MAX_WEIGHT).contains(&item.weight));
        }
    }

    #[test]
    fn test_deadzone_click_is_noop() {
        let mut model = LeverModel::new(42);
        assert!(model.add_random_weight(0.0).is_none());
        assert!(model.add_random_weight(0.019).is_none());
        assert!(model.add_random_weight(-0.01).is_none());
        assert!(model.is_empty());
    }

    #[test]
    fn test_deadzone_noop_does_not_advance_rng() {
        let mut with_noops = LeverModel::new(7);
        assert!(with_noops.add_random_weight(0.0).is_none());
        assert!(with_noops.add_random_weight(0.01).is_none());
        let a = with_noops.add_random_weight(0.5).unwrap().weight;

        let mut clean = LeverModel::new(7);
        let b = clean.add_random_weight(0.5).unwrap().weight;

        assert_eq!(a, b);
    }

    #[test]
    fn test_unusable_factor_is_noop() {
        let mut model = LeverModel::new(42);
        assert!(model.add_random_weight(f32::NAN).is_none());
        assert!(model.add_random_weight(1.5).is_none());
        assert!(model.is_empty());
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = LeverModel::new(1234);
        let mut b = LeverModel::new(1234);
        let clicks = [-0.8, 0.3, 0.9, -0.2, 0.5];
        for &f in &clicks {
            let wa = a.add_random_weight(f).unwrap().weight;
            let wb = b.add_random_weight(f).unwrap().weight;
            assert_eq!(wa, wb);
        }
    }

    #[test]
    fn test_clear_resets_to_level() {
        let mut model = LeverModel::new(42);
        model.add_weight(8, 0.9).unwrap();
        model.add_weight(3, -0.4).unwrap();
        model.clear();
        assert!(model.is_empty());
        assert_eq!(model.balance(REFERENCE_HALF_WIDTH), Balance::default());
    }

    #[test]
    fn test_no_stored_item_in_deadzone() {
        let mut model = LeverModel::new(99);
        for f in [-1.0, -0.02, 0.0, 0.01, 0.02, 0.5, 1.0] {
            let _ = model.add_random_weight(f);
        }
        assert!(
            model
                .items()
                .iter()
                .all(|i| i.position_factor.abs() >= DEADZONE)
        );
    }

    #[test]
    fn test_load_from_sanitizes() {
        let mut model = LeverModel::new(42);
        let saved = vec![
            // Fine as-is
            SavedItem {
                id: 3,
                weight: 5,
                position_factor: Some(0.5),
                distance: None,
                position: None,
            },
            // Weight clamped to MAX_WEIGHT
            SavedItem {
                id: 4,
                weight: 99,
                position_factor: Some(-0.5),
                distance: None,
                position: None,
            },
            // Factor clamped to the beam end
            SavedItem {
                id: 5,
                weight: 2,
                position_factor: Some(1.8),
                distance: None,
                position: None,
            },
            // Deadzone: dropped
            SavedItem {
                id: 6,
                weight: 2,
                position_factor: Some(0.001),
                distance: None,
                position: None,
            },
            // No position at all: dropped
            SavedItem {
                id: 7,
                weight: 2,
                position_factor: None,
                distance: None,
                position: None,
            },
        ];

        assert_eq!(model.load_from(&saved), 3);
        let items = model.items();
        assert_eq!(items[0].weight, 5);
        assert_eq!(items[1].weight, MAX_WEIGHT);
        assert_eq!(items[2].position_factor, 1.0);
    }

    #[test]
    fn test_load_from_resumes_ids() {
        let mut model = LeverModel::new(42);
        let saved = vec![SavedItem {
            id: 10,
            weight: 5,
            position_factor: Some(0.5),
            distance: None,
            position: None,
        }];
        model.load_from(&saved);
        let next = model.add_weight(3, -0.3).unwrap();
        assert!(next.id > 10);
    }

    #[test]
    fn test_load_from_empty_resets() {
        let mut model = LeverModel::new(42);
        model.add_weight(5, 0.5).unwrap();
        assert_eq!(model.load_from(&[]), 0);
        assert!(model.is_empty());
    }
}
