//! Save/load over LocalStorage
//!
//! The stored form is a JSON array of placed items. Two schemas are
//! admitted on load:
//! - current: `positionFactor` in [-1, 1]
//! - legacy: absolute pixel `distance` (alias `dist`) and `position`,
//!   written against a 250px half-span beam
//!
//! Legacy items are upgraded to a factor on first access after load; the
//! factor is the only in-memory representation. Absent and unparseable
//! stored state both read as "no save".

use serde::{Deserialize, Serialize};

use crate::consts::LEGACY_HALF_WIDTH;
use crate::model::WeightItem;

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "teeter_save";

/// One item as it appears in storage, either schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    #[serde(default)]
    pub id: u64,
    pub weight: u32,
    /// Current schema: normalized factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_factor: Option<f32>,
    /// Legacy schema: signed pixel distance from the pivot
    #[serde(default, alias = "dist", skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    /// Legacy schema: absolute pixel offset from the beam's left edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f32>,
}

impl SavedItem {
    /// Resolve the normalized position, upgrading the legacy pixel schema
    /// by dividing through the half-span it was written against. `None`
    /// means the item carries no usable position and must be dropped.
    pub fn resolve_factor(&self) -> Option<f32> {
        if let Some(factor) = self.position_factor {
            return Some(factor);
        }
        if let Some(distance) = self.distance {
            return Some(distance / LEGACY_HALF_WIDTH);
        }
        self.position
            .map(|p| (p - LEGACY_HALF_WIDTH) / LEGACY_HALF_WIDTH)
    }
}

impl From<&WeightItem> for SavedItem {
    fn from(item: &WeightItem) -> Self {
        Self {
            id: item.id,
            weight: item.weight,
            position_factor: Some(item.position_factor),
            distance: None,
            position: None,
        }
    }
}

/// Serialize the current items to the stored JSON form
pub fn encode(items: &[WeightItem]) -> serde_json::Result<String> {
    let saved: Vec<SavedItem> = items.iter().map(SavedItem::from).collect();
    serde_json::to_string(&saved)
}

/// Parse stored JSON into saved items
pub fn decode(json: &str) -> serde_json::Result<Vec<SavedItem>> {
    serde_json::from_str(json)
}

/// Load saved items from LocalStorage (WASM only).
/// Returns `None` for a first run and for corrupt stored state.
#[cfg(target_arch = "wasm32")]
pub fn load() -> Option<Vec<SavedItem>> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()?;
    let json = storage.get_item(STORAGE_KEY).ok()??;

    match decode(&json) {
        Ok(items) => {
            log::info!("Loaded {} saved items", items.len());
            Some(items)
        }
        Err(e) => {
            log::warn!("Discarding corrupt saved state: {}", e);
            None
        }
    }
}

/// Save the current items to LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(items: &[WeightItem]) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(json) = encode(items) {
            let _ = storage.set_item(STORAGE_KEY, &json);
            log::info!("State saved ({} items)", items.len());
        }
    }
}

/// Remove the saved state from LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn clear() {
    if let Some(storage) = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
    {
        let _ = storage.remove_item(STORAGE_KEY);
        log::info!("Saved state cleared");
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> Option<Vec<SavedItem>> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_items: &[WeightItem]) {
    // No-op for native
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clear() {
    // No-op for native
}
