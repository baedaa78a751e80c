//! Durable layout settings.
//!
//! [`LayoutSettingsStore`] is the single source of truth for the panel's
//! persisted layout. It never reports errors to its callers: a missing,
//! unreadable or malformed record loads as defaults, and a failed write is
//! logged and dropped.

pub mod storage;

pub use storage::{default_storage_dir, FileStorage, KeyValueStorage, MemoryStorage};

use crate::model::{
    LayoutBounds, LayoutSettings, PanelDefaults, StoreError, StoredLayout, Viewport,
};
use tracing::{debug, info, warn};

/// Default storage key for the layout record.
pub const DEFAULT_STORAGE_KEY: &str = "floating-panel-layout";

/// Loads and saves [`LayoutSettings`] under a single storage key.
#[derive(Debug)]
pub struct LayoutSettingsStore<S> {
    storage: S,
    key: String,
    bounds: LayoutBounds,
    defaults: PanelDefaults,
}

impl<S: KeyValueStorage> LayoutSettingsStore<S> {
    /// Create a store with default key, bounds and defaults.
    pub fn new(storage: S) -> Self {
        Self::with_options(
            storage,
            DEFAULT_STORAGE_KEY,
            LayoutBounds::default(),
            PanelDefaults::default(),
        )
    }

    /// Create a store with explicit key, bounds and defaults.
    pub fn with_options(
        storage: S,
        key: impl Into<String>,
        bounds: LayoutBounds,
        defaults: PanelDefaults,
    ) -> Self {
        Self {
            storage,
            key: key.into(),
            bounds: bounds.normalized(),
            defaults: defaults.normalized(),
        }
    }

    /// Load the persisted layout, or defaults, clamped to `viewport`.
    ///
    /// The viewport may differ from the one at last save (the window may have
    /// been resized while the panel was closed), so the persisted record is
    /// always re-clamped.
    pub fn load(&self, viewport: Viewport) -> LayoutSettings {
        match self.read_record() {
            Some(stored) => {
                let settings = LayoutSettings::from(stored).clamped(viewport, &self.bounds);
                debug!(?settings, "Loaded persisted panel layout");
                settings
            }
            None => {
                let settings = LayoutSettings::defaults_for(viewport, &self.defaults, &self.bounds);
                debug!(?settings, "No usable persisted layout, using defaults");
                settings
            }
        }
    }

    /// Overwrite the persisted record.
    ///
    /// Does not clamp; callers pass settings that already satisfy the bounds.
    pub fn save(&self, settings: LayoutSettings) {
        match self.write_record(settings) {
            Ok(()) => info!(key = %self.key, ?settings, "Saved panel layout"),
            Err(err) => warn!(key = %self.key, error = %err, "Failed to save panel layout"),
        }
    }

    /// Size and opacity bounds applied by this store.
    pub fn bounds(&self) -> &LayoutBounds {
        &self.bounds
    }

    /// Values used when no record exists.
    pub fn defaults(&self) -> &PanelDefaults {
        &self.defaults
    }

    /// Storage key of the layout record.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn write_record(&self, settings: LayoutSettings) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&StoredLayout::from(settings))?;
        self.storage.set_item(&self.key, &encoded)
    }

    fn read_record(&self) -> Option<StoredLayout> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %self.key, error = %err, "Failed to read panel layout");
                return None;
            }
        };

        match serde_json::from_str::<StoredLayout>(&raw) {
            Ok(stored) if is_finite(&stored) => Some(stored),
            Ok(_) => {
                warn!(key = %self.key, "Persisted panel layout has non-finite values, ignoring");
                None
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "Malformed persisted panel layout, ignoring");
                None
            }
        }
    }
}

fn is_finite(stored: &StoredLayout) -> bool {
    [
        stored.position.x,
        stored.position.y,
        stored.width,
        stored.height,
        stored.opacity,
    ]
    .iter()
    .all(|v| v.is_finite())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
