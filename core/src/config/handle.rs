//! Shared handle to the current configuration snapshot.

use std::sync::{Arc, RwLock};

use super::TrackerConfig;

/// Holds the active [`TrackerConfig`] and swaps it atomically on reload.
///
/// Readers take a cheap `Arc` clone and keep composing against that
/// snapshot even if a reload lands mid-composition; a swap is never
/// observed as a partially-updated config.
#[derive(Debug, Default)]
pub struct ConfigHandle {
    current: RwLock<Arc<TrackerConfig>>,
}

impl ConfigHandle {
    pub fn new(config: TrackerConfig) -> Self {
        let handle = Self::default();
        handle.replace(config);
        handle
    }

    /// Point-in-time view of the configuration.
    pub fn snapshot(&self) -> Arc<TrackerConfig> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Install a new snapshot, normalizing its type index first. In-flight
    /// readers keep their old `Arc`; ledger state is untouched.
    pub fn replace(&self, mut config: TrackerConfig) {
        config.build_index();
        tracing::info!(
            configured_boss_types = config.bosses.len(),
            "configuration snapshot installed"
        );
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(config);
    }
}
