use std::collections::HashMap;

use bosstally_core::{DamageTracker, NameResolver, TrackerConfig};
use serde::{Deserialize, Serialize};

/// The cli's own persisted settings (not the boss configuration itself).
#[derive(Debug, Serialize, Deserialize)]
pub struct AppSettings {
    /// Path of the boss configuration TOML used by `load-config`/`reload`.
    pub config_path: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            config_path: "bosses.toml".to_string(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        confy::load("bosstally", None).unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(err) = confy::store("bosstally", None, self) {
            tracing::warn!(%err, "failed to persist cli settings");
        }
    }
}

/// Contributor display names registered at the console. Plays the host
/// runtime's part: ids without a registered name are "offline" and their
/// announcement lines are skipped.
#[derive(Debug, Default)]
pub struct NameRegistry {
    names: HashMap<i64, String>,
}

impl NameRegistry {
    pub fn register(&mut self, contributor_id: i64, name: String) {
        self.names.insert(contributor_id, name);
    }
}

impl NameResolver for NameRegistry {
    fn display_name(&self, contributor_id: i64) -> Option<String> {
        self.names.get(&contributor_id).cloned()
    }
}

/// Holds all state for the console session. The tracker lives exactly as
/// long as this context; dropping it discards the whole ledger.
pub struct CliContext {
    pub settings: AppSettings,
    pub tracker: DamageTracker,
    pub names: NameRegistry,
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CliContext {
    pub fn new() -> Self {
        Self {
            settings: AppSettings::load(),
            tracker: DamageTracker::new(TrackerConfig::default()),
            names: NameRegistry::default(),
        }
    }
}
