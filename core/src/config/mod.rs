//! Boss announcement configuration
//!
//! Value objects for the per-boss-type announcement settings. The on-disk
//! loader lives outside the engine; these types only describe the parsed
//! shape and the lookup rules.
//!
//! A boss type key maps to either explicit overrides or an empty entry
//! meaning "announce with the process-wide default config". A type absent
//! from the map entirely is untracked and never creates ledger entries.
//! That three-way outcome is an explicit [`TypeLookup`] variant rather
//! than a null-valued sentinel.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::serde_defaults::default_top_players;

mod handle;


pub use handle::ConfigHandle;

/// How a contributor's damage is rendered in announcement lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageDisplay {
    /// Raw accumulated amount
    Absolute,
    /// Share of the boss's recorded max health
    #[default]
    Percentage,
}

/// Fixed-precision rendering rule for damage and percentage values.
///
/// The original format strings were printf patterns; here the same idea is
/// a declarative pair of decimal places plus a literal suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub decimals: u8,
    #[serde(default)]
    pub suffix: String,
}

impl NumberFormat {
    /// Default for absolute damage amounts: `250.00`
    pub fn absolute_default() -> Self {
        Self {
            decimals: 2,
            suffix: String::new(),
        }
    }

    /// Default for percentages: `25.0%`
    pub fn percent_default() -> Self {
        Self {
            decimals: 1,
            suffix: "%".to_string(),
        }
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*}{}", self.decimals as usize, value, self.suffix)
    }
}

/// The two global rendering rules, one per display mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormats {
    #[serde(default = "NumberFormat::absolute_default")]
    pub damage_format: NumberFormat,
    #[serde(default = "NumberFormat::percent_default")]
    pub percentage_format: NumberFormat,
}

impl Default for NumberFormats {
    fn default() -> Self {
        Self {
            damage_format: NumberFormat::absolute_default(),
            percentage_format: NumberFormat::percent_default(),
        }
    }
}

/// Announcement settings for one boss type (keyed by type, not instance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossTypeConfig {
    /// Victory template with `{boss_name}` and `{top_players}` placeholders.
    /// None means "tracked but nothing to broadcast".
    #[serde(default)]
    pub victory_message: Option<String>,

    /// How many top contributors the announcement lists.
    /// Kept signed so a negative value in the source clamps instead of
    /// rejecting the whole config; read through [`top_players`](Self::top_players).
    #[serde(default = "default_top_players")]
    pub top_players_to_show: i64,

    /// Per-rank line templates with `{player_name}` and `{damage}`
    /// placeholders. Ranks past the end use the fixed fallback line.
    #[serde(default)]
    pub top_players_format: Vec<String>,

    #[serde(default)]
    pub damage_display: DamageDisplay,
}

impl Default for BossTypeConfig {
    fn default() -> Self {
        Self {
            victory_message: None,
            top_players_to_show: default_top_players(),
            top_players_format: Vec::new(),
            damage_display: DamageDisplay::default(),
        }
    }
}

impl BossTypeConfig {
    /// `top_players_to_show` with negatives clamped to zero.
    pub fn top_players(&self) -> usize {
        self.top_players_to_show.max(0) as usize
    }
}

/// One entry in the per-type table: either explicit overrides, or an empty
/// table in the source meaning "use the default config".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBossTypeEntry")]
pub enum BossTypeEntry {
    Overrides(BossTypeConfig),
    UseDefault,
}

/// Source shape of a per-type entry, before the overrides-vs-default
/// distinction is made. An entry with no keys at all becomes `UseDefault`.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawBossTypeEntry {
    victory_message: Option<String>,
    top_players_to_show: Option<i64>,
    top_players_format: Option<Vec<String>>,
    damage_display: Option<DamageDisplay>,
}

impl From<RawBossTypeEntry> for BossTypeEntry {
    fn from(raw: RawBossTypeEntry) -> Self {
        if raw.victory_message.is_none()
            && raw.top_players_to_show.is_none()
            && raw.top_players_format.is_none()
            && raw.damage_display.is_none()
        {
            return BossTypeEntry::UseDefault;
        }
        BossTypeEntry::Overrides(BossTypeConfig {
            victory_message: raw.victory_message,
            top_players_to_show: raw.top_players_to_show.unwrap_or_else(default_top_players),
            top_players_format: raw.top_players_format.unwrap_or_default(),
            damage_display: raw.damage_display.unwrap_or_default(),
        })
    }
}

/// Outcome of a boss-type lookup, resolved once per death event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeLookup<'a> {
    /// The type has its own config.
    Overrides(&'a BossTypeConfig),
    /// The type is tracked and announces with the default config.
    UseDefault,
    /// The type is not in the configuration at all; no tracking happens.
    Untracked,
}

/// One immutable configuration snapshot.
///
/// Built once per load/reload and swapped whole through [`ConfigHandle`];
/// never mutated field-by-field while the engine is running.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrackerConfig {
    /// Keyed by boss type id, uppercased by [`build_index`](Self::build_index).
    #[serde(default)]
    pub bosses: HashMap<String, BossTypeEntry>,

    /// Fallback config for `UseDefault` entries. None means such types are
    /// still tracked but can never announce.
    #[serde(default)]
    pub default_boss_config: Option<BossTypeConfig>,

    #[serde(flatten)]
    pub formats: NumberFormats,
}

impl TrackerConfig {
    /// Normalize type keys to uppercase so event-side lookups are
    /// case-insensitive. Idempotent; called when a snapshot is installed.
    pub fn build_index(&mut self) {
        let bosses = std::mem::take(&mut self.bosses);
        self.bosses = bosses
            .into_iter()
            .map(|(key, entry)| (key.to_uppercase(), entry))
            .collect();
    }

    pub fn lookup(&self, boss_type: &str) -> TypeLookup<'_> {
        match self.bosses.get(&boss_type.to_uppercase()) {
            Some(BossTypeEntry::Overrides(cfg)) => TypeLookup::Overrides(cfg),
            Some(BossTypeEntry::UseDefault) => TypeLookup::UseDefault,
            None => TypeLookup::Untracked,
        }
    }

    /// Whether damage against this boss type should be recorded at all.
    pub fn is_tracked(&self, boss_type: &str) -> bool {
        self.bosses.contains_key(&boss_type.to_uppercase())
    }

    /// The config that applies to a boss type, following the default
    /// fallback. None when untracked, or when a `UseDefault` type has no
    /// default to fall back to.
    pub fn resolve(&self, boss_type: &str) -> Option<&BossTypeConfig> {
        match self.lookup(boss_type) {
            TypeLookup::Overrides(cfg) => Some(cfg),
            TypeLookup::UseDefault => self.default_boss_config.as_ref(),
            TypeLookup::Untracked => None,
        }
    }
}
