pub mod announce;
pub mod config;
pub mod events;
pub mod ledger;
pub mod serde_defaults;
pub mod tracker;

// Re-exports for convenience
pub use announce::{ComposeError, FALLBACK_LINE_FORMAT, NameResolver, compose};
pub use config::{
    BossTypeConfig, BossTypeEntry, ConfigHandle, DamageDisplay, NumberFormat, NumberFormats,
    TrackerConfig, TypeLookup,
};
pub use events::{EventProcessor, SignalHandler, TrackerEvent, TrackerSignal};
pub use ledger::DamageLedger;
pub use tracker::DamageTracker;
