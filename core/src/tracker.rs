//! Session-scoped tracker facade.
//!
//! One [`DamageTracker`] is constructed when the host session starts and
//! dropped when it ends; all state is intentionally ephemeral. It wires
//! the ledger, the active config snapshot, and the event processor
//! together and exposes the query surface used by command and placeholder
//! collaborators.

use crate::announce::NameResolver;
use crate::config::{ConfigHandle, TrackerConfig};
use crate::events::{EventProcessor, TrackerEvent, TrackerSignal};
use crate::ledger::DamageLedger;
use crate::serde_defaults::default_top_players;

pub struct DamageTracker {
    ledger: DamageLedger,
    config: ConfigHandle,
    processor: EventProcessor,
}

impl DamageTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            ledger: DamageLedger::new(),
            config: ConfigHandle::new(config),
            processor: EventProcessor::new(),
        }
    }

    /// Route one upstream event. The whole event is handled against a
    /// single config snapshot, so a concurrent reload can never be seen
    /// half-applied mid-composition.
    pub fn process_event(
        &mut self,
        event: TrackerEvent,
        resolver: &dyn NameResolver,
    ) -> Vec<TrackerSignal> {
        let snapshot = self.config.snapshot();
        self.processor
            .process_event(event, &self.ledger, &snapshot, resolver)
    }

    /// Swap in a freshly parsed configuration. Live ledger state and
    /// in-flight compositions are untouched.
    pub fn reload(&self, config: TrackerConfig) {
        self.config.replace(config);
    }

    pub fn config(&self) -> std::sync::Arc<TrackerConfig> {
        self.config.snapshot()
    }

    // --- Query surface ---

    /// A contributor's damage across all currently-live bosses.
    pub fn contributor_total(&self, contributor_id: i64) -> f64 {
        self.ledger.contributor_total(contributor_id)
    }

    /// Top contributors merged across all live bosses. Without an explicit
    /// limit, uses the default config's `top_players_to_show` (else 3),
    /// matching the global top command's behavior.
    pub fn top_across_all(&self, limit: Option<usize>) -> Vec<(i64, f64)> {
        let limit = limit.unwrap_or_else(|| {
            self.config
                .snapshot()
                .default_boss_config
                .as_ref()
                .map(|cfg| cfg.top_players())
                .unwrap_or(default_top_players() as usize)
        });
        self.ledger.top_across_all(limit)
    }

    /// Recorded max health for a live boss instance, 0.0 when unknown.
    pub fn boss_max_health(&self, boss_id: i64) -> f64 {
        self.ledger.max_health(boss_id)
    }

    /// One contributor's damage against one live boss instance.
    pub fn boss_damage(&self, boss_id: i64, contributor_id: i64) -> f64 {
        self.ledger.boss_damage(boss_id, contributor_id)
    }

    pub fn live_boss_count(&self) -> usize {
        self.ledger.live_boss_count()
    }
}
