use chrono::NaiveDateTime;
use hashbrown::HashSet;
use std::collections::VecDeque;

use crate::announce::{self, ComposeError, NameResolver};
use crate::config::{TrackerConfig, TypeLookup};
use crate::events::signal::{TrackerEvent, TrackerSignal};
use crate::ledger::DamageLedger;

/// How many evicted boss ids the tombstone window remembers.
const TOMBSTONE_CAPACITY: usize = 64;

/// Routes upstream events into the ledger and emits signals on boss death.
///
/// This is also the boundary guard the ledger itself stays out of: events
/// for untracked boss types are no-ops, malformed amounts are dropped with
/// a log line instead of corrupting totals, and a bounded tombstone window
/// keeps late damage or duplicate deaths from silently resurrecting an
/// evicted boss instance.
pub struct EventProcessor {
    tombstones: VecDeque<i64>,
    tombstone_index: HashSet<i64>,
}

impl Default for EventProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl EventProcessor {
    pub fn new() -> Self {
        Self {
            tombstones: VecDeque::with_capacity(TOMBSTONE_CAPACITY),
            tombstone_index: HashSet::new(),
        }
    }

    /// Process one upstream event against a single config snapshot.
    /// Never panics on event content; degraded paths log and drop.
    pub fn process_event(
        &mut self,
        event: TrackerEvent,
        ledger: &DamageLedger,
        config: &TrackerConfig,
        resolver: &dyn NameResolver,
    ) -> Vec<TrackerSignal> {
        match event {
            TrackerEvent::Damage {
                boss_id,
                boss_type,
                contributor_id,
                amount,
                boss_max_health,
                ..
            } => {
                self.handle_damage(
                    boss_id,
                    &boss_type,
                    contributor_id,
                    amount,
                    boss_max_health,
                    ledger,
                    config,
                );
                Vec::new()
            }
            TrackerEvent::BossDeath {
                boss_id,
                boss_type,
                display_name,
                timestamp,
            } => self.handle_death(
                boss_id,
                &boss_type,
                &display_name,
                timestamp,
                ledger,
                config,
                resolver,
            ),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_damage(
        &self,
        boss_id: i64,
        boss_type: &str,
        contributor_id: i64,
        amount: f64,
        boss_max_health: f64,
        ledger: &DamageLedger,
        config: &TrackerConfig,
    ) {
        // Untracked types never get ledger entries
        if !config.is_tracked(boss_type) {
            return;
        }

        if self.is_tombstoned(boss_id) {
            tracing::debug!(boss_id, "dropping damage for evicted boss instance");
            return;
        }

        // Caller contract is non-negative finite amounts; anything else is
        // a malformed event and recording it would break monotone totals.
        if !amount.is_finite() || amount < 0.0 {
            tracing::warn!(boss_id, contributor_id, amount, "dropping malformed damage event");
            return;
        }

        ledger.record_damage(boss_id, contributor_id, amount);
        if boss_max_health.is_finite() && boss_max_health > 0.0 {
            ledger.record_max_health(boss_id, boss_max_health);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_death(
        &mut self,
        boss_id: i64,
        boss_type: &str,
        display_name: &str,
        timestamp: NaiveDateTime,
        ledger: &DamageLedger,
        config: &TrackerConfig,
        resolver: &dyn NameResolver,
    ) -> Vec<TrackerSignal> {
        if !config.is_tracked(boss_type) {
            return Vec::new();
        }

        if self.is_tombstoned(boss_id) {
            tracing::warn!(boss_id, boss_type, "dropping duplicate death event");
            return Vec::new();
        }

        let lookup = config.lookup(boss_type);
        if lookup == TypeLookup::UseDefault {
            tracing::info!(boss_type, "using default configuration for boss");
        }

        let mut signals = Vec::new();
        match config.resolve(boss_type) {
            None => {
                tracing::warn!(boss_type, "no applicable configuration, skipping announcement");
            }
            Some(cfg) => {
                let ranked = ledger.rank_contributors(boss_id, cfg.top_players());
                let max_health = ledger.max_health(boss_id);
                match announce::compose(
                    cfg,
                    &config.formats,
                    &ranked,
                    max_health,
                    display_name,
                    resolver,
                ) {
                    Ok(message) => signals.push(TrackerSignal::VictoryAnnounced {
                        boss_id,
                        boss_type: boss_type.to_string(),
                        message,
                        timestamp,
                    }),
                    Err(ComposeError::NoVictoryMessage) => {
                        tracing::warn!(boss_type, "no victory message configured, skipping announcement");
                    }
                }
            }
        }

        // Eviction happens exactly once per lifecycle, announcement or not;
        // skipping it on the unconfigured path would leak the maps.
        ledger.evict(boss_id);
        self.tombstone(boss_id);
        signals.push(TrackerSignal::BossEvicted { boss_id, timestamp });
        signals
    }

    fn is_tombstoned(&self, boss_id: i64) -> bool {
        self.tombstone_index.contains(&boss_id)
    }

    fn tombstone(&mut self, boss_id: i64) {
        if !self.tombstone_index.insert(boss_id) {
            return;
        }
        self.tombstones.push_back(boss_id);
        while self.tombstones.len() > TOMBSTONE_CAPACITY {
            if let Some(expired) = self.tombstones.pop_front() {
                self.tombstone_index.remove(&expired);
            }
        }
    }
}
