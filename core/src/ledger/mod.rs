//! Authoritative damage accumulation and ranking.
//!
//! The [`DamageLedger`] owns all per-boss state: one damage map per live
//! boss instance (contributor id -> accumulated damage) plus the boss's
//! recorded max health. Boss entries are created implicitly on first
//! recorded damage and removed by [`DamageLedger::evict`], which is the
//! sole reclamation mechanism.
//!
//! All methods take `&self`; mutations go through one interior lock so
//! concurrent recorders never lose updates and every ranking call sees a
//! point-in-time snapshot.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::HashMap;


#[derive(Debug, Default)]
struct LedgerState {
    /// boss instance id -> (contributor id -> accumulated damage)
    damage: HashMap<i64, HashMap<i64, f64>>,
    /// boss instance id -> max health at first observed damage
    max_health: HashMap<i64, f64>,
}

/// In-memory store of accumulated damage for all currently-live bosses.
///
/// Contributor totals are monotonically non-decreasing for the lifetime of
/// a boss instance; callers are expected to hand in non-negative amounts.
#[derive(Debug, Default)]
pub struct DamageLedger {
    state: RwLock<LedgerState>,
}

impl DamageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means a panic elsewhere while holding the guard;
    // the maps themselves are never left torn (single-call mutations), so
    // recover the inner value instead of propagating the panic.
    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Add `amount` to the running total for `(boss_id, contributor_id)`,
    /// creating both entries if absent. Accumulate-or-insert happens as one
    /// atomic unit under the write lock.
    pub fn record_damage(&self, boss_id: i64, contributor_id: i64, amount: f64) {
        let mut state = self.write();
        *state
            .damage
            .entry(boss_id)
            .or_default()
            .entry(contributor_id)
            .or_insert(0.0) += amount;
    }

    /// Record the boss's max health, first write wins. Captures the health
    /// observed at first damage, not a possibly-regenerated later value.
    pub fn record_max_health(&self, boss_id: i64, health: f64) {
        let mut state = self.write();
        state.max_health.entry(boss_id).or_insert(health);
    }

    /// Ranked `(contributor_id, total)` pairs for one boss instance, damage
    /// descending, truncated to `limit`.
    ///
    /// Ties are broken by contributor id ascending; this is a contract, not
    /// an accident, so repeated calls on unchanged state always agree.
    /// Unknown boss instances and `limit == 0` yield an empty vec.
    pub fn rank_contributors(&self, boss_id: i64, limit: usize) -> Vec<(i64, f64)> {
        let state = self.read();
        match state.damage.get(&boss_id) {
            Some(map) => rank_damage_map(map, limit),
            None => Vec::new(),
        }
    }

    /// A contributor's damage summed across all currently-live bosses.
    pub fn contributor_total(&self, contributor_id: i64) -> f64 {
        let state = self.read();
        state
            .damage
            .values()
            .filter_map(|map| map.get(&contributor_id))
            .sum()
    }

    /// Ranked totals merged across all currently-live bosses, same ordering
    /// contract as [`rank_contributors`](Self::rank_contributors).
    pub fn top_across_all(&self, limit: usize) -> Vec<(i64, f64)> {
        let state = self.read();
        let mut merged: HashMap<i64, f64> = HashMap::new();
        for map in state.damage.values() {
            for (&contributor_id, &amount) in map {
                *merged.entry(contributor_id).or_insert(0.0) += amount;
            }
        }
        rank_damage_map(&merged, limit)
    }

    /// A single contributor's accumulated damage against one boss instance.
    /// Zero when either entry is absent.
    pub fn boss_damage(&self, boss_id: i64, contributor_id: i64) -> f64 {
        let state = self.read();
        state
            .damage
            .get(&boss_id)
            .and_then(|map| map.get(&contributor_id))
            .copied()
            .unwrap_or(0.0)
    }

    /// Recorded max health for a boss instance, 0.0 when unrecorded.
    pub fn max_health(&self, boss_id: i64) -> f64 {
        let state = self.read();
        state.max_health.get(&boss_id).copied().unwrap_or(0.0)
    }

    /// Whether any damage is currently recorded against this boss instance.
    pub fn is_live(&self, boss_id: i64) -> bool {
        self.read().damage.contains_key(&boss_id)
    }

    /// Number of boss instances with live ledger entries.
    pub fn live_boss_count(&self) -> usize {
        self.read().damage.len()
    }

    /// Remove all state for a boss instance. Called exactly once per boss
    /// lifecycle after the death signal has been fully processed; both maps
    /// are cleared under one write guard so no torn state is observable.
    pub fn evict(&self, boss_id: i64) {
        let mut state = self.write();
        state.damage.remove(&boss_id);
        state.max_health.remove(&boss_id);
    }
}

/// Full sort of a damage map: descending by total, ties by contributor id
/// ascending. Boss populations are dozens at most, so a plain sort beats
/// any incremental top-K structure here.
fn rank_damage_map(map: &HashMap<i64, f64>, limit: usize) -> Vec<(i64, f64)> {
    let mut entries: Vec<(i64, f64)> = map.iter().map(|(&c, &d)| (c, d)).collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}
