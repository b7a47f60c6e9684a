use chrono::NaiveDateTime;

/// Upstream signals from the host runtime's event dispatch.
///
/// The host pre-resolves identities: boss instance and contributor ids are
/// opaque and unique for their lifetimes, the boss type is the spawn
/// template's id. Display names are supplied per-event, never cached here.
#[derive(Debug, Clone)]
pub enum TrackerEvent {
    /// One damaging interaction against a (potentially tracked) boss.
    Damage {
        boss_id: i64,
        boss_type: String,
        contributor_id: i64,
        amount: f64,
        /// The boss's max health as reported with this event; recorded
        /// first-write-wins so the value at first damage sticks.
        boss_max_health: f64,
        timestamp: NaiveDateTime,
    },
    /// The boss instance died. Raised once per instance by contract;
    /// duplicates are dropped via the eviction tombstones.
    BossDeath {
        boss_id: i64,
        boss_type: String,
        display_name: String,
        timestamp: NaiveDateTime,
    },
}

/// Signals emitted back to the host for cross-cutting concerns.
#[derive(Debug, Clone)]
pub enum TrackerSignal {
    /// Composed victory text, ready for the host's broadcaster.
    VictoryAnnounced {
        boss_id: i64,
        boss_type: String,
        message: String,
        timestamp: NaiveDateTime,
    },
    /// All ledger state for the boss instance has been reclaimed.
    BossEvicted {
        boss_id: i64,
        timestamp: NaiveDateTime,
    },
}
