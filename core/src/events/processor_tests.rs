//! End-to-end tests for event routing: damage intake, death handling,
//! announcement emission, eviction, and the tombstone guard.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::announce::NameResolver;
use crate::config::TrackerConfig;
use crate::ledger::DamageLedger;

use super::{EventProcessor, TrackerEvent, TrackerSignal};

const DRAGON_CONFIG: &str = r#"
[default_boss_config]
victory_message = "{boss_name} defeated!\n{top_players}"

[bosses.DRAGON]
victory_message = "The {boss_name} has fallen!\n{top_players}"
top_players_to_show = 2
top_players_format = ["&6#1 {player_name} - {damage}", "&7#2 {player_name} - {damage}"]

[bosses.GOLEM]

[bosses.MUTE]
top_players_to_show = 1
"#;

struct MapResolver(HashMap<i64, String>);

impl NameResolver for MapResolver {
    fn display_name(&self, contributor_id: i64) -> Option<String> {
        self.0.get(&contributor_id).cloned()
    }
}

fn resolver() -> MapResolver {
    MapResolver(
        [(1, "P1"), (2, "P2"), (3, "P3")]
            .into_iter()
            .map(|(id, name)| (id, name.to_string()))
            .collect(),
    )
}

fn config() -> TrackerConfig {
    let mut config: TrackerConfig = toml::from_str(DRAGON_CONFIG).expect("fixture parses");
    config.build_index();
    config
}

fn ts() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(20, 30, 0)
        .unwrap()
}

fn damage(boss_id: i64, boss_type: &str, contributor_id: i64, amount: f64) -> TrackerEvent {
    TrackerEvent::Damage {
        boss_id,
        boss_type: boss_type.to_string(),
        contributor_id,
        amount,
        boss_max_health: 1000.0,
        timestamp: ts(),
    }
}

fn death(boss_id: i64, boss_type: &str, display_name: &str) -> TrackerEvent {
    TrackerEvent::BossDeath {
        boss_id,
        boss_type: boss_type.to_string(),
        display_name: display_name.to_string(),
        timestamp: ts(),
    }
}

#[test]
fn dragon_kill_announces_ranked_percentages() {
    let ledger = DamageLedger::new();
    let config = config();
    let resolver = resolver();
    let mut processor = EventProcessor::new();

    for event in [
        damage(7, "DRAGON", 1, 100.0),
        damage(7, "DRAGON", 2, 50.0),
    ] {
        assert!(processor.process_event(event, &ledger, &config, &resolver).is_empty());
    }
    assert_eq!(ledger.rank_contributors(7, 2), vec![(1, 100.0), (2, 50.0)]);

    let signals = processor.process_event(death(7, "DRAGON", "Dragon"), &ledger, &config, &resolver);

    let [TrackerSignal::VictoryAnnounced { message, .. }, TrackerSignal::BossEvicted { boss_id, .. }] =
        signals.as_slice()
    else {
        panic!("expected announcement then eviction, got {signals:?}");
    };
    assert_eq!(*boss_id, 7);
    assert!(message.starts_with("The Dragon has fallen!"), "got: {message}");
    let p1 = message.find("#1 P1 - 10.0%").expect("P1 line");
    let p2 = message.find("#2 P2 - 5.0%").expect("P2 line");
    assert!(p1 < p2);

    // Death processed means state reclaimed
    assert!(!ledger.is_live(7));
}

#[test]
fn untracked_type_damage_is_a_complete_noop() {
    let ledger = DamageLedger::new();
    let config = config();
    let resolver = resolver();
    let mut processor = EventProcessor::new();

    processor.process_event(damage(9, "SLIME", 1, 100.0), &ledger, &config, &resolver);

    assert_eq!(ledger.live_boss_count(), 0);
    assert_eq!(ledger.contributor_total(1), 0.0);

    // And an untracked death emits nothing
    let signals = processor.process_event(death(9, "SLIME", "Slime"), &ledger, &config, &resolver);
    assert!(signals.is_empty());
}

#[test]
fn empty_config_entry_announces_with_default() {
    let ledger = DamageLedger::new();
    let config = config();
    let resolver = resolver();
    let mut processor = EventProcessor::new();

    processor.process_event(damage(3, "GOLEM", 1, 40.0), &ledger, &config, &resolver);
    let signals = processor.process_event(death(3, "GOLEM", "Golem"), &ledger, &config, &resolver);

    let Some(TrackerSignal::VictoryAnnounced { message, .. }) = signals.first() else {
        panic!("expected default-config announcement, got {signals:?}");
    };
    assert!(message.starts_with("Golem defeated!"), "got: {message}");
}

#[test]
fn unconfigured_victory_message_skips_broadcast_but_still_evicts() {
    let ledger = DamageLedger::new();
    let config = config();
    let resolver = resolver();
    let mut processor = EventProcessor::new();

    // MUTE overrides have no victory_message
    processor.process_event(damage(4, "MUTE", 1, 25.0), &ledger, &config, &resolver);
    assert!(ledger.is_live(4));

    let signals = processor.process_event(death(4, "MUTE", "Mute"), &ledger, &config, &resolver);

    let [TrackerSignal::BossEvicted { boss_id, .. }] = signals.as_slice() else {
        panic!("expected eviction only, got {signals:?}");
    };
    assert_eq!(*boss_id, 4);
    assert!(!ledger.is_live(4));
}

#[test]
fn duplicate_death_is_dropped() {
    let ledger = DamageLedger::new();
    let config = config();
    let resolver = resolver();
    let mut processor = EventProcessor::new();

    processor.process_event(damage(7, "DRAGON", 1, 100.0), &ledger, &config, &resolver);
    let first = processor.process_event(death(7, "DRAGON", "Dragon"), &ledger, &config, &resolver);
    assert_eq!(first.len(), 2);

    let second = processor.process_event(death(7, "DRAGON", "Dragon"), &ledger, &config, &resolver);
    assert!(second.is_empty(), "duplicate death must not re-announce");
}

#[test]
fn late_damage_after_eviction_does_not_resurrect_the_instance() {
    let ledger = DamageLedger::new();
    let config = config();
    let resolver = resolver();
    let mut processor = EventProcessor::new();

    processor.process_event(damage(7, "DRAGON", 1, 100.0), &ledger, &config, &resolver);
    processor.process_event(death(7, "DRAGON", "Dragon"), &ledger, &config, &resolver);
    assert!(!ledger.is_live(7));

    processor.process_event(damage(7, "DRAGON", 2, 30.0), &ledger, &config, &resolver);

    assert!(!ledger.is_live(7));
    assert_eq!(ledger.contributor_total(2), 0.0);
}

#[test]
fn malformed_amounts_are_dropped_without_corrupting_totals() {
    let ledger = DamageLedger::new();
    let config = config();
    let resolver = resolver();
    let mut processor = EventProcessor::new();

    processor.process_event(damage(7, "DRAGON", 1, 60.0), &ledger, &config, &resolver);
    processor.process_event(damage(7, "DRAGON", 1, -50.0), &ledger, &config, &resolver);
    processor.process_event(damage(7, "DRAGON", 1, f64::NAN), &ledger, &config, &resolver);

    assert_eq!(ledger.boss_damage(7, 1), 60.0);
}

#[test]
fn max_health_sticks_at_first_observed_damage() {
    let ledger = DamageLedger::new();
    let config = config();
    let resolver = resolver();
    let mut processor = EventProcessor::new();

    let first = TrackerEvent::Damage {
        boss_id: 7,
        boss_type: "DRAGON".to_string(),
        contributor_id: 1,
        amount: 10.0,
        boss_max_health: 1000.0,
        timestamp: ts(),
    };
    let later = TrackerEvent::Damage {
        boss_id: 7,
        boss_type: "DRAGON".to_string(),
        contributor_id: 1,
        amount: 10.0,
        // Boss healed/regenerated; must not overwrite the first value
        boss_max_health: 1500.0,
        timestamp: ts(),
    };
    processor.process_event(first, &ledger, &config, &resolver);
    processor.process_event(later, &ledger, &config, &resolver);

    assert_eq!(ledger.max_health(7), 1000.0);
}

#[test]
fn offline_contributor_rank_line_is_skipped_in_announcement() {
    let ledger = DamageLedger::new();
    let config = config();
    // Only P2 resolves
    let resolver = MapResolver([(2, "P2".to_string())].into_iter().collect());
    let mut processor = EventProcessor::new();

    processor.process_event(damage(7, "DRAGON", 1, 100.0), &ledger, &config, &resolver);
    processor.process_event(damage(7, "DRAGON", 2, 50.0), &ledger, &config, &resolver);
    let signals = processor.process_event(death(7, "DRAGON", "Dragon"), &ledger, &config, &resolver);

    let Some(TrackerSignal::VictoryAnnounced { message, .. }) = signals.first() else {
        panic!("expected announcement, got {signals:?}");
    };
    assert!(!message.contains("P1"), "got: {message}");
    assert!(message.contains("P2"), "got: {message}");
}
