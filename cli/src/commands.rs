use std::io::Write;
use std::path::Path;

use bosstally_core::{NameResolver, SignalHandler, TrackerEvent, TrackerSignal};
use chrono::Local;

use crate::config_loader;
use crate::context::CliContext;

/// Prints announcements to the console, standing in for the host
/// runtime's chat broadcaster.
pub struct ConsoleBroadcaster;

impl SignalHandler for ConsoleBroadcaster {
    fn handle_signal(&mut self, signal: &TrackerSignal) {
        match signal {
            TrackerSignal::VictoryAnnounced { message, .. } => println!("{message}"),
            TrackerSignal::BossEvicted { boss_id, .. } => {
                tracing::debug!(boss_id, "boss instance evicted");
            }
        }
    }
}

pub fn load_config(path: Option<&str>, ctx: &mut CliContext) {
    if let Some(path) = path {
        ctx.settings.config_path = path.to_string();
        ctx.settings.save();
    }

    let path = ctx.settings.config_path.clone();
    match config_loader::load_config(Path::new(&path)) {
        Ok(config) => {
            let configured = config.bosses.len();
            ctx.tracker.reload(config);
            println!("Configuration loaded. Configured boss types: {configured}");
        }
        Err(err) => println!("Error loading configuration: {err}"),
    }
}

pub fn hit(
    boss_id: i64,
    boss_type: &str,
    contributor_id: i64,
    amount: f64,
    max_health: f64,
    ctx: &mut CliContext,
) {
    let event = TrackerEvent::Damage {
        boss_id,
        boss_type: boss_type.to_string(),
        contributor_id,
        amount,
        boss_max_health: max_health,
        timestamp: Local::now().naive_local(),
    };
    let signals = ctx.tracker.process_event(event, &ctx.names);
    ConsoleBroadcaster.handle_signals(&signals);
}

pub fn kill(boss_id: i64, boss_type: &str, display_name: &str, ctx: &mut CliContext) {
    let event = TrackerEvent::BossDeath {
        boss_id,
        boss_type: boss_type.to_string(),
        display_name: display_name.to_string(),
        timestamp: Local::now().naive_local(),
    };
    let signals = ctx.tracker.process_event(event, &ctx.names);
    if signals.is_empty() {
        println!("(no announcement)");
    }
    ConsoleBroadcaster.handle_signals(&signals);
}

pub fn damage(contributor_id: i64, ctx: &CliContext) {
    let total = ctx.tracker.contributor_total(contributor_id);
    println!(
        "Current total damage for {}: {}",
        contributor_id,
        ctx.tracker.config().formats.damage_format.format(total)
    );
}

pub fn top(limit: Option<usize>, ctx: &CliContext) {
    let top = ctx.tracker.top_across_all(limit);
    if top.is_empty() {
        println!("No damage recorded against live bosses");
        return;
    }

    let formats = ctx.tracker.config().formats.clone();
    println!("Top {} damage dealers across all live bosses:", top.len());
    for (rank, (contributor_id, total)) in top.iter().enumerate() {
        let name = ctx
            .names
            .display_name(*contributor_id)
            .unwrap_or_else(|| format!("#{contributor_id}"));
        println!(
            "{}. {}: {}",
            rank + 1,
            name,
            formats.damage_format.format(*total)
        );
    }
}

pub fn register_name(contributor_id: i64, name: &str, ctx: &mut CliContext) {
    ctx.names.register(contributor_id, name.to_string());
    println!("Registered contributor {contributor_id} as {name}");
}

pub fn status(ctx: &CliContext) {
    let config = ctx.tracker.config();
    println!(
        "Live bosses: {} | configured boss types: {}",
        ctx.tracker.live_boss_count(),
        config.bosses.len()
    );
}

pub fn exit() {
    write!(std::io::stdout(), "quitting...").expect("error exiting");
    std::io::stdout().flush().expect("error flushing stdout");
}
