//! Victory announcement composition
//!
//! Pure text assembly: a ranked contributor list plus a boss type's config
//! becomes the final broadcast string. No ledger access and no I/O; the
//! caller resolves the config and hands in a point-in-time ranking.
//!
//! Color/style markup in templates is passed through verbatim. Rendering
//! it is a downstream concern.

mod error;


pub use error::ComposeError;

use crate::config::{BossTypeConfig, DamageDisplay, NumberFormats};

/// Line template used for ranks beyond the configured per-rank list.
pub const FALLBACK_LINE_FORMAT: &str = "&7{player_name}: &c{damage}";

/// Maps a contributor id to a display name. `None` means the contributor
/// is not resolvable right now (disconnected) and their line is omitted.
pub trait NameResolver {
    fn display_name(&self, contributor_id: i64) -> Option<String>;
}

/// Build the victory announcement for a defeated boss.
///
/// For each rank up to `cfg.top_players()`, substitutes `{player_name}`
/// and `{damage}` into that rank's line template, then substitutes
/// `{boss_name}` and `{top_players}` into the victory message.
///
/// Damage renders as a percentage of `max_health` in percentage mode; when
/// `max_health` is zero (boss died without recorded health) it degrades to
/// the absolute format instead of dividing by zero.
///
/// An empty ranking is valid and yields an empty `{top_players}` block.
pub fn compose(
    cfg: &BossTypeConfig,
    formats: &NumberFormats,
    ranked: &[(i64, f64)],
    max_health: f64,
    boss_name: &str,
    resolver: &dyn NameResolver,
) -> Result<String, ComposeError> {
    let victory = cfg
        .victory_message
        .as_deref()
        .ok_or(ComposeError::NoVictoryMessage)?;

    let mut block = String::new();
    for (rank, &(contributor_id, damage)) in ranked.iter().take(cfg.top_players()).enumerate() {
        let Some(name) = resolver.display_name(contributor_id) else {
            tracing::debug!(contributor_id, "skipping rank line, contributor unresolvable");
            continue;
        };

        let template = cfg
            .top_players_format
            .get(rank)
            .map(String::as_str)
            .unwrap_or(FALLBACK_LINE_FORMAT);

        let damage_text = if cfg.damage_display == DamageDisplay::Percentage && max_health > 0.0 {
            formats.percentage_format.format(damage / max_health * 100.0)
        } else {
            formats.damage_format.format(damage)
        };

        let line = template
            .replace("{player_name}", &name)
            .replace("{damage}", &damage_text);
        block.push_str(&line);
        block.push('\n');
    }

    Ok(victory
        .replace("{boss_name}", boss_name)
        .replace("{top_players}", &block))
}
