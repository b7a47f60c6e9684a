//! Error types for announcement composition

use thiserror::Error;

/// Why a victory announcement could not be composed. Never fatal: the
/// caller skips the broadcast and keeps processing other bosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("no victory message configured for this boss type")]
    NoVictoryMessage,
}
