//! Common serde default value functions

/// Default number of top contributors shown in announcements
pub fn default_top_players() -> i64 {
    3
}
