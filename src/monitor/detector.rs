// src/monitor/detector.rs

/// Decides whether a device has flatlined
///
/// True only when a previous successful poll exists and the share count has
/// not moved since. The first poll never counts, and two zero readings in a
/// row do.
pub fn is_flatlined(previous_shares: Option<u64>, current_shares: u64) -> bool {
    previous_shares == Some(current_shares)
}
