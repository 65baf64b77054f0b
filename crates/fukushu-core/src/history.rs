//! History View
//!
//! Derives the bounded recent-rating strip shown under the current
//! problem (e.g. `× △ ○ ○`). Purely read-only; no state.

use crate::domain::{Rating, ReviewLog};

/// Default number of past attempts shown
pub const DEFAULT_HISTORY_LIMIT: usize = 7;

/// The last `limit` ratings for one problem and user, in chronological
/// order (oldest first, most recent last) for left-to-right display.
pub fn recent_ratings(
    problem_id: &str,
    user_id: &str,
    logs: &[ReviewLog],
    limit: usize,
) -> Vec<Rating> {
    let mut relevant: Vec<&ReviewLog> = logs
        .iter()
        .filter(|log| log.problem_id == problem_id && log.user_id == user_id)
        .collect();
    relevant.sort_by_key(|log| log.reviewed_at);

    relevant
        .iter()
        .skip(relevant.len().saturating_sub(limit))
        .map(|log| log.rating)
        .collect()
}

/// Render ratings as the symbol strip the UI displays
pub fn history_symbols(ratings: &[Rating]) -> String {
    ratings
        .iter()
        .map(Rating::symbol)
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================
