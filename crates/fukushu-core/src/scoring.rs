//! Scoring Function
//!
//! Computes a per-problem "needs more practice" weight from the review
//! history: each wrong answer counts double, each doubtful answer counts
//! once, correct answers count nothing. The score is a monotonically
//! increasing tally, not a probability - there is no time decay and no
//! recency weighting.

use crate::domain::{Rating, ReviewLog};

/// Weight of a `wrong` rating
pub const WRONG_WEIGHT: u32 = 2;
/// Weight of a `doubt` rating
pub const DOUBT_WEIGHT: u32 = 1;

/// Score one problem for one user over the full log history.
///
/// Unseen problems score 0. Logs for other problems or other users are
/// ignored, so callers can pass the unfiltered history.
pub fn review_score(problem_id: &str, user_id: &str, logs: &[ReviewLog]) -> u32 {
    logs.iter()
        .filter(|log| log.problem_id == problem_id && log.user_id == user_id)
        .map(|log| match log.rating {
            Rating::Wrong => WRONG_WEIGHT,
            Rating::Doubt => DOUBT_WEIGHT,
            Rating::Correct => 0,
        })
        .sum()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn log(problem_id: &str, user_id: &str, rating: Rating) -> ReviewLog {
        ReviewLog::new(problem_id, user_id, rating, Utc::now())
    }

    #[test]
    fn test_unseen_problem_scores_zero() {
        assert_eq!(review_score("p1", "rin", &[]), 0);
    }

    #[test]
    fn test_weights() {
        let logs = vec![
            log("p1", "rin", Rating::Wrong),
            log("p1", "rin", Rating::Wrong),
            log("p1", "rin", Rating::Doubt),
            log("p1", "rin", Rating::Correct),
        ];
        // 2*2 + 1*1 + 0
        assert_eq!(review_score("p1", "rin", &logs), 5);
    }

    #[test]
    fn test_filters_by_problem_and_user() {
        let logs = vec![
            log("p1", "rin", Rating::Wrong),
            log("p2", "rin", Rating::Wrong),
            log("p1", "yui", Rating::Wrong),
        ];
        assert_eq!(review_score("p1", "rin", &logs), 2);
        assert_eq!(review_score("p2", "rin", &logs), 2);
        assert_eq!(review_score("p1", "yui", &logs), 2);
    }

    #[test]
    fn test_all_correct_scores_zero() {
        let logs = vec![
            log("p1", "rin", Rating::Correct),
            log("p1", "rin", Rating::Correct),
        ];
        assert_eq!(review_score("p1", "rin", &logs), 0);
    }
}
