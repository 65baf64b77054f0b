//! Queue Builder
//!
//! Turns a filtered problem set and the review history into the initial
//! session queue: problems are grouped by identical score, each group is
//! shuffled uniformly, and the groups are concatenated hardest-first.
//!
//! Tie order within a score tier is intentionally re-randomized on every
//! session start; re-running setup with identical data is expected to
//! produce a different order.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use crate::domain::{Problem, ReviewLog};
use crate::scoring::review_score;

/// Build the initial review queue for a session.
///
/// `problems` must already be filtered by the caller (matching user, not
/// archived, matching subject/tag filters). Returns problem ids with the
/// highest-scoring group first and unseen (score 0) problems last. An empty
/// input yields an empty queue; callers treat that as "no session
/// possible", not an error.
pub fn build_queue<R: Rng + ?Sized>(
    problems: &[Problem],
    logs: &[ReviewLog],
    user_id: &str,
    rng: &mut R,
) -> Vec<String> {
    // BTreeMap keys iterate ascending; reversed below for hardest-first.
    let mut groups: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for problem in problems {
        let score = review_score(&problem.id, user_id, logs);
        groups.entry(score).or_default().push(problem.id.clone());
    }

    let mut queue = Vec::with_capacity(problems.len());
    for (score, mut group) in groups.into_iter().rev() {
        // Fisher-Yates via rand; uniform over all permutations of the tier.
        group.shuffle(rng);
        tracing::debug!(score, size = group.len(), "queue tier");
        queue.extend(group);
    }

    tracing::debug!(len = queue.len(), user_id, "built review queue");
    queue
}

// ============================================================================
// TESTS
// ============================================================================
