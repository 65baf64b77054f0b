//! Store Boundary
//!
//! Contracts for the external storage collaborator (cloud document store,
//! local fallback, test double - the engine does not care which):
//! - [`ReviewLogSink`]: the one write the session controller performs
//! - [`ReviewStore`]: full problem/log CRUD plus a push-based change stream
//! - [`Snapshot`]: an immutable value replacing the previous one on every
//!   change notification, with defensive duplicate-id handling
//!
//! The engine borrows read access to snapshots and emits append requests;
//! it never mutates shared collections in place.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio::sync::watch;

use crate::domain::{Problem, ProblemDraft, Rating, ReviewLog};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Store error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No authenticated user; writes are rejected
    #[error("not authenticated")]
    Unauthenticated,
    /// The backing store cannot be reached
    #[error("store unreachable: {0}")]
    Unavailable(String),
    /// Referenced record does not exist
    #[error("not found: {0}")]
    NotFound(String),
    /// Draft validation failed
    #[error(transparent)]
    Validation(#[from] crate::domain::DomainError),
}

/// Store result type
pub type Result<T> = std::result::Result<T, StoreError>;

// ============================================================================
// WIRE TYPES
// ============================================================================

/// An append request for one rating submission.
///
/// The store assigns the log id, mirroring document stores that mint
/// identifiers on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReviewLog {
    /// The rated problem
    pub problem_id: String,
    /// The reviewing user
    pub user_id: String,
    /// Outcome of the attempt
    pub rating: Rating,
    /// When the review happened
    pub reviewed_at: DateTime<Utc>,
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// One immutable view of a user's data, as pushed by the change stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// All problems, archived included
    pub problems: Vec<Problem>,
    /// Full append-only review history
    pub review_logs: Vec<ReviewLog>,
}

impl Snapshot {
    /// Drop records whose id was already seen, keeping the first occurrence.
    ///
    /// Duplicate ids indicate a non-idempotent write upstream; they are a
    /// consistency warning, never a crash. Each collision is logged.
    pub fn deduplicated(mut self) -> Self {
        let mut seen = HashSet::new();
        self.problems.retain(|p| {
            let fresh = seen.insert(p.id.clone());
            if !fresh {
                tracing::warn!(id = %p.id, text = %p.text, "duplicate problem id in snapshot");
            }
            fresh
        });

        let mut seen = HashSet::new();
        self.review_logs.retain(|log| {
            let fresh = seen.insert(log.id.clone());
            if !fresh {
                tracing::warn!(id = %log.id, problem_id = %log.problem_id, "duplicate review log id in snapshot");
            }
            fresh
        });

        self
    }

    /// Active (non-archived) problems for one user, optionally narrowed by
    /// subject name and tag. This is the filter applied before a session.
    pub fn session_candidates(
        &self,
        user_id: &str,
        subject_filter: Option<&str>,
        tag_filter: Option<&str>,
    ) -> Vec<Problem> {
        self.problems
            .iter()
            .filter(|p| p.user_id == user_id && p.is_active())
            .filter(|p| subject_filter.is_none_or(|s| p.subject.name() == s))
            .filter(|p| tag_filter.is_none_or(|t| p.tags.iter().any(|tag| tag == t)))
            .cloned()
            .collect()
    }
}

// ============================================================================
// COLLABORATOR TRAITS
// ============================================================================

/// The single write path the session controller needs.
#[async_trait]
pub trait ReviewLogSink: Send + Sync {
    /// Append exactly one review log. Fails with a transport/auth error if
    /// the user is unauthenticated or the store is unreachable; the call is
    /// retryable with identical arguments.
    async fn append_review_log(&self, entry: NewReviewLog) -> Result<ReviewLog>;
}

/// Full storage collaborator contract.
#[async_trait]
pub trait ReviewStore: ReviewLogSink {
    /// All problems owned by a user
    async fn list_problems(&self, user_id: &str) -> Result<Vec<Problem>>;

    /// Full review history for a user
    async fn list_review_logs(&self, user_id: &str) -> Result<Vec<ReviewLog>>;

    /// Insert or replace a problem by id (idempotent set-by-id write; a
    /// retried call cannot mint a duplicate document)
    async fn put_problem(&self, problem: Problem) -> Result<()>;

    /// Replace a problem's editable fields; id and creation time survive
    async fn update_problem(&self, id: &str, draft: ProblemDraft) -> Result<Problem>;

    /// Hard-delete a problem, cascading to its review logs
    async fn delete_problem(&self, id: &str) -> Result<()>;

    /// Push-based change stream yielding the full current snapshot on
    /// every change
    fn subscribe(&self) -> watch::Receiver<Snapshot>;
}

// ============================================================================
// TESTS
// ============================================================================
