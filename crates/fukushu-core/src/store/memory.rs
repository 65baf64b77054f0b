//! In-memory store.
//!
//! Reference implementation of the collaborator contract, used by tests and
//! as the staging area for local-data migration. Writes are set-by-id, so a
//! retried or re-imported write replaces its document instead of minting a
//! duplicate.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use tokio::sync::watch;

use crate::domain::{Problem, ProblemDraft, ReviewLog};

use super::{NewReviewLog, Result, ReviewLogSink, ReviewStore, Snapshot, StoreError};

/// In-memory [`ReviewStore`] with a watch-based change stream.
pub struct MemoryStore {
    state: Mutex<Snapshot>,
    changes: watch::Sender<Snapshot>,
    authenticated: Mutex<bool>,
}

impl MemoryStore {
    /// Create an empty, authenticated store
    pub fn new() -> Self {
        let (changes, _) = watch::channel(Snapshot::default());
        Self {
            state: Mutex::new(Snapshot::default()),
            changes,
            authenticated: Mutex::new(true),
        }
    }

    /// Simulate sign-in/sign-out; writes fail while signed out
    pub fn set_authenticated(&self, authenticated: bool) {
        *self.authenticated.lock().unwrap_or_else(|e| e.into_inner()) = authenticated;
    }

    /// Current snapshot value
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn check_auth(&self) -> Result<()> {
        if *self.authenticated.lock().unwrap_or_else(|e| e.into_inner()) {
            Ok(())
        } else {
            Err(StoreError::Unauthenticated)
        }
    }

    /// Run a mutation under the lock and push the new snapshot to
    /// subscribers.
    fn mutate<T>(&self, f: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let result = f(&mut state)?;
        let _ = self.changes.send(state.clone());
        Ok(result)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewLogSink for MemoryStore {
    async fn append_review_log(&self, entry: NewReviewLog) -> Result<ReviewLog> {
        self.check_auth()?;
        let log = ReviewLog::new(entry.problem_id, entry.user_id, entry.rating, entry.reviewed_at);
        self.mutate(|state| {
            state.review_logs.push(log.clone());
            Ok(log.clone())
        })
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn list_problems(&self, user_id: &str) -> Result<Vec<Problem>> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        Ok(state
            .problems
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_review_logs(&self, user_id: &str) -> Result<Vec<ReviewLog>> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        Ok(state
            .review_logs
            .iter()
            .filter(|log| log.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn put_problem(&self, problem: Problem) -> Result<()> {
        self.check_auth()?;
        self.mutate(|state| {
            match state.problems.iter_mut().find(|p| p.id == problem.id) {
                Some(existing) => *existing = problem,
                None => state.problems.push(problem),
            }
            Ok(())
        })
    }

    async fn update_problem(&self, id: &str, draft: ProblemDraft) -> Result<Problem> {
        self.check_auth()?;
        draft.validate()?;
        self.mutate(|state| {
            let problem = state
                .problems
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            problem.apply(draft, Utc::now());
            Ok(problem.clone())
        })
    }

    async fn delete_problem(&self, id: &str) -> Result<()> {
        self.check_auth()?;
        self.mutate(|state| {
            let before = state.problems.len();
            state.problems.retain(|p| p.id != id);
            if state.problems.len() == before {
                return Err(StoreError::NotFound(id.to_string()));
            }
            // Cascade: a deleted problem takes its history with it
            state.review_logs.retain(|log| log.problem_id != id);
            Ok(())
        })
    }

    fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.changes.subscribe()
    }
}

// ============================================================================
// TESTS
// ============================================================================
