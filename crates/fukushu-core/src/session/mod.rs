//! Session Controller
//!
//! State machine for one review pass: Setup (filters being chosen, no
//! queue) → Active (stepping through the queue) → Exhausted (index past the
//! end). The controller exclusively owns the session queue; the only
//! external effect is one append request per rating submission.
//!
//! Failure semantics: if the append is rejected, the transition does not
//! happen - index, reveal flag, and queue are untouched and the caller may
//! retry with the same rating. Exclusive `&mut` access serializes rating
//! submissions; a second `rate` cannot start while one is in flight.

use chrono::Utc;
use rand::Rng;

use crate::domain::{Problem, Rating, ReviewLog, ReviewOptions};
use crate::queue::build_queue;
use crate::store::{NewReviewLog, ReviewLogSink, StoreError};

/// How far ahead a missed problem is re-inserted. Fixed lookahead rather
/// than immediate repetition, to avoid back-to-back repeats.
pub const REPEAT_LOOKAHEAD: usize = 3;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Session error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No problems matched the session filters; the session stays in Setup.
    /// Surfaced as a user-facing message, not a fault.
    #[error("no problems match the current filters")]
    NoProblems,
    /// The operation requires an active session with a current problem
    #[error("no active session")]
    NotActive,
    /// The rating submission was rejected by the storage collaborator;
    /// session state is unchanged and the call is retryable
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// SESSION CONTROLLER
// ============================================================================

/// Lifecycle phase of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No queue yet; filters being chosen
    Setup,
    /// Queue non-empty, current index within it
    Active,
    /// Index has advanced past the end of the queue; restartable
    Exhausted,
}

/// Drives one review session over a queue of problem ids.
///
/// The queue may contain duplicates once re-insertion kicks in; it only
/// ever grows mid-session. `index == queue.len()` is the sole condition
/// defining [`SessionPhase::Exhausted`].
#[derive(Debug, Default)]
pub struct SessionController {
    user_id: String,
    options: ReviewOptions,
    /// Order captured at `start()`, reused verbatim by `restart()`
    initial_queue: Vec<String>,
    queue: Vec<String>,
    index: usize,
    answer_revealed: bool,
}

impl SessionController {
    /// A controller in Setup, waiting for `start`
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        if self.queue.is_empty() {
            SessionPhase::Setup
        } else if self.index >= self.queue.len() {
            SessionPhase::Exhausted
        } else {
            SessionPhase::Active
        }
    }

    /// Begin a session over the caller-filtered problem set.
    ///
    /// Builds the queue (score groups, shuffled ties, hardest first) and
    /// captures it for later `restart`. An empty problem set fails with
    /// [`SessionError::NoProblems`] and leaves the controller in Setup.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        problems: &[Problem],
        logs: &[ReviewLog],
        user_id: &str,
        options: ReviewOptions,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        if problems.is_empty() {
            return Err(SessionError::NoProblems);
        }

        let queue = build_queue(problems, logs, user_id, rng);
        self.user_id = user_id.to_string();
        self.options = options;
        self.initial_queue = queue.clone();
        self.queue = queue;
        self.index = 0;
        self.answer_revealed = false;
        tracing::debug!(user_id, len = self.queue.len(), "session started");
        Ok(())
    }

    /// The problem currently shown, if the session is active
    pub fn current(&self) -> Option<&str> {
        self.queue.get(self.index).map(String::as_str)
    }

    /// Reveal the answer for the current problem. Idempotent; no other
    /// side effect.
    pub fn reveal_answer(&mut self) {
        if self.phase() == SessionPhase::Active {
            self.answer_revealed = true;
        }
    }

    /// Hide the answer again ("one more try" before rating)
    pub fn hide_answer(&mut self) {
        self.answer_revealed = false;
    }

    /// Whether the answer is currently revealed
    pub fn is_answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    /// Step back one problem. Free, unrated navigation; the reveal flag is
    /// left as-is.
    pub fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Step forward one problem, clamped to one past the end (which is the
    /// Exhausted position). Free, unrated navigation.
    pub fn next(&mut self) {
        self.index = (self.index + 1).min(self.queue.len());
    }

    /// One-based position and queue length for progress display
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.queue.len())
    }

    /// The session queue as it currently stands (re-insertions included)
    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    /// Submit a rating for the current problem.
    ///
    /// Emits exactly one append request. On failure nothing changes and the
    /// error is returned; retrying with the same rating is safe. On success
    /// the problem is re-inserted `REPEAT_LOOKAHEAD` positions ahead when
    /// both repeat options are on and the rating is wrong/doubt, the reveal
    /// flag is cleared, and the index advances.
    pub async fn rate(
        &mut self,
        rating: Rating,
        sink: &dyn ReviewLogSink,
    ) -> Result<SessionPhase, SessionError> {
        let problem_id = self.current().ok_or(SessionError::NotActive)?.to_string();

        sink.append_review_log(NewReviewLog {
            problem_id: problem_id.clone(),
            user_id: self.user_id.clone(),
            rating,
            reviewed_at: Utc::now(),
        })
        .await?;

        if self.options.repeat_within_session
            && self.options.repeat_mistakes
            && rating.needs_repeat()
        {
            let insert_at = (self.index + REPEAT_LOOKAHEAD).min(self.queue.len());
            self.queue.insert(insert_at, problem_id.clone());
            tracing::debug!(problem_id = %problem_id, insert_at, "re-inserted missed problem");
        }

        self.answer_revealed = false;
        self.index += 1;
        Ok(self.phase())
    }

    /// Fresh pass over the original pre-session order captured at `start`,
    /// not the mutated queue with re-insertions. Only meaningful from
    /// Exhausted.
    pub fn restart(&mut self) {
        if self.phase() == SessionPhase::Exhausted {
            self.queue = self.initial_queue.clone();
            self.index = 0;
            self.answer_revealed = false;
            tracing::debug!(len = self.queue.len(), "session restarted");
        }
    }

    /// Discard the queue and all session state unconditionally
    pub fn end(&mut self) {
        *self = Self::default();
        tracing::debug!("session ended");
    }
}

// ============================================================================
// TESTS
// ============================================================================
