//! # Fukushu Core
//!
//! Review session engine for a parent/child flashcard app. The engine
//! consumes two externally-supplied collections - problems and review
//! logs - and produces an ordered, mutable playback queue with
//! rating-driven re-insertion:
//!
//! - **Scoring**: a per-problem "needs review" weight (2x wrong + 1x doubt)
//! - **Queue building**: score-grouped, shuffled within ties, hardest first
//! - **Session control**: Setup → Active → Exhausted with adaptive
//!   repetition of missed problems a fixed lookahead ahead
//! - **History**: the recent-rating strip shown under the current card
//! - **Migration**: CSV/JSON import/export with dedup-safe merge semantics
//!
//! Storage, sync, and authentication are external collaborators behind the
//! [`ReviewStore`] trait; the engine borrows read access to immutable
//! snapshots and emits append requests.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fukushu_core::{ReviewOptions, Rating, SessionController};
//!
//! let mut session = SessionController::new();
//! session.start(&problems, &logs, "rin", ReviewOptions::default(), &mut rng)?;
//!
//! while let Some(problem_id) = session.current() {
//!     session.reveal_answer();
//!     session.rate(Rating::Correct, &store).await?;
//! }
//! session.restart(); // fresh pass over the same initial order
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod domain;
pub mod history;
pub mod io;
pub mod queue;
pub mod scoring;
pub mod session;
pub mod store;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Domain model
pub use domain::{
    normalize_tags, AppSettings, DomainError, Problem, ProblemDraft, Rating, ReviewLog,
    ReviewOptions, SortOrder, Subject, User, TAG_DELIMITER,
};

// Scoring + queue building
pub use queue::build_queue;
pub use scoring::{review_score, DOUBT_WEIGHT, WRONG_WEIGHT};

// Session state machine
pub use session::{SessionController, SessionError, SessionPhase, REPEAT_LOOKAHEAD};

// History view
pub use history::{history_symbols, recent_ratings, DEFAULT_HISTORY_LIMIT};

// Store boundary
pub use store::{
    MemoryStore, NewReviewLog, Result, ReviewLogSink, ReviewStore, Snapshot, StoreError,
};

// Import/export adapters
pub use io::{
    export_backup, export_logs_csv, export_problems_csv, import_backup, import_problems_csv,
    import_question_bank_csv, normalize_status, parse_backup, Backup, CsvError, CsvImport,
    ImportSummary, JsonError, BACKUP_VERSION,
};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        build_queue, recent_ratings, review_score, AppSettings, MemoryStore, Problem,
        ProblemDraft, Rating, Result, ReviewLog, ReviewOptions, ReviewStore, SessionController,
        SessionError, SessionPhase, Snapshot, StoreError, Subject, User,
    };
}
