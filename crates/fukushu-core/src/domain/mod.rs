//! Domain Model
//!
//! Pure value types shared by the whole engine:
//! - Problems (flashcards) and their drafts
//! - Append-only review logs and the three-valued rating
//! - Subjects (fixed curriculum vs. free-form)
//! - Users and application settings

mod problem;
mod rating;
mod settings;
mod subject;

pub use problem::{normalize_tags, DomainError, Problem, ProblemDraft, ReviewLog, TAG_DELIMITER};
pub use rating::Rating;
pub use settings::{AppSettings, ReviewOptions, SortOrder, User};
pub use subject::Subject;
