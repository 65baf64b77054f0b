//! Problems (flashcards) and their append-only review logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Rating, Subject};

/// Delimiter for the raw tag input field
pub const TAG_DELIMITER: char = ';';

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Validation error for problem drafts
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Question text is empty after trimming
    #[error("question text is required")]
    EmptyText,
    /// Answer text is empty after trimming
    #[error("answer text is required")]
    EmptyAnswer,
}

// ============================================================================
// PROBLEM
// ============================================================================

/// A single flashcard: question, answer, and metadata.
///
/// Problems are soft-deleted via the `archived` flag; archived problems are
/// excluded from review and listing but never physically removed by the
/// engine. Hard deletion is a storage-collaborator operation that cascades
/// to the problem's review logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Subject, flattened to the `subjectName`/`subjectFixed` field pair
    #[serde(flatten)]
    pub subject: Subject,
    /// Question text
    pub text: String,
    /// Answer text
    pub answer: String,
    /// Ordered tag list; duplicates allowed by construction
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional image reference (storage key or URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional source citation (e.g. which test the problem came from)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Optional memo shown alongside the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// When the problem was registered
    pub created_at: DateTime<Utc>,
    /// When the problem was last edited
    pub updated_at: DateTime<Utc>,
    /// Soft-delete flag
    #[serde(default)]
    pub archived: bool,
}

impl Problem {
    /// Whether this problem is a candidate for review sessions and listings
    pub fn is_active(&self) -> bool {
        !self.archived
    }

    /// Apply an edit: replaces editable fields, never `id`/`created_at`
    pub fn apply(&mut self, draft: ProblemDraft, now: DateTime<Utc>) {
        self.user_id = draft.user_id;
        self.subject = draft.subject;
        self.text = draft.text.trim().to_string();
        self.answer = draft.answer.trim().to_string();
        self.tags = draft.tags;
        self.image = draft.image;
        self.source = draft.source;
        self.memo = draft.memo;
        self.updated_at = now;
    }
}

// ============================================================================
// PROBLEM DRAFT
// ============================================================================

/// Editable fields of a problem, validated before any mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDraft {
    /// Owning user
    pub user_id: String,
    /// Subject, flattened to the `subjectName`/`subjectFixed` field pair
    #[serde(flatten)]
    pub subject: Subject,
    /// Question text (required)
    pub text: String,
    /// Answer text (required)
    pub answer: String,
    /// Tags, already normalized via [`normalize_tags`]
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional source citation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Optional memo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl ProblemDraft {
    /// Reject drafts whose question or answer is empty after trimming.
    ///
    /// Validation happens before any mutation; a failing draft is never
    /// partially applied.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.text.trim().is_empty() {
            return Err(DomainError::EmptyText);
        }
        if self.answer.trim().is_empty() {
            return Err(DomainError::EmptyAnswer);
        }
        Ok(())
    }

    /// Materialize a validated draft into a new problem
    pub fn into_problem(self, now: DateTime<Utc>) -> Result<Problem, DomainError> {
        self.validate()?;
        Ok(Problem {
            id: Uuid::new_v4().to_string(),
            user_id: self.user_id,
            subject: self.subject,
            text: self.text.trim().to_string(),
            answer: self.answer.trim().to_string(),
            tags: self.tags,
            image: self.image,
            source: self.source,
            memo: self.memo,
            created_at: now,
            updated_at: now,
            archived: false,
        })
    }
}

/// Split a raw tag field on `;`, trim each entry, and drop empties.
///
/// Order is preserved and duplicates are kept; callers that want a set
/// dedupe themselves.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    raw.split(TAG_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// REVIEW LOG
// ============================================================================

/// One timestamped rating event for a problem.
///
/// Logs are append-only: created exactly once per rating submission, never
/// mutated, deleted only when their parent problem is hard-deleted. A log
/// may outlive its problem in a stale snapshot; readers tolerate dangling
/// references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLog {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// The rated problem
    pub problem_id: String,
    /// The reviewing user
    pub user_id: String,
    /// When the review happened
    pub reviewed_at: DateTime<Utc>,
    /// Outcome of the attempt
    pub rating: Rating,
}

impl ReviewLog {
    /// Create a new log entry with a fresh id
    pub fn new(
        problem_id: impl Into<String>,
        user_id: impl Into<String>,
        rating: Rating,
        reviewed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            problem_id: problem_id.into(),
            user_id: user_id.into(),
            reviewed_at,
            rating,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
