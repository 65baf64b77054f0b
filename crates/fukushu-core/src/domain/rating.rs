//! Review rating - the outcome of a single review attempt.

use serde::{Deserialize, Serialize};

/// Outcome of one review attempt.
///
/// Ordering for "needs review" priority is wrong > doubt > correct;
/// the scoring module turns that into a numeric weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Answered incorrectly
    Wrong,
    /// Answered, but the child was not confident
    Doubt,
    /// Answered correctly
    Correct,
}

impl Rating {
    /// Convert to the wire/storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Wrong => "wrong",
            Rating::Doubt => "doubt",
            Rating::Correct => "correct",
        }
    }

    /// Parse from the wire/storage representation
    pub fn parse_name(s: &str) -> Option<Self> {
        match s {
            "wrong" => Some(Rating::Wrong),
            "doubt" => Some(Rating::Doubt),
            "correct" => Some(Rating::Correct),
            _ => None,
        }
    }

    /// Display symbol used in history strips and CSV headers (x / triangle / circle)
    pub fn symbol(&self) -> char {
        match self {
            Rating::Wrong => '×',
            Rating::Doubt => '△',
            Rating::Correct => '○',
        }
    }

    /// Human-readable Japanese label used in spreadsheet exports
    pub fn label(&self) -> &'static str {
        match self {
            Rating::Wrong => "まちがい",
            Rating::Doubt => "ちょっと自信ない",
            Rating::Correct => "できた",
        }
    }

    /// True for ratings that should trigger adaptive repetition
    pub fn needs_repeat(&self) -> bool {
        matches!(self, Rating::Wrong | Rating::Doubt)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================
